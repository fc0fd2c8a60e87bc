//! # World Identifiers
//!
//! Every agent, session, object, and asset in the world is named by a
//! 16-byte identifier. On the wire it is an opaque byte block - no
//! endianness, no structure.

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A 16-byte globally-unique identifier.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct WorldId([u8; 16]);

impl WorldId {
    /// The nil identifier (all zero bytes).
    pub const NIL: Self = Self([0; 16]);

    /// Number of bytes in an identifier.
    pub const SIZE: usize = 16;

    /// Creates an identifier from raw bytes.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns true if this is the nil identifier.
    #[inline]
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == [0; 16]
    }
}

impl fmt::Display for WorldId {
    /// Renders in the canonical 8-4-4-4-12 hex grouping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                write!(f, "-")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorldId({self})")
    }
}
