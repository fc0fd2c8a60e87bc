//! # Header Collaborator
//!
//! The packet header (frequency tier, message id, sequence number,
//! reliability flags) belongs to the transport layer. The body codec only
//! needs to know how long it is and how to delegate writing and parsing,
//! so the seam is a trait.

use crate::error::CodecResult;
use crate::wire::{WireReader, WireWriter};

/// An opaque packet header the message codec composes with.
///
/// The codec writes the header first on encode and parses it first on
/// decode, without interpreting its contents.
pub trait WireHeader {
    /// Encoded length of this header in bytes.
    fn length(&self) -> usize;

    /// Writes the header at the writer's current position.
    fn write_to(&self, writer: &mut WireWriter);

    /// Parses a header at the reader's current position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CodecError::Truncated`] if the buffer is too short.
    fn read_from(reader: &mut WireReader<'_>) -> CodecResult<Self>
    where
        Self: Sized;
}

/// The zero-length header, for callers that frame messages elsewhere.
impl WireHeader for () {
    fn length(&self) -> usize {
        0
    }

    fn write_to(&self, _writer: &mut WireWriter) {}

    fn read_from(_reader: &mut WireReader<'_>) -> CodecResult<Self> {
        Ok(())
    }
}
