//! # Message Schemas
//!
//! The declarative description that data-drives the codec: field types,
//! block repetition policies, and ordering. One `MessageSchema` value per
//! message kind replaces a hand-written codec per message.
//!
//! Schemas are immutable after construction and shared read-only across
//! concurrent encode/decode calls.

mod load;
mod table;

pub use load::SchemaLoadError;
pub use table::{schema_table, MessageId, SchemaTable};

/// Byte order of a multi-byte scalar field.
///
/// The protocol is little-endian except where a schema explicitly says
/// otherwise; the observed exception is a 16-bit port carried in network
/// byte order inside an otherwise little-endian message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endian {
    /// Little-endian (the protocol default).
    #[default]
    Little,
    /// Big-endian (network byte order).
    Big,
}

/// The type of a single field on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// One-byte boolean; nonzero decodes to true.
    Bool,
    /// 16-byte opaque identifier.
    Id128,
    /// Three consecutive 32-bit floats (x, y, z), 12 bytes.
    Vec3,
    /// Three consecutive 64-bit floats (x, y, z), 24 bytes.
    Vec3d,
    /// A unit quaternion stored as (x, y, z) only, 12 bytes.
    ///
    /// `w` is reconstructed on decode under the non-negative-`w` convention.
    CompactRotation,
    /// Length-prefixed byte data with a schema-declared maximum.
    VarBytes {
        /// Maximum payload length the schema permits.
        max_len: usize,
        /// Width of the length prefix in bytes (1 or 2, derived from
        /// `max_len`).
        prefix_width: usize,
    },
}

impl FieldType {
    /// Creates a variable-length byte field.
    ///
    /// The prefix width follows from the maximum: one byte up to 255, two
    /// bytes up to 65535.
    #[must_use]
    pub const fn var_bytes(max_len: usize) -> Self {
        assert!(max_len >= 1 && max_len <= 65535);
        let prefix_width = if max_len <= 255 { 1 } else { 2 };
        Self::VarBytes {
            max_len,
            prefix_width,
        }
    }

    /// Returns the wire width of a fixed-size field, or `None` for
    /// variable-length data.
    #[must_use]
    pub const fn fixed_width(&self) -> Option<usize> {
        match self {
            Self::U8 | Self::I8 | Self::Bool => Some(1),
            Self::U16 | Self::I16 => Some(2),
            Self::U32 | Self::I32 | Self::F32 => Some(4),
            Self::U64 | Self::I64 | Self::F64 => Some(8),
            Self::Id128 => Some(16),
            Self::Vec3 | Self::CompactRotation => Some(12),
            Self::Vec3d => Some(24),
            Self::VarBytes { .. } => None,
        }
    }

    /// Human-readable name, for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Id128 => "id128",
            Self::Vec3 => "vec3",
            Self::Vec3d => "vec3d",
            Self::CompactRotation => "rotation",
            Self::VarBytes { .. } => "var_bytes",
        }
    }
}

/// One field of a block: name, type, and byte order.
///
/// Order within a block is significant and fixed by the schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSchema {
    /// Field name, for diagnostics and rendering.
    pub name: String,
    /// Wire type.
    pub ty: FieldType,
    /// Byte order override; little-endian unless the schema says otherwise.
    pub endian: Endian,
}

impl FieldSchema {
    /// Creates a little-endian field.
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            endian: Endian::Little,
        }
    }

    /// Creates a field with an explicit byte order.
    pub fn with_endian(name: impl Into<String>, ty: FieldType, endian: Endian) -> Self {
        Self {
            name: name.into(),
            ty,
            endian,
        }
    }
}

/// How many times a block's field list repeats within a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockRepetition {
    /// Exactly one instance, no count prefix.
    Single,
    /// Exactly `n` instances, no count prefix; `n` is a schema constant.
    Fixed(usize),
    /// A one-byte unsigned count prefix, then 0-255 instances.
    Variable,
}

/// A named, ordered group of fields with a repetition policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockSchema {
    /// Block name, for diagnostics and rendering.
    pub name: String,
    /// Repetition policy.
    pub repetition: BlockRepetition,
    /// Fields in wire order.
    pub fields: Vec<FieldSchema>,
}

impl BlockSchema {
    /// Creates a block schema.
    pub fn new(
        name: impl Into<String>,
        repetition: BlockRepetition,
        fields: Vec<FieldSchema>,
    ) -> Self {
        Self {
            name: name.into(),
            repetition,
            fields,
        }
    }
}

/// The complete wire description of one message kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageSchema {
    /// Message name, for diagnostics and rendering.
    pub name: String,
    /// Blocks in wire order.
    pub blocks: Vec<BlockSchema>,
}

impl MessageSchema {
    /// Creates a message schema.
    pub fn new(name: impl Into<String>, blocks: Vec<BlockSchema>) -> Self {
        Self {
            name: name.into(),
            blocks,
        }
    }
}
