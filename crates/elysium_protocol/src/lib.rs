//! # ELYSIUM Protocol - The Lattice Wire Format
//!
//! Schema-driven codec for the message bodies of the ELYSIUM UDP protocol.
//!
//! ## Message Structure
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Header (opaque, external - written/parsed by delegation)     │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Block 0: [count?] instance fields, instance fields, ...      │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Block 1: ...                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every message kind shares one wire discipline: an ordered list of typed
//! fields, grouped into blocks that repeat exactly once, a schema-fixed
//! number of times, or a count-prefixed number of times. There is no padding,
//! no alignment, and no self-description - position in the schema is the only
//! addressing mechanism.
//!
//! ## Design Philosophy
//!
//! - Schemas are data; the engine is the only codec logic in the process
//! - Every byte is accounted for - encoded length always equals computed length
//! - Encode fails fast, before any bytes are written
//! - Decode never trusts the wire - every read is bounds-checked
//!
//! ## Example
//!
//! ```rust,ignore
//! use elysium_protocol::{schema_table, MessageCodec, MessageId};
//!
//! let schema = schema_table().get(MessageId::SESSION_HANDSHAKE).unwrap();
//! let bytes = MessageCodec::new(schema).encode(&values, &())?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod error;
pub mod header;
pub mod schema;
pub mod value;
pub mod wire;

// Re-exports for convenience
pub use codec::MessageCodec;
pub use error::{CodecError, CodecResult};
pub use header::WireHeader;
pub use schema::{
    schema_table, BlockRepetition, BlockSchema, Endian, FieldSchema, FieldType, MessageId,
    MessageSchema, SchemaLoadError, SchemaTable,
};
pub use value::{BlockValue, FieldValue, MessageValue};
pub use wire::{WireReader, WireWriter};

/// Upper bound on instances of a count-prefixed block.
///
/// The count prefix is a single unsigned byte.
pub const MAX_VARIABLE_INSTANCES: usize = 255;

/// Upper bound on a variable field's declared maximum length.
///
/// Length prefixes are at most two bytes wide.
pub const MAX_VAR_FIELD_LEN: usize = 65535;
