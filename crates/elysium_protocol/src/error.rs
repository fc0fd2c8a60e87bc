//! # Codec Error Types
//!
//! All errors the codec can surface. None of these are retried internally -
//! retry, logging, and recovery belong to the transport layer above.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A variable field's value exceeds its schema maximum.
    ///
    /// Raised before any bytes are written on encode, and on decode when a
    /// peer's length prefix violates the schema bound.
    #[error("field `{field}` overflows schema maximum: {actual_len} > {max_len} bytes")]
    Overflow {
        /// Name of the offending field.
        field: String,
        /// Maximum length the schema allows.
        max_len: usize,
        /// Length actually supplied.
        actual_len: usize,
    },

    /// The buffer ran out of bytes mid-decode.
    ///
    /// Fatal for this decode attempt; the caller decides what to do with the
    /// malformed datagram.
    #[error("buffer truncated: read needs {expected} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the failing read required.
        expected: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A supplied value's shape does not match its schema.
    ///
    /// A programmer error, not a network condition: single and fixed blocks
    /// take exactly the schema instance count, count-prefixed blocks cap at
    /// 255, and every instance carries the full field list.
    #[error("block `{block}` count mismatch: schema expects {expected}, got {actual}")]
    SchemaMismatch {
        /// Name of the offending block (or message, for block-list
        /// mismatches).
        block: String,
        /// Count the schema requires (or permits, for capped blocks).
        expected: usize,
        /// Count actually supplied.
        actual: usize,
    },

    /// A supplied field value's variant does not match its schema type.
    ///
    /// Also a programmer error - values are built against a schema and must
    /// agree with it field-for-field.
    #[error("field `{field}` holds a {actual} value but its schema declares {expected}")]
    TypeMismatch {
        /// Name of the offending field.
        field: String,
        /// Type the schema declares.
        expected: &'static str,
        /// Type actually supplied.
        actual: &'static str,
    },
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
