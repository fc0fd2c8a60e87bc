//! # The Codec Engine
//!
//! Generic encode/decode over schema-described messages. The message codec
//! walks blocks, the block codec applies repetition policies, and the field
//! codecs move individual values - all against one shared cursor.
//!
//! Nothing here is message-specific: the ~300 message kinds of the full
//! catalog differ only in the schema values they hand this engine.

mod block;
mod message;
mod scalar;
mod variable;

pub use block::{decode_block, encode_block, encoded_block_len};
pub use message::MessageCodec;

use crate::error::{CodecError, CodecResult};
use crate::schema::{FieldSchema, FieldType};
use crate::value::FieldValue;
use crate::wire::{WireReader, WireWriter};

/// Encodes one field value at the writer's current position.
pub(crate) fn encode_field(
    field: &FieldSchema,
    value: &FieldValue,
    writer: &mut WireWriter,
) -> CodecResult<()> {
    match field.ty {
        FieldType::VarBytes {
            max_len,
            prefix_width,
        } => match value {
            FieldValue::Bytes(data) => variable::encode(field, max_len, prefix_width, data, writer),
            other => Err(CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: field.ty.name(),
                actual: other.type_name(),
            }),
        },
        _ => scalar::encode(field, value, writer),
    }
}

/// Decodes one field value at the reader's current position.
pub(crate) fn decode_field(
    field: &FieldSchema,
    reader: &mut WireReader<'_>,
) -> CodecResult<FieldValue> {
    match field.ty {
        FieldType::VarBytes {
            max_len,
            prefix_width,
        } => variable::decode(field, max_len, prefix_width, reader),
        _ => scalar::decode(field, reader),
    }
}

/// Wire length of one field value.
///
/// Meaningful for values that validate against the schema; a mismatched
/// variant contributes its type's minimum so the function stays total.
pub(crate) fn encoded_field_len(field: &FieldSchema, value: &FieldValue) -> usize {
    match (&field.ty, value) {
        (FieldType::VarBytes { prefix_width, .. }, FieldValue::Bytes(data)) => {
            prefix_width + data.len()
        }
        (FieldType::VarBytes { prefix_width, .. }, _) => *prefix_width,
        (ty, _) => ty.fixed_width().unwrap_or_default(),
    }
}
