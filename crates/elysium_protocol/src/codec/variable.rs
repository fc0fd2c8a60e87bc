//! # Variable Field Codec
//!
//! Length-prefixed byte data: a 1- or 2-byte unsigned little-endian length,
//! then the raw payload. The schema maximum is enforced in both directions -
//! on encode before any bytes are written, and on decode so a hostile length
//! prefix cannot push past the schema bound.

use crate::error::{CodecError, CodecResult};
use crate::schema::{Endian, FieldSchema};
use crate::value::FieldValue;
use crate::wire::{WireReader, WireWriter};
use crate::MAX_VAR_FIELD_LEN;

/// Encodes a length prefix and payload at the writer's current position.
pub(crate) fn encode(
    field: &FieldSchema,
    max_len: usize,
    prefix_width: usize,
    data: &[u8],
    writer: &mut WireWriter,
) -> CodecResult<()> {
    if data.len() > max_len {
        return Err(CodecError::Overflow {
            field: field.name.clone(),
            max_len,
            actual_len: data.len(),
        });
    }
    if prefix_width == 1 {
        let Ok(len) = u8::try_from(data.len()) else {
            return Err(CodecError::Overflow {
                field: field.name.clone(),
                max_len: 255,
                actual_len: data.len(),
            });
        };
        writer.write_u8(len);
    } else {
        let Ok(len) = u16::try_from(data.len()) else {
            return Err(CodecError::Overflow {
                field: field.name.clone(),
                max_len: MAX_VAR_FIELD_LEN,
                actual_len: data.len(),
            });
        };
        // Prefixes are always little-endian, whatever the field's payload
        // order.
        writer.write_u16(len, Endian::Little);
    }
    writer.write_bytes(data);
    Ok(())
}

/// Decodes a length prefix and payload at the reader's current position.
pub(crate) fn decode(
    field: &FieldSchema,
    max_len: usize,
    prefix_width: usize,
    reader: &mut WireReader<'_>,
) -> CodecResult<FieldValue> {
    let len = if prefix_width == 1 {
        usize::from(reader.read_u8()?)
    } else {
        usize::from(reader.read_u16(Endian::Little)?)
    };
    if len > max_len {
        return Err(CodecError::Overflow {
            field: field.name.clone(),
            max_len,
            actual_len: len,
        });
    }
    Ok(FieldValue::Bytes(reader.read_bytes(len)?.to_vec()))
}
