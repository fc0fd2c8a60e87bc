//! # Block Codec
//!
//! Applies a block's repetition policy over its ordered field list.
//!
//! Single and fixed blocks carry no count on the wire - the schema is the
//! only source of their instance counts. Count-prefixed blocks spend one
//! byte on the count, so zero instances still costs exactly one byte.

use super::{decode_field, encode_field, encoded_field_len};
use crate::error::{CodecError, CodecResult};
use crate::schema::{BlockRepetition, BlockSchema};
use crate::value::BlockValue;
use crate::wire::{WireReader, WireWriter};
use crate::MAX_VARIABLE_INSTANCES;

/// Wire length of a block value.
///
/// Meaningful for values that validate against the schema.
#[must_use]
pub fn encoded_block_len(block: &BlockSchema, value: &BlockValue) -> usize {
    let count_prefix = usize::from(block.repetition == BlockRepetition::Variable);
    count_prefix
        + value
            .instances()
            .iter()
            .map(|instance| {
                block
                    .fields
                    .iter()
                    .zip(instance)
                    .map(|(field, v)| encoded_field_len(field, v))
                    .sum::<usize>()
            })
            .sum::<usize>()
}

fn check_count(block: &BlockSchema, actual: usize) -> CodecResult<()> {
    let expected = match block.repetition {
        BlockRepetition::Single => 1,
        BlockRepetition::Fixed(n) => n,
        BlockRepetition::Variable => {
            if actual > MAX_VARIABLE_INSTANCES {
                return Err(CodecError::SchemaMismatch {
                    block: block.name.clone(),
                    expected: MAX_VARIABLE_INSTANCES,
                    actual,
                });
            }
            return Ok(());
        }
    };
    if actual == expected {
        Ok(())
    } else {
        Err(CodecError::SchemaMismatch {
            block: block.name.clone(),
            expected,
            actual,
        })
    }
}

/// Encodes all instances of a block at the writer's current position.
///
/// # Errors
///
/// [`CodecError::SchemaMismatch`] if the instance count violates the
/// repetition policy or an instance's field count is wrong;
/// [`CodecError::TypeMismatch`] / [`CodecError::Overflow`] from the field
/// codecs.
pub fn encode_block(
    block: &BlockSchema,
    value: &BlockValue,
    writer: &mut WireWriter,
) -> CodecResult<()> {
    check_count(block, value.len())?;

    if block.repetition == BlockRepetition::Variable {
        let Ok(count) = u8::try_from(value.len()) else {
            return Err(CodecError::SchemaMismatch {
                block: block.name.clone(),
                expected: MAX_VARIABLE_INSTANCES,
                actual: value.len(),
            });
        };
        writer.write_u8(count);
    }

    for instance in value.instances() {
        if instance.len() != block.fields.len() {
            return Err(CodecError::SchemaMismatch {
                block: block.name.clone(),
                expected: block.fields.len(),
                actual: instance.len(),
            });
        }
        for (field, v) in block.fields.iter().zip(instance) {
            encode_field(field, v, writer)?;
        }
    }
    Ok(())
}

/// Decodes all instances of a block at the reader's current position.
///
/// # Errors
///
/// [`CodecError::Truncated`] on buffer underrun, [`CodecError::Overflow`]
/// if a variable field's length prefix violates its schema maximum.
pub fn decode_block(block: &BlockSchema, reader: &mut WireReader<'_>) -> CodecResult<BlockValue> {
    let count = match block.repetition {
        BlockRepetition::Single => 1,
        BlockRepetition::Fixed(n) => n,
        BlockRepetition::Variable => usize::from(reader.read_u8()?),
    };

    let mut value = BlockValue::empty();
    for _ in 0..count {
        let mut instance = Vec::with_capacity(block.fields.len());
        for field in &block.fields {
            instance.push(decode_field(field, reader)?);
        }
        value.push_instance(instance);
    }
    Ok(value)
}
