//! # Message Codec
//!
//! The orchestrating pass: header first (delegated, opaque), then every
//! block in schema order, against one shared cursor. Position in the schema
//! is the only addressing mechanism - the wire carries no field names, no
//! tags, no padding.

use super::block::{decode_block, encode_block, encoded_block_len};
use crate::error::CodecResult;
use crate::header::WireHeader;
use crate::schema::MessageSchema;
use crate::value::MessageValue;
use crate::wire::{WireReader, WireWriter};

/// Encoder/decoder for one message kind.
///
/// Holds only a schema reference; construction is free and the codec is
/// stateless, so one can be made per call or kept around, shared across
/// threads.
pub struct MessageCodec<'a> {
    schema: &'a MessageSchema,
}

impl<'a> MessageCodec<'a> {
    /// Creates a codec over a schema.
    #[must_use]
    pub const fn new(schema: &'a MessageSchema) -> Self {
        Self { schema }
    }

    /// Wire length of the message body for these values.
    ///
    /// Byte-exact for values that validate: summing field-by-field equals
    /// the bytes [`MessageCodec::encode`] writes, always.
    #[must_use]
    pub fn body_len(&self, values: &MessageValue) -> usize {
        self.schema
            .blocks
            .iter()
            .zip(values.blocks())
            .map(|(block, value)| encoded_block_len(block, value))
            .sum()
    }

    /// Total wire length: the header's self-reported length plus the body.
    #[must_use]
    pub fn message_len<H: WireHeader>(&self, values: &MessageValue, header: &H) -> usize {
        header.length() + self.body_len(values)
    }

    /// Encodes a complete message: header, then blocks in schema order.
    ///
    /// Validation runs first, so a rejected message writes nothing - there
    /// is no partial buffer to clean up.
    ///
    /// # Errors
    ///
    /// [`crate::CodecError::SchemaMismatch`] /
    /// [`crate::CodecError::TypeMismatch`] for values that do not match the
    /// schema, [`crate::CodecError::Overflow`] for variable fields over
    /// their maxima.
    pub fn encode<H: WireHeader>(
        &self,
        values: &MessageValue,
        header: &H,
    ) -> CodecResult<Vec<u8>> {
        values.validate(self.schema)?;

        let total = self.message_len(values, header);
        let mut writer = WireWriter::with_capacity(total);
        header.write_to(&mut writer);
        for (block, value) in self.schema.blocks.iter().zip(values.blocks()) {
            encode_block(block, value, &mut writer)?;
        }
        debug_assert_eq!(writer.len(), total);
        Ok(writer.into_vec())
    }

    /// Decodes a complete message: header, then blocks in schema order.
    ///
    /// # Errors
    ///
    /// [`crate::CodecError::Truncated`] when the buffer runs short,
    /// [`crate::CodecError::Overflow`] when a peer's length prefix violates
    /// a schema maximum. Both are fatal for this decode attempt; the caller
    /// decides what to do with the malformed datagram.
    pub fn decode<H: WireHeader>(&self, buffer: &[u8]) -> CodecResult<(H, MessageValue)> {
        let mut reader = WireReader::new(buffer);
        let header = H::read_from(&mut reader)?;

        let mut blocks = Vec::with_capacity(self.schema.blocks.len());
        for block in &self.schema.blocks {
            match decode_block(block, &mut reader) {
                Ok(value) => blocks.push(value),
                Err(err) => {
                    tracing::debug!(
                        "decode of `{}` failed in block `{}`: {err}",
                        self.schema.name,
                        block.name
                    );
                    return Err(err);
                }
            }
        }
        Ok((header, MessageValue::from_blocks(blocks)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::schema::{schema_table, MessageId};
    use crate::value::{BlockValue, FieldValue};
    use elysium_core::{Quaternion, Vec3, WorldId};

    #[test]
    fn test_handshake_body_is_32_bytes() {
        let schema = schema_table().get(MessageId::SESSION_HANDSHAKE).unwrap();
        let codec = MessageCodec::new(schema);
        let values = MessageValue::from_blocks(vec![BlockValue::single(vec![
            FieldValue::Id(WorldId::from_bytes([0x11; 16])),
            FieldValue::Id(WorldId::from_bytes([0x22; 16])),
        ])]);

        let bytes = codec.encode(&values, &()).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(codec.body_len(&values), 32);

        let ((), decoded) = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_length_exactness_object_update() {
        let schema = schema_table().get(MessageId::OBJECT_UPDATE).unwrap();
        let codec = MessageCodec::new(schema);

        let object = |id: u32, extra: &[u8]| {
            vec![
                FieldValue::U32(id),
                FieldValue::U8(3),
                FieldValue::Vec3(Vec3::new(1.0, 2.0, 3.0)),
                FieldValue::Vec3(Vec3::ZERO),
                FieldValue::Rotation(Quaternion::IDENTITY),
                FieldValue::Bytes(extra.to_vec()),
            ]
        };
        let values = MessageValue::from_blocks(vec![
            BlockValue::single(vec![FieldValue::U64(0xbeef), FieldValue::U16(65535)]),
            BlockValue::from_instances(vec![object(1, b""), object(2, &[9u8; 40])]),
        ]);

        let bytes = codec.encode(&values, &()).unwrap();
        assert_eq!(bytes.len(), codec.message_len(&values, &()));

        let ((), decoded) = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_encode_fails_fast_without_partial_buffer() {
        let schema = schema_table().get(MessageId::CHAT_FROM_VIEWER).unwrap();
        let codec = MessageCodec::new(schema);
        let values = MessageValue::from_blocks(vec![
            BlockValue::single(vec![
                FieldValue::Id(WorldId::NIL),
                FieldValue::Id(WorldId::NIL),
            ]),
            BlockValue::single(vec![
                FieldValue::Bytes(vec![0u8; 2000]), // over the 1024 maximum
                FieldValue::U8(1),
                FieldValue::I32(0),
            ]),
        ]);

        let err = codec.encode(&values, &()).unwrap_err();
        assert_eq!(
            err,
            CodecError::Overflow {
                field: "message".to_owned(),
                max_len: 1024,
                actual_len: 2000,
            }
        );
    }

    #[test]
    fn test_truncated_buffer_is_fatal() {
        let schema = schema_table().get(MessageId::SESSION_HANDSHAKE).unwrap();
        let codec = MessageCodec::new(schema);
        let err = codec.decode::<()>(&[0u8; 20]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                expected: 16,
                remaining: 4
            }
        );
    }

    #[test]
    fn test_big_endian_port_on_the_wire() {
        let schema = schema_table().get(MessageId::REGION_REDIRECT).unwrap();
        let codec = MessageCodec::new(schema);
        let values = MessageValue::from_blocks(vec![BlockValue::single(vec![
            FieldValue::U32(0x0100_007f),
            FieldValue::U16(13000),
            FieldValue::U64(0),
        ])]);

        let bytes = codec.encode(&values, &()).unwrap();
        // address: little-endian u32, then the port in network byte order.
        assert_eq!(&bytes[4..6], &[0x32, 0xc8]);

        let ((), decoded) = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, values);
    }
}
