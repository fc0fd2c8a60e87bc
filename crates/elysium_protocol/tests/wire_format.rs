//! End-to-end wire format scenarios: full messages with a real header
//! collaborator, exercised through the public API only.

use elysium_core::{Quaternion, Vec3d, WorldId};
use elysium_protocol::{
    schema_table, BlockRepetition, BlockSchema, BlockValue, CodecError, CodecResult, Endian,
    FieldSchema, FieldType, FieldValue, MessageCodec, MessageId, MessageSchema, MessageValue,
    SchemaTable, WireHeader, WireReader, WireWriter,
};

/// A minimal transport header: sequence number and message id.
#[derive(Debug, PartialEq, Eq)]
struct TestHeader {
    sequence: u32,
    message_id: u32,
}

impl WireHeader for TestHeader {
    fn length(&self) -> usize {
        8
    }

    fn write_to(&self, writer: &mut WireWriter) {
        writer.write_u32(self.sequence, Endian::Little);
        writer.write_u32(self.message_id, Endian::Little);
    }

    fn read_from(reader: &mut WireReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            sequence: reader.read_u32(Endian::Little)?,
            message_id: reader.read_u32(Endian::Little)?,
        })
    }
}

fn name_list_schema() -> MessageSchema {
    MessageSchema::new(
        "name_list",
        vec![BlockSchema::new(
            "names",
            BlockRepetition::Variable,
            vec![FieldSchema::new("name", FieldType::var_bytes(255))],
        )],
    )
}

#[test]
fn variable_var_bytes_scenario_is_264_bytes() {
    let schema = name_list_schema();
    let codec = MessageCodec::new(&schema);
    let values = MessageValue::from_blocks(vec![BlockValue::from_instances(vec![
        vec![FieldValue::Bytes(Vec::new())],
        vec![FieldValue::Bytes(b"abcde".to_vec())],
        vec![FieldValue::Bytes(vec![0x7f; 255])],
    ])]);

    // 1 (count) + (1+0) + (1+5) + (1+255)
    assert_eq!(codec.body_len(&values), 264);
    let bytes = codec.encode(&values, &()).unwrap();
    assert_eq!(bytes.len(), 264);

    let ((), decoded) = codec.decode(&bytes).unwrap();
    assert_eq!(decoded, values);
}

#[test]
fn header_composes_with_body() {
    let schema = schema_table().get(MessageId::SESSION_HANDSHAKE).unwrap();
    let codec = MessageCodec::new(schema);
    let header = TestHeader {
        sequence: 42,
        message_id: MessageId::SESSION_HANDSHAKE.0,
    };
    let values = MessageValue::from_blocks(vec![BlockValue::single(vec![
        FieldValue::Id(WorldId::from_bytes([0xaa; 16])),
        FieldValue::Id(WorldId::from_bytes([0xbb; 16])),
    ])]);

    let bytes = codec.encode(&values, &header).unwrap();
    // Body is 32 bytes regardless of header.
    assert_eq!(bytes.len(), header.length() + 32);

    let (parsed, decoded) = codec.decode::<TestHeader>(&bytes).unwrap();
    assert_eq!(parsed, header);
    assert_eq!(decoded, values);
}

#[test]
fn child_region_update_round_trips_doubles() {
    let schema = schema_table().get(MessageId::CHILD_REGION_UPDATE).unwrap();
    let codec = MessageCodec::new(schema);
    let values = MessageValue::from_blocks(vec![BlockValue::single(vec![
        FieldValue::Id(WorldId::from_bytes([1; 16])),
        FieldValue::Vec3d(Vec3d::new(256_512.75, 255_744.5, 23.125)),
        FieldValue::Vec3(elysium_core::Vec3::new(-1.5, 0.0, 4.25)),
        FieldValue::Bool(false),
    ])]);

    let bytes = codec.encode(&values, &()).unwrap();
    // 16 + 24 + 12 + 1
    assert_eq!(bytes.len(), 53);
    let ((), decoded) = codec.decode(&bytes).unwrap();
    assert_eq!(decoded, values);
}

#[test]
fn rotation_survives_wire_form_round_trip() {
    let schema = schema_table().get(MessageId::AGENT_UPDATE).unwrap();
    let codec = MessageCodec::new(schema);

    // Producers normalize to the non-negative-w representative first.
    let body = Quaternion::new(0.1, -0.2, 0.3, -2.0).normalized_wire_form();
    let values = MessageValue::from_blocks(vec![BlockValue::single(vec![
        FieldValue::Id(WorldId::NIL),
        FieldValue::Id(WorldId::NIL),
        FieldValue::Rotation(body),
        FieldValue::Rotation(Quaternion::IDENTITY),
        FieldValue::U8(4),
        FieldValue::Vec3(elysium_core::Vec3::new(128.0, 128.0, 30.0)),
        FieldValue::Vec3(elysium_core::Vec3::new(0.0, 1.0, 0.0)),
        FieldValue::F32(256.0),
        FieldValue::U32(0x0010),
        FieldValue::U8(0),
    ])]);

    let bytes = codec.encode(&values, &()).unwrap();
    let ((), decoded) = codec.decode(&bytes).unwrap();

    let FieldValue::Rotation(q) = &decoded.blocks()[0].instances()[0][2] else {
        panic!("expected rotation field");
    };
    assert!((q.x - body.x).abs() < 1e-6);
    assert!((q.y - body.y).abs() < 1e-6);
    assert!((q.z - body.z).abs() < 1e-6);
    assert!((q.w - body.w).abs() < 1e-6);
}

#[test]
fn fixed_block_message_round_trips() {
    let schema = schema_table().get(MessageId::NEIGHBOR_LIST).unwrap();
    let codec = MessageCodec::new(schema);
    let neighbor = |i: u32| {
        vec![
            FieldValue::U32(0x0a00_0000 + i),
            FieldValue::U16(9000 + u16::try_from(i).unwrap()),
            FieldValue::U64(u64::from(i) << 32),
        ]
    };
    let values =
        MessageValue::from_blocks(vec![BlockValue::from_instances((0..4).map(neighbor).collect())]);

    let bytes = codec.encode(&values, &()).unwrap();
    // Four instances of (4 + 2 + 8) bytes, no count prefix.
    assert_eq!(bytes.len(), 56);
    let ((), decoded) = codec.decode(&bytes).unwrap();
    assert_eq!(decoded, values);

    // A fifth neighbor is a schema violation, not a longer message.
    let mut too_many = values.clone();
    too_many.blocks_mut()[0].push_instance(neighbor(4));
    assert!(matches!(
        codec.encode(&too_many, &()),
        Err(CodecError::SchemaMismatch { .. })
    ));
}

#[test]
fn loaded_schemas_drive_the_same_codec() {
    let doc = r#"
        [[message]]
        id = 100
        name = "presence_note"

        [[message.block]]
        name = "note"
        repetition = "variable"

        [[message.block.field]]
        name = "agent_id"
        type = "id128"

        [[message.block.field]]
        name = "text"
        type = "var_bytes"
        max_len = 300
    "#;
    let table = SchemaTable::from_toml(doc).unwrap();
    let schema = table.get(MessageId(100)).unwrap();
    let codec = MessageCodec::new(schema);

    let values = MessageValue::from_blocks(vec![BlockValue::single(vec![
        FieldValue::Id(WorldId::from_bytes([3; 16])),
        FieldValue::Bytes(vec![b'x'; 300]),
    ])]);
    // max_len 300 implies a two-byte prefix.
    let bytes = codec.encode(&values, &()).unwrap();
    assert_eq!(bytes.len(), 1 + 16 + 2 + 300);

    let ((), decoded) = codec.decode(&bytes).unwrap();
    assert_eq!(decoded, values);
}

#[test]
fn diagnostic_rendering_of_decoded_message() {
    let schema = schema_table().get(MessageId::CHAT_FROM_VIEWER).unwrap();
    let codec = MessageCodec::new(schema);
    let values = MessageValue::from_blocks(vec![
        BlockValue::single(vec![
            FieldValue::Id(WorldId::from_bytes([0x01; 16])),
            FieldValue::Id(WorldId::from_bytes([0x02; 16])),
        ]),
        BlockValue::single(vec![
            FieldValue::Bytes(b"hello, elysium".to_vec()),
            FieldValue::U8(1),
            FieldValue::I32(0),
        ]),
    ]);

    let bytes = codec.encode(&values, &()).unwrap();
    let ((), decoded) = codec.decode(&bytes).unwrap();
    let rendered = decoded.display(schema).to_string();
    assert!(rendered.contains("message chat_from_viewer"));
    assert!(rendered.contains("agent_data[0]"));
    assert!(rendered.contains("message: 14 bytes"));
    assert!(rendered.contains("channel: 0"));
}
