//! # Schema Table
//!
//! The process-wide mapping from message kind to schema: populated once at
//! startup, immutable for the process lifetime, shared read-only by every
//! encode/decode call.
//!
//! The full catalog is deployment data; this module ships a representative
//! builtin set covering every field type, repetition policy, and wire quirk
//! the catalog uses.

use super::{BlockRepetition, BlockSchema, Endian, FieldSchema, FieldType, MessageSchema};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Numeric identifier of a message kind.
///
/// The id is transport data (the header carries it); the table only uses it
/// as a lookup key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub u32);

impl MessageId {
    /// Circuit opening handshake: agent and session identifiers.
    pub const SESSION_HANDSHAKE: Self = Self(1);
    /// Per-frame agent state: rotations, camera, control flags.
    pub const AGENT_UPDATE: Self = Self(2);
    /// Chat sent from a viewer.
    pub const CHAT_FROM_VIEWER: Self = Self(3);
    /// Object state broadcast from a region.
    pub const OBJECT_UPDATE: Self = Self(4);
    /// One chunk of an asset transfer.
    pub const TRANSFER_PACKET: Self = Self(5);
    /// Redirect to another region's address and port.
    pub const REGION_REDIRECT: Self = Self(6);
    /// Circuit liveness probe.
    pub const PING_CHECK: Self = Self(7);
    /// The four cardinal neighbor regions.
    pub const NEIGHBOR_LIST: Self = Self(8);
    /// Agent position relayed to an adjacent region.
    pub const CHILD_REGION_UPDATE: Self = Self(9);
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only message id to schema mapping.
pub struct SchemaTable {
    entries: HashMap<MessageId, MessageSchema>,
}

impl SchemaTable {
    /// Creates a table from an id/schema list.
    ///
    /// Later entries with a duplicate id replace earlier ones; loaders that
    /// must reject duplicates check before calling this.
    #[must_use]
    pub fn from_entries(entries: Vec<(MessageId, MessageSchema)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Looks up a schema by message id.
    #[must_use]
    pub fn get(&self, id: MessageId) -> Option<&MessageSchema> {
        self.entries.get(&id)
    }

    /// Returns the number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no schemas are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over registered id/schema pairs.
    pub fn iter(&self) -> impl Iterator<Item = (MessageId, &MessageSchema)> {
        self.entries.iter().map(|(id, schema)| (*id, schema))
    }

    /// Builds the builtin schema set.
    #[must_use]
    pub fn builtin() -> Self {
        let table = Self::from_entries(vec![
            (MessageId::SESSION_HANDSHAKE, session_handshake()),
            (MessageId::AGENT_UPDATE, agent_update()),
            (MessageId::CHAT_FROM_VIEWER, chat_from_viewer()),
            (MessageId::OBJECT_UPDATE, object_update()),
            (MessageId::TRANSFER_PACKET, transfer_packet()),
            (MessageId::REGION_REDIRECT, region_redirect()),
            (MessageId::PING_CHECK, ping_check()),
            (MessageId::NEIGHBOR_LIST, neighbor_list()),
            (MessageId::CHILD_REGION_UPDATE, child_region_update()),
        ]);
        tracing::info!("registered {} builtin message schemas", table.len());
        table
    }
}

/// Returns the process-wide schema table, building it on first use.
pub fn schema_table() -> &'static SchemaTable {
    static TABLE: OnceLock<SchemaTable> = OnceLock::new();
    TABLE.get_or_init(SchemaTable::builtin)
}

fn session_handshake() -> MessageSchema {
    MessageSchema::new(
        "session_handshake",
        vec![BlockSchema::new(
            "agent_data",
            BlockRepetition::Single,
            vec![
                FieldSchema::new("agent_id", FieldType::Id128),
                FieldSchema::new("session_id", FieldType::Id128),
            ],
        )],
    )
}

fn agent_update() -> MessageSchema {
    MessageSchema::new(
        "agent_update",
        vec![BlockSchema::new(
            "agent_data",
            BlockRepetition::Single,
            vec![
                FieldSchema::new("agent_id", FieldType::Id128),
                FieldSchema::new("session_id", FieldType::Id128),
                FieldSchema::new("body_rotation", FieldType::CompactRotation),
                FieldSchema::new("head_rotation", FieldType::CompactRotation),
                FieldSchema::new("state", FieldType::U8),
                FieldSchema::new("camera_center", FieldType::Vec3),
                FieldSchema::new("camera_at_axis", FieldType::Vec3),
                FieldSchema::new("draw_distance", FieldType::F32),
                FieldSchema::new("control_flags", FieldType::U32),
                FieldSchema::new("flags", FieldType::U8),
            ],
        )],
    )
}

fn chat_from_viewer() -> MessageSchema {
    MessageSchema::new(
        "chat_from_viewer",
        vec![
            BlockSchema::new(
                "agent_data",
                BlockRepetition::Single,
                vec![
                    FieldSchema::new("agent_id", FieldType::Id128),
                    FieldSchema::new("session_id", FieldType::Id128),
                ],
            ),
            BlockSchema::new(
                "chat_data",
                BlockRepetition::Single,
                vec![
                    FieldSchema::new("message", FieldType::var_bytes(1024)),
                    FieldSchema::new("chat_type", FieldType::U8),
                    FieldSchema::new("channel", FieldType::I32),
                ],
            ),
        ],
    )
}

fn object_update() -> MessageSchema {
    MessageSchema::new(
        "object_update",
        vec![
            BlockSchema::new(
                "region_data",
                BlockRepetition::Single,
                vec![
                    FieldSchema::new("region_handle", FieldType::U64),
                    FieldSchema::new("time_dilation", FieldType::U16),
                ],
            ),
            BlockSchema::new(
                "object_data",
                BlockRepetition::Variable,
                vec![
                    FieldSchema::new("local_id", FieldType::U32),
                    FieldSchema::new("material", FieldType::U8),
                    FieldSchema::new("position", FieldType::Vec3),
                    FieldSchema::new("velocity", FieldType::Vec3),
                    FieldSchema::new("rotation", FieldType::CompactRotation),
                    FieldSchema::new("extra_params", FieldType::var_bytes(255)),
                ],
            ),
        ],
    )
}

fn transfer_packet() -> MessageSchema {
    MessageSchema::new(
        "transfer_packet",
        vec![BlockSchema::new(
            "transfer_data",
            BlockRepetition::Single,
            vec![
                FieldSchema::new("transfer_id", FieldType::Id128),
                FieldSchema::new("channel_type", FieldType::I32),
                FieldSchema::new("packet_index", FieldType::I32),
                FieldSchema::new("status", FieldType::I32),
                FieldSchema::new("payload", FieldType::var_bytes(1024)),
            ],
        )],
    )
}

fn region_redirect() -> MessageSchema {
    MessageSchema::new(
        "region_redirect",
        vec![BlockSchema::new(
            "region_info",
            BlockRepetition::Single,
            vec![
                FieldSchema::new("address", FieldType::U32),
                // Ports travel in network byte order; everything else in the
                // message is little-endian.
                FieldSchema::with_endian("port", FieldType::U16, Endian::Big),
                FieldSchema::new("region_handle", FieldType::U64),
            ],
        )],
    )
}

fn ping_check() -> MessageSchema {
    MessageSchema::new(
        "ping_check",
        vec![BlockSchema::new(
            "ping_id",
            BlockRepetition::Single,
            vec![
                FieldSchema::new("ping_id", FieldType::U8),
                FieldSchema::new("oldest_unacked", FieldType::U32),
            ],
        )],
    )
}

fn neighbor_list() -> MessageSchema {
    MessageSchema::new(
        "neighbor_list",
        vec![BlockSchema::new(
            "neighbor",
            BlockRepetition::Fixed(4),
            vec![
                FieldSchema::new("address", FieldType::U32),
                FieldSchema::with_endian("port", FieldType::U16, Endian::Big),
                FieldSchema::new("region_handle", FieldType::U64),
            ],
        )],
    )
}

fn child_region_update() -> MessageSchema {
    MessageSchema::new(
        "child_region_update",
        vec![BlockSchema::new(
            "agent_position",
            BlockRepetition::Single,
            vec![
                FieldSchema::new("agent_id", FieldType::Id128),
                FieldSchema::new("global_position", FieldType::Vec3d),
                FieldSchema::new("velocity", FieldType::Vec3),
                FieldSchema::new("sitting", FieldType::Bool),
            ],
        )],
    )
}
