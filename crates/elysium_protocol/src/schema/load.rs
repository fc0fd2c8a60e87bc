//! # Schema Document Loader
//!
//! Deployments describe their message catalog in a declarative TOML
//! document, parsed once at startup into the same owned schema values the
//! builtin table uses:
//!
//! ```toml
//! [[message]]
//! id = 3
//! name = "chat_from_viewer"
//!
//! [[message.block]]
//! name = "chat_data"
//! repetition = "single"
//!
//! [[message.block.field]]
//! name = "message"
//! type = "var_bytes"
//! max_len = 1024
//! ```

use super::table::{MessageId, SchemaTable};
use super::{BlockRepetition, BlockSchema, Endian, FieldSchema, FieldType, MessageSchema};
use crate::MAX_VAR_FIELD_LEN;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while loading a schema document.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The document is not valid TOML of the expected shape.
    #[error("failed to parse schema document: {0}")]
    Parse(#[from] toml::de::Error),

    /// A message definition violates a schema rule.
    #[error("message `{message}`: {reason}")]
    Invalid {
        /// Name (or id, if unnamed) of the offending message.
        message: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Two messages declare the same id.
    #[error("duplicate message id {0}")]
    DuplicateId(u32),
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    message: Vec<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    id: u32,
    name: String,
    #[serde(default)]
    block: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    name: String,
    repetition: String,
    count: Option<usize>,
    #[serde(default)]
    field: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    max_len: Option<usize>,
    endian: Option<String>,
}

impl SchemaTable {
    /// Parses a TOML schema document into a table.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError`] on malformed TOML, duplicate ids, or
    /// definitions that violate schema rules (zero fixed counts, variable
    /// maxima outside `1..=65535`, unknown types).
    pub fn from_toml(doc: &str) -> Result<Self, SchemaLoadError> {
        let raw: RawDocument = toml::from_str(doc)?;

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(raw.message.len());
        for message in raw.message {
            if !seen.insert(message.id) {
                return Err(SchemaLoadError::DuplicateId(message.id));
            }
            let schema = convert_message(&message)?;
            entries.push((MessageId(message.id), schema));
        }

        let table = Self::from_entries(entries);
        tracing::info!("loaded {} message schemas from document", table.len());
        Ok(table)
    }
}

fn invalid(message: &RawMessage, reason: impl Into<String>) -> SchemaLoadError {
    SchemaLoadError::Invalid {
        message: message.name.clone(),
        reason: reason.into(),
    }
}

fn convert_message(message: &RawMessage) -> Result<MessageSchema, SchemaLoadError> {
    if message.name.is_empty() {
        return Err(SchemaLoadError::Invalid {
            message: message.id.to_string(),
            reason: "empty message name".to_owned(),
        });
    }
    let blocks = message
        .block
        .iter()
        .map(|block| convert_block(message, block))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MessageSchema::new(message.name.clone(), blocks))
}

fn convert_block(message: &RawMessage, block: &RawBlock) -> Result<BlockSchema, SchemaLoadError> {
    if block.name.is_empty() {
        return Err(invalid(message, "empty block name"));
    }
    if block.field.is_empty() {
        return Err(invalid(message, format!("block `{}` has no fields", block.name)));
    }

    let repetition = match block.repetition.as_str() {
        "single" => {
            if block.count.is_some() {
                return Err(invalid(
                    message,
                    format!("block `{}`: count only applies to fixed blocks", block.name),
                ));
            }
            BlockRepetition::Single
        }
        "variable" => {
            if block.count.is_some() {
                return Err(invalid(
                    message,
                    format!("block `{}`: count only applies to fixed blocks", block.name),
                ));
            }
            BlockRepetition::Variable
        }
        "fixed" => match block.count {
            Some(count) if count >= 1 => BlockRepetition::Fixed(count),
            Some(_) => {
                return Err(invalid(
                    message,
                    format!("block `{}`: fixed count must be at least 1", block.name),
                ))
            }
            None => {
                return Err(invalid(
                    message,
                    format!("block `{}`: fixed blocks require a count", block.name),
                ))
            }
        },
        other => {
            return Err(invalid(
                message,
                format!("block `{}`: unknown repetition `{other}`", block.name),
            ))
        }
    };

    let fields = block
        .field
        .iter()
        .map(|field| convert_field(message, block, field))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BlockSchema::new(block.name.clone(), repetition, fields))
}

fn convert_field(
    message: &RawMessage,
    block: &RawBlock,
    field: &RawField,
) -> Result<FieldSchema, SchemaLoadError> {
    if field.name.is_empty() {
        return Err(invalid(
            message,
            format!("block `{}` has a field with an empty name", block.name),
        ));
    }

    let ty = match field.ty.as_str() {
        "u8" => FieldType::U8,
        "u16" => FieldType::U16,
        "u32" => FieldType::U32,
        "u64" => FieldType::U64,
        "i8" => FieldType::I8,
        "i16" => FieldType::I16,
        "i32" => FieldType::I32,
        "i64" => FieldType::I64,
        "f32" => FieldType::F32,
        "f64" => FieldType::F64,
        "bool" => FieldType::Bool,
        "id128" => FieldType::Id128,
        "vec3" => FieldType::Vec3,
        "vec3d" => FieldType::Vec3d,
        "rotation" => FieldType::CompactRotation,
        "var_bytes" => match field.max_len {
            Some(max_len) if (1..=MAX_VAR_FIELD_LEN).contains(&max_len) => {
                FieldType::var_bytes(max_len)
            }
            Some(max_len) => {
                return Err(invalid(
                    message,
                    format!(
                        "field `{}`: max_len {max_len} outside 1..={MAX_VAR_FIELD_LEN}",
                        field.name
                    ),
                ))
            }
            None => {
                return Err(invalid(
                    message,
                    format!("field `{}`: var_bytes requires max_len", field.name),
                ))
            }
        },
        other => {
            return Err(invalid(
                message,
                format!("field `{}`: unknown type `{other}`", field.name),
            ))
        }
    };

    if field.max_len.is_some() && !matches!(ty, FieldType::VarBytes { .. }) {
        return Err(invalid(
            message,
            format!("field `{}`: max_len only applies to var_bytes", field.name),
        ));
    }

    let endian = match field.endian.as_deref() {
        None | Some("little") => Endian::Little,
        Some("big") => Endian::Big,
        Some(other) => {
            return Err(invalid(
                message,
                format!("field `{}`: unknown endian `{other}`", field.name),
            ))
        }
    };

    Ok(FieldSchema::with_endian(field.name.clone(), ty, endian))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REDIRECT_DOC: &str = r#"
        [[message]]
        id = 6
        name = "region_redirect"

        [[message.block]]
        name = "region_info"
        repetition = "single"

        [[message.block.field]]
        name = "address"
        type = "u32"

        [[message.block.field]]
        name = "port"
        type = "u16"
        endian = "big"

        [[message.block.field]]
        name = "region_handle"
        type = "u64"
    "#;

    #[test]
    fn test_loaded_schema_matches_builtin() {
        let table = SchemaTable::from_toml(REDIRECT_DOC).unwrap();
        assert_eq!(table.len(), 1);

        let loaded = table.get(MessageId::REGION_REDIRECT).unwrap();
        let builtin = SchemaTable::builtin();
        assert_eq!(loaded, builtin.get(MessageId::REGION_REDIRECT).unwrap());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let doc = r#"
            [[message]]
            id = 1
            name = "a"

            [[message]]
            id = 1
            name = "b"
        "#;
        assert!(matches!(
            SchemaTable::from_toml(doc),
            Err(SchemaLoadError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_zero_fixed_count_rejected() {
        let doc = r#"
            [[message]]
            id = 8
            name = "neighbor_list"

            [[message.block]]
            name = "neighbor"
            repetition = "fixed"
            count = 0

            [[message.block.field]]
            name = "address"
            type = "u32"
        "#;
        assert!(matches!(
            SchemaTable::from_toml(doc),
            Err(SchemaLoadError::Invalid { .. })
        ));
    }

    #[test]
    fn test_var_bytes_requires_max_len() {
        let doc = r#"
            [[message]]
            id = 3
            name = "chat"

            [[message.block]]
            name = "chat_data"
            repetition = "single"

            [[message.block.field]]
            name = "message"
            type = "var_bytes"
        "#;
        assert!(matches!(
            SchemaTable::from_toml(doc),
            Err(SchemaLoadError::Invalid { .. })
        ));
    }

    #[test]
    fn test_oversized_max_len_rejected() {
        let doc = r#"
            [[message]]
            id = 5
            name = "transfer_packet"

            [[message.block]]
            name = "transfer_data"
            repetition = "single"

            [[message.block.field]]
            name = "payload"
            type = "var_bytes"
            max_len = 70000
        "#;
        assert!(matches!(
            SchemaTable::from_toml(doc),
            Err(SchemaLoadError::Invalid { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_surfaces_parse_error() {
        assert!(matches!(
            SchemaTable::from_toml("[[message"),
            Err(SchemaLoadError::Parse(_))
        ));
    }
}
