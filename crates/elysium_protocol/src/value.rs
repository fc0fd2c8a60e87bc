//! # Runtime Message Values
//!
//! The in-memory form of a message body: per schema block, a list of
//! instances; per instance, field values in schema order.
//!
//! Values are validated against their schema in one pass before any bytes
//! are written, so the encoder never leaves a partial buffer behind and the
//! diagnostic renderer never has to handle failure.

use crate::error::{CodecError, CodecResult};
use crate::schema::{BlockRepetition, FieldSchema, FieldType, MessageSchema};
use crate::MAX_VARIABLE_INSTANCES;
use elysium_core::{Quaternion, Vec3, Vec3d, WorldId};
use std::fmt;

/// A single field value.
///
/// Variants mirror [`FieldType`]; a variable field that is absent encodes
/// identically to one that is present but empty, so both are the empty
/// `Bytes` value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// Signed 8-bit integer.
    I8(i8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Signed 64-bit integer.
    I64(i64),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// Boolean.
    Bool(bool),
    /// 16-byte identifier.
    Id(WorldId),
    /// Single-precision vector.
    Vec3(Vec3),
    /// Double-precision vector.
    Vec3d(Vec3d),
    /// Rotation; only (x, y, z) cross the wire.
    Rotation(Quaternion),
    /// Length-prefixed byte data.
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Human-readable variant name, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Bool(_) => "bool",
            Self::Id(_) => "id128",
            Self::Vec3(_) => "vec3",
            Self::Vec3d(_) => "vec3d",
            Self::Rotation(_) => "rotation",
            Self::Bytes(_) => "var_bytes",
        }
    }

    /// Returns true if this variant matches the given schema type.
    #[must_use]
    pub const fn matches(&self, ty: &FieldType) -> bool {
        matches!(
            (self, ty),
            (Self::U8(_), FieldType::U8)
                | (Self::U16(_), FieldType::U16)
                | (Self::U32(_), FieldType::U32)
                | (Self::U64(_), FieldType::U64)
                | (Self::I8(_), FieldType::I8)
                | (Self::I16(_), FieldType::I16)
                | (Self::I32(_), FieldType::I32)
                | (Self::I64(_), FieldType::I64)
                | (Self::F32(_), FieldType::F32)
                | (Self::F64(_), FieldType::F64)
                | (Self::Bool(_), FieldType::Bool)
                | (Self::Id(_), FieldType::Id128)
                | (Self::Vec3(_), FieldType::Vec3)
                | (Self::Vec3d(_), FieldType::Vec3d)
                | (Self::Rotation(_), FieldType::CompactRotation)
                | (Self::Bytes(_), FieldType::VarBytes { .. })
        )
    }

    /// The zero value for a schema type, for building instances field by
    /// field.
    #[must_use]
    pub fn default_for(ty: &FieldType) -> Self {
        match ty {
            FieldType::U8 => Self::U8(0),
            FieldType::U16 => Self::U16(0),
            FieldType::U32 => Self::U32(0),
            FieldType::U64 => Self::U64(0),
            FieldType::I8 => Self::I8(0),
            FieldType::I16 => Self::I16(0),
            FieldType::I32 => Self::I32(0),
            FieldType::I64 => Self::I64(0),
            FieldType::F32 => Self::F32(0.0),
            FieldType::F64 => Self::F64(0.0),
            FieldType::Bool => Self::Bool(false),
            FieldType::Id128 => Self::Id(WorldId::NIL),
            FieldType::Vec3 => Self::Vec3(Vec3::ZERO),
            FieldType::Vec3d => Self::Vec3d(Vec3d::ZERO),
            FieldType::CompactRotation => Self::Rotation(Quaternion::IDENTITY),
            FieldType::VarBytes { .. } => Self::Bytes(Vec::new()),
        }
    }

    /// Builds a checked variable-field value.
    ///
    /// # Errors
    ///
    /// [`CodecError::Overflow`] if `data` exceeds the field's declared
    /// maximum, [`CodecError::TypeMismatch`] if the field is not a
    /// variable-length field. Nothing is stored on failure.
    pub fn bytes_for(field: &FieldSchema, data: impl Into<Vec<u8>>) -> CodecResult<Self> {
        let data = data.into();
        match field.ty {
            FieldType::VarBytes { max_len, .. } => {
                if data.len() > max_len {
                    return Err(CodecError::Overflow {
                        field: field.name.clone(),
                        max_len,
                        actual_len: data.len(),
                    });
                }
                Ok(Self::Bytes(data))
            }
            _ => Err(CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: field.ty.name(),
                actual: "var_bytes",
            }),
        }
    }
}

/// All instances of one block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockValue {
    instances: Vec<Vec<FieldValue>>,
}

impl BlockValue {
    /// Creates a block value with no instances (a legal state only for
    /// count-prefixed blocks).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    /// Creates a block value with exactly one instance.
    #[must_use]
    pub fn single(fields: Vec<FieldValue>) -> Self {
        Self {
            instances: vec![fields],
        }
    }

    /// Creates a block value from an instance list.
    #[must_use]
    pub fn from_instances(instances: Vec<Vec<FieldValue>>) -> Self {
        Self { instances }
    }

    /// Appends an instance.
    pub fn push_instance(&mut self, fields: Vec<FieldValue>) {
        self.instances.push(fields);
    }

    /// Returns the instances in wire order.
    #[must_use]
    pub fn instances(&self) -> &[Vec<FieldValue>] {
        &self.instances
    }

    /// Returns the number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if the block has no instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// The runtime instance of a whole message body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageValue {
    blocks: Vec<BlockValue>,
}

impl MessageValue {
    /// Creates a message value from block values in schema order.
    #[must_use]
    pub fn from_blocks(blocks: Vec<BlockValue>) -> Self {
        Self { blocks }
    }

    /// Returns the block values in schema order.
    #[must_use]
    pub fn blocks(&self) -> &[BlockValue] {
        &self.blocks
    }

    /// Returns the block values mutably.
    pub fn blocks_mut(&mut self) -> &mut [BlockValue] {
        &mut self.blocks
    }

    /// Returns one block value by schema position.
    #[must_use]
    pub fn block(&self, index: usize) -> Option<&BlockValue> {
        self.blocks.get(index)
    }

    /// Checks this value against a schema: block count, per-block instance
    /// counts, per-instance field counts, field types, and variable-field
    /// maxima.
    ///
    /// Encode runs this before writing anything, so failures never leave a
    /// partial buffer.
    ///
    /// # Errors
    ///
    /// [`CodecError::SchemaMismatch`], [`CodecError::TypeMismatch`], or
    /// [`CodecError::Overflow`], naming the first offending block or field.
    pub fn validate(&self, schema: &MessageSchema) -> CodecResult<()> {
        if self.blocks.len() != schema.blocks.len() {
            return Err(CodecError::SchemaMismatch {
                block: schema.name.clone(),
                expected: schema.blocks.len(),
                actual: self.blocks.len(),
            });
        }

        for (block_schema, block_value) in schema.blocks.iter().zip(&self.blocks) {
            let count = block_value.len();
            match block_schema.repetition {
                BlockRepetition::Single => {
                    if count != 1 {
                        return Err(CodecError::SchemaMismatch {
                            block: block_schema.name.clone(),
                            expected: 1,
                            actual: count,
                        });
                    }
                }
                BlockRepetition::Fixed(n) => {
                    if count != n {
                        return Err(CodecError::SchemaMismatch {
                            block: block_schema.name.clone(),
                            expected: n,
                            actual: count,
                        });
                    }
                }
                BlockRepetition::Variable => {
                    if count > MAX_VARIABLE_INSTANCES {
                        return Err(CodecError::SchemaMismatch {
                            block: block_schema.name.clone(),
                            expected: MAX_VARIABLE_INSTANCES,
                            actual: count,
                        });
                    }
                }
            }

            for instance in block_value.instances() {
                if instance.len() != block_schema.fields.len() {
                    return Err(CodecError::SchemaMismatch {
                        block: block_schema.name.clone(),
                        expected: block_schema.fields.len(),
                        actual: instance.len(),
                    });
                }
                for (field_schema, value) in block_schema.fields.iter().zip(instance) {
                    if !value.matches(&field_schema.ty) {
                        return Err(CodecError::TypeMismatch {
                            field: field_schema.name.clone(),
                            expected: field_schema.ty.name(),
                            actual: value.type_name(),
                        });
                    }
                    if let (FieldType::VarBytes { max_len, .. }, FieldValue::Bytes(data)) =
                        (&field_schema.ty, value)
                    {
                        if data.len() > *max_len {
                            return Err(CodecError::Overflow {
                                field: field_schema.name.clone(),
                                max_len: *max_len,
                                actual_len: data.len(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns a total, fail-free rendering of this value against a schema.
    ///
    /// Values that have passed [`MessageValue::validate`] render fully;
    /// mismatched shapes render with placeholders rather than failing.
    #[must_use]
    pub fn display<'a>(&'a self, schema: &'a MessageSchema) -> MessageDisplay<'a> {
        MessageDisplay {
            schema,
            value: self,
        }
    }
}

/// Display adapter for a message value, produced by
/// [`MessageValue::display`].
pub struct MessageDisplay<'a> {
    schema: &'a MessageSchema,
    value: &'a MessageValue,
}

impl fmt::Display for MessageDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "message {}", self.schema.name)?;
        for (i, block_value) in self.value.blocks().iter().enumerate() {
            let block_schema = self.schema.blocks.get(i);
            let block_name = block_schema.map_or("<extra>", |b| b.name.as_str());
            for (n, instance) in block_value.instances().iter().enumerate() {
                writeln!(f, "  {block_name}[{n}]")?;
                for (j, value) in instance.iter().enumerate() {
                    let field_name = block_schema
                        .and_then(|b| b.fields.get(j))
                        .map_or("<extra>", |field| field.name.as_str());
                    writeln!(f, "    {field_name}: {}", RenderField(value))?;
                }
            }
        }
        Ok(())
    }
}

struct RenderField<'a>(&'a FieldValue);

impl fmt::Display for RenderField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            FieldValue::U8(v) => write!(f, "{v}"),
            FieldValue::U16(v) => write!(f, "{v}"),
            FieldValue::U32(v) => write!(f, "{v}"),
            FieldValue::U64(v) => write!(f, "{v}"),
            FieldValue::I8(v) => write!(f, "{v}"),
            FieldValue::I16(v) => write!(f, "{v}"),
            FieldValue::I32(v) => write!(f, "{v}"),
            FieldValue::I64(v) => write!(f, "{v}"),
            FieldValue::F32(v) => write!(f, "{v}"),
            FieldValue::F64(v) => write!(f, "{v}"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Id(v) => write!(f, "{v}"),
            FieldValue::Vec3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            FieldValue::Vec3d(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            FieldValue::Rotation(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            FieldValue::Bytes(data) => write!(f, "{} bytes", data.len()),
        }
    }
}
