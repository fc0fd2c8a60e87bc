//! # Fixed-Width Field Codecs
//!
//! Encode/decode for every fixed-size field type. Each function consumes or
//! produces exactly the type's wire width.
//!
//! Signed integers cross the wire bit-for-bit as their unsigned
//! counterparts; the conversions below are byte-preserving, never numeric.

use crate::error::{CodecError, CodecResult};
use crate::schema::{FieldSchema, FieldType};
use crate::value::FieldValue;
use crate::wire::{WireReader, WireWriter};
use elysium_core::{Quaternion, Vec3, Vec3d, WorldId};

/// Encodes a fixed-width value at the writer's current position.
pub(crate) fn encode(
    field: &FieldSchema,
    value: &FieldValue,
    writer: &mut WireWriter,
) -> CodecResult<()> {
    let endian = field.endian;
    match (&field.ty, value) {
        (FieldType::U8, FieldValue::U8(v)) => writer.write_u8(*v),
        (FieldType::U16, FieldValue::U16(v)) => writer.write_u16(*v, endian),
        (FieldType::U32, FieldValue::U32(v)) => writer.write_u32(*v, endian),
        (FieldType::U64, FieldValue::U64(v)) => writer.write_u64(*v, endian),
        (FieldType::I8, FieldValue::I8(v)) => writer.write_u8(u8::from_le_bytes(v.to_le_bytes())),
        (FieldType::I16, FieldValue::I16(v)) => {
            writer.write_u16(u16::from_le_bytes(v.to_le_bytes()), endian);
        }
        (FieldType::I32, FieldValue::I32(v)) => {
            writer.write_u32(u32::from_le_bytes(v.to_le_bytes()), endian);
        }
        (FieldType::I64, FieldValue::I64(v)) => {
            writer.write_u64(u64::from_le_bytes(v.to_le_bytes()), endian);
        }
        (FieldType::F32, FieldValue::F32(v)) => writer.write_f32(*v, endian),
        (FieldType::F64, FieldValue::F64(v)) => writer.write_f64(*v, endian),
        (FieldType::Bool, FieldValue::Bool(v)) => writer.write_u8(u8::from(*v)),
        (FieldType::Id128, FieldValue::Id(v)) => writer.write_pod(v),
        (FieldType::Vec3, FieldValue::Vec3(v)) => {
            writer.write_f32(v.x, endian);
            writer.write_f32(v.y, endian);
            writer.write_f32(v.z, endian);
        }
        (FieldType::Vec3d, FieldValue::Vec3d(v)) => {
            writer.write_f64(v.x, endian);
            writer.write_f64(v.y, endian);
            writer.write_f64(v.z, endian);
        }
        // w is dropped; decode reconstructs it from the unit constraint.
        (FieldType::CompactRotation, FieldValue::Rotation(v)) => {
            writer.write_f32(v.x, endian);
            writer.write_f32(v.y, endian);
            writer.write_f32(v.z, endian);
        }
        (ty, other) => {
            return Err(CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: ty.name(),
                actual: other.type_name(),
            })
        }
    }
    Ok(())
}

/// Decodes a fixed-width value at the reader's current position.
pub(crate) fn decode(field: &FieldSchema, reader: &mut WireReader<'_>) -> CodecResult<FieldValue> {
    let endian = field.endian;
    Ok(match field.ty {
        FieldType::U8 => FieldValue::U8(reader.read_u8()?),
        FieldType::U16 => FieldValue::U16(reader.read_u16(endian)?),
        FieldType::U32 => FieldValue::U32(reader.read_u32(endian)?),
        FieldType::U64 => FieldValue::U64(reader.read_u64(endian)?),
        FieldType::I8 => FieldValue::I8(i8::from_le_bytes(reader.read_u8()?.to_le_bytes())),
        FieldType::I16 => {
            FieldValue::I16(i16::from_le_bytes(reader.read_u16(endian)?.to_le_bytes()))
        }
        FieldType::I32 => {
            FieldValue::I32(i32::from_le_bytes(reader.read_u32(endian)?.to_le_bytes()))
        }
        FieldType::I64 => {
            FieldValue::I64(i64::from_le_bytes(reader.read_u64(endian)?.to_le_bytes()))
        }
        FieldType::F32 => FieldValue::F32(reader.read_f32(endian)?),
        FieldType::F64 => FieldValue::F64(reader.read_f64(endian)?),
        FieldType::Bool => FieldValue::Bool(reader.read_u8()? != 0),
        FieldType::Id128 => FieldValue::Id(WorldId::from_bytes(reader.read_block16()?)),
        FieldType::Vec3 => FieldValue::Vec3(Vec3::new(
            reader.read_f32(endian)?,
            reader.read_f32(endian)?,
            reader.read_f32(endian)?,
        )),
        FieldType::Vec3d => FieldValue::Vec3d(Vec3d::new(
            reader.read_f64(endian)?,
            reader.read_f64(endian)?,
            reader.read_f64(endian)?,
        )),
        FieldType::CompactRotation => {
            let x = reader.read_f32(endian)?;
            let y = reader.read_f32(endian)?;
            let z = reader.read_f32(endian)?;
            FieldValue::Rotation(Quaternion::from_xyz(x, y, z))
        }
        FieldType::VarBytes { .. } => {
            return Err(CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: "a fixed-width type",
                actual: field.ty.name(),
            })
        }
    })
}
