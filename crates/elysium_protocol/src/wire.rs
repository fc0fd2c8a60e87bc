//! # Wire Buffer Abstraction
//!
//! Cursor-based writer and reader the codec runs over.
//!
//! ## Design
//!
//! - The writer appends into a `Vec` pre-sized to the exact message length
//! - Every reader access is bounds-checked and surfaces a typed error
//! - Scalars default to little-endian; big-endian is a per-call choice so
//!   schema overrides can reach it

use crate::error::{CodecError, CodecResult};
use crate::schema::Endian;
use bytemuck::Pod;

/// Appends encoded bytes to a growable buffer.
///
/// Callers size the buffer up front from the computed message length; the
/// writer itself never truncates or pads.
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Creates a writer pre-sized for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes written.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns a slice of the written data.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer, returning the encoded buffer.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Writes a u16 in the given byte order.
    #[inline]
    pub fn write_u16(&mut self, value: u16, endian: Endian) {
        match endian {
            Endian::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
            Endian::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    /// Writes a u32 in the given byte order.
    #[inline]
    pub fn write_u32(&mut self, value: u32, endian: Endian) {
        match endian {
            Endian::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
            Endian::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    /// Writes a u64 in the given byte order.
    #[inline]
    pub fn write_u64(&mut self, value: u64, endian: Endian) {
        match endian {
            Endian::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
            Endian::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    /// Writes an f32 in the given byte order.
    #[inline]
    pub fn write_f32(&mut self, value: f32, endian: Endian) {
        self.write_u32(value.to_bits(), endian);
    }

    /// Writes an f64 in the given byte order.
    #[inline]
    pub fn write_f64(&mut self, value: f64, endian: Endian) {
        self.write_u64(value.to_bits(), endian);
    }

    /// Writes a raw byte range.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a Pod value as its raw byte block.
    ///
    /// Only meaningful for types with no endianness, such as identifiers.
    #[inline]
    pub fn write_pod<T: Pod>(&mut self, value: &T) {
        self.buf.extend_from_slice(bytemuck::bytes_of(value));
    }
}

/// Reads encoded bytes from a borrowed buffer.
///
/// Every read is bounds-checked; underrun surfaces as
/// [`CodecError::Truncated`] and is fatal for the decode attempt.
pub struct WireReader<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a reader over a buffer.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, position: 0 }
    }

    /// Returns the number of bytes not yet consumed.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.position)
    }

    /// Returns the current cursor position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Takes the next `len` bytes, or reports how short the buffer is.
    fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(CodecError::Truncated {
                expected: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a u16 in the given byte order.
    #[inline]
    pub fn read_u16(&mut self, endian: Endian) -> CodecResult<u16> {
        let bytes = self.take(2)?;
        let arr = [bytes[0], bytes[1]];
        Ok(match endian {
            Endian::Little => u16::from_le_bytes(arr),
            Endian::Big => u16::from_be_bytes(arr),
        })
    }

    /// Reads a u32 in the given byte order.
    #[inline]
    pub fn read_u32(&mut self, endian: Endian) -> CodecResult<u32> {
        let bytes = self.take(4)?;
        let arr = [bytes[0], bytes[1], bytes[2], bytes[3]];
        Ok(match endian {
            Endian::Little => u32::from_le_bytes(arr),
            Endian::Big => u32::from_be_bytes(arr),
        })
    }

    /// Reads a u64 in the given byte order.
    #[inline]
    pub fn read_u64(&mut self, endian: Endian) -> CodecResult<u64> {
        let bytes = self.take(8)?;
        let arr = [
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ];
        Ok(match endian {
            Endian::Little => u64::from_le_bytes(arr),
            Endian::Big => u64::from_be_bytes(arr),
        })
    }

    /// Reads an f32 in the given byte order.
    #[inline]
    pub fn read_f32(&mut self, endian: Endian) -> CodecResult<f32> {
        Ok(f32::from_bits(self.read_u32(endian)?))
    }

    /// Reads an f64 in the given byte order.
    #[inline]
    pub fn read_f64(&mut self, endian: Endian) -> CodecResult<f64> {
        Ok(f64::from_bits(self.read_u64(endian)?))
    }

    /// Reads a raw byte range of length `len`.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        self.take(len)
    }

    /// Reads a 16-byte block.
    #[inline]
    pub fn read_block16(&mut self) -> CodecResult<[u8; 16]> {
        let slice = self.take(16)?;
        let mut block = [0u8; 16];
        block.copy_from_slice(slice);
        Ok(block)
    }
}
