//! Bounds-checked little-endian reader over a byte range.
//!
//! Every structure inside an ACS container is addressed by absolute
//! `(offset, size)` locators, so parsing walks sub-ranges of one shared blob.
//! [`ByteReader`] wraps such a range with a cursor; every read fails cleanly
//! instead of slicing past the range end.

use crate::file::AcsError;

/// Cursor over a `(blob, start, end)` byte range.
///
/// All multi-byte reads are little-endian. The cursor never moves past `end`;
/// a read that would do so fails with [`AcsError::UnexpectedEndOfData`] and
/// leaves the cursor untouched.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
	blob: &'a [u8],
	start: usize,
	end: usize,
	offset: usize,
}

impl<'a> ByteReader<'a> {
	/// Creates a reader over the entire blob.
	pub fn new(blob: &'a [u8]) -> Self {
		Self {
			blob,
			start: 0,
			end: blob.len(),
			offset: 0,
		}
	}

	/// Creates a reader over `[offset, offset + length)` of the same blob.
	///
	/// # Errors
	///
	/// Returns [`AcsError::InvalidRange`] when the range does not fit inside
	/// the blob.
	pub fn sub_reader(&self, offset: usize, length: usize) -> Result<ByteReader<'a>, AcsError> {
		let end = offset.checked_add(length).filter(|&end| end <= self.blob.len()).ok_or(
			AcsError::InvalidRange {
				offset,
				length,
			},
		)?;
		Ok(ByteReader {
			blob: self.blob,
			start: offset,
			end,
			offset,
		})
	}

	/// Bytes left between the cursor and the range end.
	pub fn remaining(&self) -> usize {
		self.end - self.offset
	}

	/// Cursor position relative to the range start.
	pub fn position(&self) -> usize {
		self.offset - self.start
	}

	fn take(&mut self, count: usize) -> Result<&'a [u8], AcsError> {
		if self.remaining() < count {
			return Err(AcsError::UnexpectedEndOfData {
				requested: count,
				offset: self.position(),
			});
		}
		let bytes = &self.blob[self.offset..self.offset + count];
		self.offset += count;
		Ok(bytes)
	}

	/// Reads an unsigned byte.
	pub fn read_u8(&mut self) -> Result<u8, AcsError> {
		Ok(self.take(1)?[0])
	}

	/// Reads an unsigned 16-bit little-endian integer.
	pub fn read_u16(&mut self) -> Result<u16, AcsError> {
		let bytes = self.take(2)?;
		Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
	}

	/// Reads a signed 16-bit little-endian integer.
	pub fn read_i16(&mut self) -> Result<i16, AcsError> {
		let bytes = self.take(2)?;
		Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
	}

	/// Reads an unsigned 32-bit little-endian integer.
	pub fn read_u32(&mut self) -> Result<u32, AcsError> {
		let bytes = self.take(4)?;
		Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
	}

	/// Reads `count` raw bytes.
	pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], AcsError> {
		self.take(count)
	}

	/// Reads a UTF-16LE string of `units` code units. No terminator is consumed.
	pub fn read_utf16(&mut self, units: usize) -> Result<String, AcsError> {
		let bytes = self.take(units * 2)?;
		let code_units: Vec<u16> =
			bytes.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect();
		String::from_utf16(&code_units).map_err(|_| AcsError::InvalidUtf16)
	}

	/// Advances the cursor by `count` bytes without reading them.
	pub fn skip(&mut self, count: usize) -> Result<(), AcsError> {
		self.take(count).map(|_| ())
	}
}
