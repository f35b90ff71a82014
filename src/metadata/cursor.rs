use crate::error::{GeotagError, GeotagResult};
use crate::reader::{EndianAwareReader, Endianness};

/// A position within a byte buffer that refuses to read past its end.
///
/// Every read is checked against the buffer length up front, so a declared length or offset that
/// runs off the end becomes [`GeotagError::TruncatedData`] instead of a short read.
pub(crate) struct MetadataCursor<'a> {
    data: &'a [u8],
    offset: usize,
    endianness: Endianness,
}

impl<'a> MetadataCursor<'a> {
    pub fn new(data: &'a [u8], endianness: Endianness) -> Self {
        Self {
            data,
            offset: 0,
            endianness,
        }
    }

    pub fn new_with_offset(data: &'a [u8], endianness: Endianness, offset: usize) -> Self {
        Self {
            data,
            offset,
            endianness,
        }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` once the cursor has reached or passed the end of the buffer.
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Check that `length` bytes are available at the current position without reading them.
    pub(crate) fn ensure(&self, length: usize) -> GeotagResult<()> {
        match self.offset.checked_add(length) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(GeotagError::truncated(
                self.offset,
                length,
                self.data.len(),
            )),
        }
    }

    /// Read the given number of bytes, advancing the internal cursor state by the same amount.
    pub(crate) fn read(&mut self, length: usize) -> GeotagResult<EndianAwareReader<'a>> {
        self.ensure(length)?;
        let bytes = &self.data[self.offset..self.offset + length];
        self.offset += length;
        Ok(EndianAwareReader::new(bytes, self.endianness))
    }

    /// Read the given number of bytes as a raw slice.
    pub(crate) fn read_slice(&mut self, length: usize) -> GeotagResult<&'a [u8]> {
        self.ensure(length)?;
        let bytes = &self.data[self.offset..self.offset + length];
        self.offset += length;
        Ok(bytes)
    }

    /// Read a u8 from the cursor, advancing the internal state by 1 byte.
    pub(crate) fn read_u8(&mut self) -> GeotagResult<u8> {
        self.read(1)?.read_u8()
    }

    /// Read a u16 from the cursor, advancing the internal state by 2 bytes.
    pub(crate) fn read_u16(&mut self) -> GeotagResult<u16> {
        self.read(2)?.read_u16()
    }

    /// Read a u32 from the cursor, advancing the internal state by 4 bytes.
    pub(crate) fn read_u32(&mut self) -> GeotagResult<u32> {
        self.read(4)?.read_u32()
    }
}
