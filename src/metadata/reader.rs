use log::debug;

use crate::error::{GeotagError, GeotagResult};
use crate::metadata::MetadataCursor;
use crate::reader::Endianness;
use crate::tiff::tags::{Tag, Type};

/// The number of bytes that each IFD entry takes up.
const IFD_ENTRY_BYTE_SIZE: usize = 12;
/// The number of bytes of the entry count that starts each IFD.
const TAG_COUNT_BYTE_SIZE: usize = 2;

/// The TIFF header that opens an EXIF block.
///
/// All offsets inside the block, including the ones stored in tag entries, are relative to the
/// first byte of this header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifHeader {
    endianness: Endianness,
    first_ifd_offset: u32,
}

impl ExifHeader {
    /// Validate the byte order mark and magic number, and read the offset of the primary IFD.
    pub fn try_open(tiff: &[u8]) -> GeotagResult<Self> {
        let mut cursor = MetadataCursor::new(tiff, Endianness::BigEndian);
        let magic_bytes = cursor.read_slice(2)?;

        // Should be b"II" for little endian or b"MM" for big endian
        let endianness = if magic_bytes == b"II" {
            Endianness::LittleEndian
        } else if magic_bytes == b"MM" {
            Endianness::BigEndian
        } else {
            return Err(GeotagError::InvalidFormat(format!(
                "unexpected byte order mark {magic_bytes:?}"
            )));
        };

        let mut cursor = MetadataCursor::new_with_offset(tiff, endianness, 2);

        let version = cursor.read_u16()?;
        if version != 42 {
            return Err(GeotagError::InvalidFormat(format!(
                "unexpected TIFF version {version}"
            )));
        }

        let first_ifd_offset = cursor.read_u32()?;

        Ok(Self {
            endianness,
            first_ifd_offset,
        })
    }

    /// Returns the byte order used by every multi-byte value in the block.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// The byte offset of the primary IFD, relative to the TIFF header.
    pub fn first_ifd_offset(&self) -> u32 {
        self.first_ifd_offset
    }
}

/// A single 12-byte directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    /// Tag identifier.
    pub tag: u16,
    /// Raw field type, see [`Type`].
    pub field_type: u16,
    /// Number of values of `field_type`.
    pub count: u32,
    /// Either the value itself, left-aligned, or an offset to it.
    pub value: [u8; 4],
    endianness: Endianness,
}

impl TagEntry {
    /// The field type, if it is one defined by TIFF 6.0.
    pub fn field_type(&self) -> Option<Type> {
        Type::try_from(self.field_type).ok()
    }

    /// The value field read as an offset or an inline LONG.
    pub fn value_u32(&self) -> u32 {
        match self.endianness {
            Endianness::LittleEndian => u32::from_le_bytes(self.value),
            Endianness::BigEndian => u32::from_be_bytes(self.value),
        }
    }

    /// Returns `true` if the values fit in the 4-byte value field.
    pub fn is_inline(&self) -> bool {
        match self.field_type() {
            Some(t) => t.byte_size().saturating_mul(self.count as usize) <= 4,
            None => false,
        }
    }
}

/// Reads the entries of one Image File Directory.
///
/// The whole directory (count plus entries) is bounds-checked in [`open`][Self::open], so
/// reading entries afterwards cannot run off the end of the block.
#[derive(Debug)]
pub struct ImageFileDirectoryReader {
    endianness: Endianness,
    /// The byte offset of the beginning of this IFD
    ifd_start_offset: usize,
    /// The number of tags in this IFD
    tag_count: u16,
}

impl ImageFileDirectoryReader {
    /// Read the entry count of the IFD starting at the given offset into the TIFF block.
    pub fn open(tiff: &[u8], ifd_start_offset: u32, endianness: Endianness) -> GeotagResult<Self> {
        let ifd_start_offset = ifd_start_offset as usize;
        let mut cursor = MetadataCursor::new_with_offset(tiff, endianness, ifd_start_offset);

        // Tag   2 bytes
        // Type  2 bytes
        // Count 4 bytes
        // Value 4 bytes either a pointer the value itself
        let tag_count = cursor.read_u16()?;
        cursor.ensure(IFD_ENTRY_BYTE_SIZE * usize::from(tag_count))?;

        debug!("IFD at {ifd_start_offset} with {tag_count} entries");

        Ok(Self {
            endianness,
            ifd_start_offset,
            tag_count,
        })
    }

    /// The number of entries in this IFD.
    pub fn tag_count(&self) -> u16 {
        self.tag_count
    }

    /// Read the entry with the specified index.
    pub fn read_entry(&self, tiff: &[u8], tag_idx: u16) -> GeotagResult<TagEntry> {
        if tag_idx >= self.tag_count {
            return Err(GeotagError::InvalidFormat(format!(
                "entry {tag_idx} requested from an IFD with {} entries",
                self.tag_count
            )));
        }
        let tag_offset = self.ifd_start_offset
            + TAG_COUNT_BYTE_SIZE
            + IFD_ENTRY_BYTE_SIZE * usize::from(tag_idx);
        read_entry(tiff, tag_offset, self.endianness)
    }

    /// Iterate over all entries of this IFD in file order.
    pub fn entries<'a>(
        &'a self,
        tiff: &'a [u8],
    ) -> impl Iterator<Item = GeotagResult<TagEntry>> + 'a {
        (0..self.tag_count).map(move |idx| self.read_entry(tiff, idx))
    }
}

/// Read a single entry from the given offset
fn read_entry(tiff: &[u8], tag_offset: usize, endianness: Endianness) -> GeotagResult<TagEntry> {
    let mut cursor = MetadataCursor::new_with_offset(tiff, endianness, tag_offset);

    let tag = cursor.read_u16()?;
    let field_type = cursor.read_u16()?;
    let count = cursor.read_u32()?;
    let mut value = [0; 4];
    value.copy_from_slice(cursor.read_slice(4)?);

    Ok(TagEntry {
        tag,
        field_type,
        count,
        value,
        endianness,
    })
}

/// Scan the primary IFD for the pointer to the GPS IFD.
///
/// Returns `Ok(None)` when the image carries no GPS sub-directory.
pub fn find_gps_ifd_offset(tiff: &[u8], header: &ExifHeader) -> GeotagResult<Option<u32>> {
    let ifd_reader =
        ImageFileDirectoryReader::open(tiff, header.first_ifd_offset(), header.endianness())?;

    for entry in ifd_reader.entries(tiff) {
        let entry = entry?;
        if matches!(Tag::try_from(entry.tag), Ok(Tag::GpsIfd)) {
            let offset = entry.value_u32();
            debug!("GPS IFD pointer found, offset {offset}");
            return Ok(Some(offset));
        }
    }

    Ok(None)
}
