//! API for reading the TIFF directories of an EXIF block.
//!
//! An EXIF block is a small TIFF file: a header giving the byte order and the offset of the
//! primary Image File Directory (IFD), followed by directories of 12-byte entries. GPS data lives
//! in its own sub-directory, referenced from the primary IFD by tag `0x8825`.
//!
//! ```
//! use exif_gps::metadata::{find_gps_ifd_offset, ExifHeader};
//!
//! # let tiff: &[u8] = &[b'I', b'I', 42, 0, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0];
//! let header = ExifHeader::try_open(tiff).unwrap();
//! let gps_ifd = find_gps_ifd_offset(tiff, &header).unwrap();
//! assert_eq!(gps_ifd, None);
//! ```
//!
//! Every read is bounds-checked against the TIFF block, so an offset or count pointing past its
//! end surfaces as [`TruncatedData`][crate::error::GeotagError::TruncatedData].

mod cursor;
mod reader;

pub(crate) use cursor::MetadataCursor;
pub use reader::{find_gps_ifd_offset, ExifHeader, ImageFileDirectoryReader, TagEntry};
