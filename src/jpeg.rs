//! Locating the EXIF block inside a JPEG marker stream.
//!
//! A JPEG file is a sequence of segments, each introduced by `0xFF` and a marker byte. Most
//! segments carry a big-endian length (which counts the length field itself) followed by their
//! payload. EXIF metadata lives in an APP1 segment whose payload starts with `Exif\0\0`, directly
//! followed by a TIFF header.

use log::debug;

use crate::error::{GeotagError, GeotagResult};
use crate::metadata::MetadataCursor;
use crate::reader::Endianness;

/// Prefix of every marker.
const MARKER_PREFIX: u8 = 0xFF;
/// Start of image.
const SOI: u8 = 0xD8;
/// End of image.
const EOI: u8 = 0xD9;
/// Start of scan. Entropy-coded data follows, so no metadata can come after it.
const SOS: u8 = 0xDA;
/// Application segment 1, used for EXIF.
const APP1: u8 = 0xE1;
/// Temporary private use marker, standalone.
const TEM: u8 = 0x01;
/// Restart markers RST0 to RST7, standalone.
const RST0: u8 = 0xD0;
const RST7: u8 = 0xD7;

/// Length field plus the six signature bytes.
const MIN_EXIF_SEGMENT_LENGTH: u16 = 8;

/// Standard EXIF signature.
const EXIF_SIGNATURE: &[u8; 6] = b"Exif\0\0";
/// Upper-case signature written by some encoders.
const EXIF_SIGNATURE_UPPER: &[u8; 6] = b"EXIF\0\0";

/// A segment of the marker stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// The marker byte following `0xFF`.
    pub marker: u8,
    /// Declared length, including the two bytes of the length field.
    pub length: u16,
    /// Offset of the first payload byte, right after the length field.
    pub payload_offset: usize,
}

impl Segment {
    /// Offset one past the last payload byte.
    pub fn end(&self) -> usize {
        // payload_offset already skips the 2-byte length field
        self.payload_offset + usize::from(self.length) - 2
    }
}

/// The location of an EXIF block within a JPEG buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifSegment {
    /// Offset of the TIFF header, immediately after the EXIF signature.
    pub tiff_start: usize,
    /// Offset one past the end of the APP1 segment.
    pub end: usize,
}

impl ExifSegment {
    /// The TIFF block of this segment, or `None` if `data` is not the buffer that was scanned.
    pub fn tiff_block<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        data.get(self.tiff_start..self.end)
    }
}

fn is_exif_signature(bytes: &[u8]) -> bool {
    bytes == EXIF_SIGNATURE || bytes == EXIF_SIGNATURE_UPPER
}

fn is_standalone(marker: u8) -> bool {
    marker == TEM || (RST0..=RST7).contains(&marker)
}

/// Find the first APP1 segment carrying an EXIF signature.
///
/// Returns `Ok(None)` when the stream ends or reaches End-Of-Image without such a segment. The
/// input must start with the Start-Of-Image marker.
///
/// Two signatures are accepted: the standard `Exif\0\0` and the upper-case `EXIF\0\0`. An APP1
/// segment with any other payload prefix is skipped.
///
/// Scanning also stops with `Ok(None)` at Start-Of-Scan. The entropy-coded image data that follows
/// it is never interpreted as segments.
pub fn find_exif_segment(data: &[u8]) -> GeotagResult<Option<ExifSegment>> {
    if data.len() < 2 || data[0] != MARKER_PREFIX || data[1] != SOI {
        return Err(GeotagError::InvalidFormat(format!(
            "missing JPEG start-of-image marker, found {:02X?}",
            &data[..data.len().min(2)]
        )));
    }

    let mut cursor = MetadataCursor::new(data, Endianness::BigEndian).with_offset(2);

    while !cursor.is_exhausted() {
        if cursor.read_u8()? != MARKER_PREFIX {
            continue;
        }

        let marker = cursor.read_u8()?;
        match marker {
            EOI => {
                debug!("reached end of image at {}", cursor.offset() - 2);
                return Ok(None);
            }
            SOS => {
                debug!("reached start of scan at {}", cursor.offset() - 2);
                return Ok(None);
            }
            SOI => continue,
            // fill byte, the real marker follows
            MARKER_PREFIX => {
                cursor.seek(cursor.offset() - 1);
                continue;
            }
            m if is_standalone(m) => continue,
            _ => {}
        }

        let segment = read_segment(&mut cursor, marker)?;
        debug!(
            "segment 0xFF{:02X} at {} with length {}",
            segment.marker,
            segment.payload_offset - 4,
            segment.length
        );

        if segment.marker == APP1 && segment.length > MIN_EXIF_SEGMENT_LENGTH {
            let signature = cursor.read_slice(EXIF_SIGNATURE.len())?;
            if is_exif_signature(signature) {
                return Ok(Some(ExifSegment {
                    tiff_start: cursor.offset(),
                    end: segment.end(),
                }));
            }
        }

        cursor.seek(segment.end());
    }

    Ok(None)
}

/// Read the length field of the segment whose marker was just consumed and check that the
/// declared payload fits in the buffer.
fn read_segment(cursor: &mut MetadataCursor<'_>, marker: u8) -> GeotagResult<Segment> {
    let length = cursor.read_u16()?;
    if length < 2 {
        return Err(GeotagError::InvalidFormat(format!(
            "segment 0xFF{marker:02X} declares length {length}, smaller than its length field"
        )));
    }

    // length counts the two bytes just read
    let payload_length = usize::from(length) - 2;
    cursor.ensure(payload_length)?;

    Ok(Segment {
        marker,
        length,
        payload_offset: cursor.offset(),
    })
}
