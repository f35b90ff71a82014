#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod error;
pub mod geo;
pub mod gps;
pub mod jpeg;
pub mod metadata;
pub mod reader;
pub mod tiff;

use log::debug;

use crate::error::{GeotagError, GeotagResult};
use crate::metadata::{find_gps_ifd_offset, ExifHeader};
use crate::reader::AsyncImageReader;

pub use geo::GpsCoordinate;
pub use gps::GpsInfo;

/// Extract the GPS position stored in the EXIF block of a JPEG image.
///
/// Returns `Ok(None)` for a well-formed JPEG that has no EXIF block, no GPS directory or an
/// incomplete GPS position. Errors are reserved for input that cannot be parsed safely: a buffer
/// that does not start with the JPEG start-of-image marker, or a length, offset or count that
/// points past the available bytes.
pub fn extract(data: &[u8]) -> GeotagResult<Option<GpsCoordinate>> {
    let Some(segment) = jpeg::find_exif_segment(data)? else {
        debug!("no EXIF segment");
        return Ok(None);
    };

    let tiff = segment.tiff_block(data).ok_or_else(|| {
        GeotagError::truncated(segment.tiff_start, segment.end - segment.tiff_start, data.len())
    })?;
    let header = ExifHeader::try_open(tiff)?;

    let Some(gps_ifd_offset) = find_gps_ifd_offset(tiff, &header)? else {
        debug!("no GPS IFD");
        return Ok(None);
    };

    let info = GpsInfo::read(tiff, gps_ifd_offset, header.endianness())?;
    Ok(info.to_coordinate())
}

/// Returns `true` if [`extract`] finds a complete GPS position.
pub fn has_gps_data(data: &[u8]) -> bool {
    matches!(extract(data), Ok(Some(_)))
}

/// Load an image from `reader` and [`extract`] its GPS position.
pub async fn extract_from<R: AsyncImageReader + ?Sized>(
    reader: &R,
) -> GeotagResult<Option<GpsCoordinate>> {
    let data = reader.read_image().await?;
    extract(&data)
}
