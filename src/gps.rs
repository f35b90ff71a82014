//! Decoding of the GPS sub-directory.

use log::{debug, warn};

use crate::error::GeotagResult;
use crate::geo::{Dms, GpsCoordinate, Hemisphere, Rational};
use crate::metadata::{ImageFileDirectoryReader, MetadataCursor, TagEntry};
use crate::reader::Endianness;
use crate::tiff::tags::{GpsTag, Type};

/// Number of rationals in a degrees/minutes/seconds value.
const DMS_COMPONENTS: usize = 3;

/// The raw position tags of a GPS IFD.
///
/// Fields stay empty when the corresponding tag is missing or unusable; nothing is filled in
/// with a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpsInfo {
    /// First byte of `GPSLatitudeRef`.
    pub latitude_ref: Option<u8>,
    /// Up to three rationals of `GPSLatitude`.
    pub latitude: Vec<Rational>,
    /// First byte of `GPSLongitudeRef`.
    pub longitude_ref: Option<u8>,
    /// Up to three rationals of `GPSLongitude`.
    pub longitude: Vec<Rational>,
}

impl GpsInfo {
    /// Read the GPS IFD starting at `gps_ifd_offset` within the TIFF block.
    ///
    /// Unrecognised tags are skipped. Offsets that leave the block are
    /// [`TruncatedData`][crate::error::GeotagError::TruncatedData].
    pub fn read(tiff: &[u8], gps_ifd_offset: u32, endianness: Endianness) -> GeotagResult<Self> {
        let ifd_reader = ImageFileDirectoryReader::open(tiff, gps_ifd_offset, endianness)?;
        let mut info = Self::default();

        for entry in ifd_reader.entries(tiff) {
            let entry = entry?;
            let Ok(tag) = GpsTag::try_from(entry.tag) else {
                continue;
            };
            match tag {
                GpsTag::LatitudeRef => info.latitude_ref = read_ref(&entry),
                GpsTag::Latitude => info.latitude = read_rationals(tiff, &entry, endianness)?,
                GpsTag::LongitudeRef => info.longitude_ref = read_ref(&entry),
                GpsTag::Longitude => info.longitude = read_rationals(tiff, &entry, endianness)?,
            }
        }

        debug!("GPS IFD decoded: {info:?}");
        Ok(info)
    }

    /// Combine the raw tags into a coordinate.
    ///
    /// Returns `None` unless both axes have a valid reference and three usable rationals.
    pub fn to_coordinate(&self) -> Option<GpsCoordinate> {
        let latitude_ref = self.latitude_ref.and_then(Hemisphere::from_latitude_ref);
        let longitude_ref = self.longitude_ref.and_then(Hemisphere::from_longitude_ref);
        let (Some(latitude_ref), Some(longitude_ref)) = (latitude_ref, longitude_ref) else {
            debug!(
                "missing or unknown hemisphere reference: {:?} / {:?}",
                self.latitude_ref, self.longitude_ref
            );
            return None;
        };

        let latitude = Dms::from_rationals(&self.latitude);
        let longitude = Dms::from_rationals(&self.longitude);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            debug!(
                "incomplete GPS position: {} latitude and {} longitude components",
                self.latitude.len(),
                self.longitude.len()
            );
            return None;
        };

        Some(GpsCoordinate::from_dms(
            &latitude,
            latitude_ref,
            &longitude,
            longitude_ref,
        ))
    }
}

/// The reference is a two-byte ASCII string such as `"N\0"`, stored inline.
fn read_ref(entry: &TagEntry) -> Option<u8> {
    if entry.count == 0 {
        warn!("GPS tag {} has no value", entry.tag);
        return None;
    }
    if !entry.is_inline() {
        warn!(
            "GPS tag {} does not fit its value field (type {}, count {})",
            entry.tag, entry.field_type, entry.count
        );
        return None;
    }
    Some(entry.value[0])
}

/// Read up to three rationals from the offset stored in the entry.
fn read_rationals(
    tiff: &[u8],
    entry: &TagEntry,
    endianness: Endianness,
) -> GeotagResult<Vec<Rational>> {
    if entry.field_type() != Some(Type::RATIONAL) {
        warn!(
            "GPS tag {} has field type {}, expected RATIONAL",
            entry.tag, entry.field_type
        );
        return Ok(vec![]);
    }

    let count = (entry.count as usize).min(DMS_COMPONENTS);
    let mut cursor =
        MetadataCursor::new_with_offset(tiff, endianness, entry.value_u32() as usize);
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        let mut data = cursor.read(Type::RATIONAL.byte_size())?;
        let rational = Rational::new(data.read_u32()?, data.read_u32()?);
        if rational.denominator == 0 {
            warn!("GPS tag {} has a zero denominator", entry.tag);
        }
        values.push(rational);
    }
    Ok(values)
}
