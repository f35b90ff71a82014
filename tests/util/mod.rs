#![allow(dead_code)]

use exif_gps::reader::Endianness;

/// Position tags written into the GPS IFD of a synthetic image.
#[derive(Debug, Clone)]
pub struct GpsFixture {
    pub latitude_ref: u8,
    pub latitude: Vec<(u32, u32)>,
    pub longitude_ref: u8,
    pub longitude: Vec<(u32, u32)>,
}

/// 37°46'29.64"N 122°25'9.84"W
pub fn san_francisco() -> GpsFixture {
    GpsFixture {
        latitude_ref: b'N',
        latitude: vec![(37, 1), (46, 1), (2964, 100)],
        longitude_ref: b'W',
        longitude: vec![(122, 1), (25, 1), (984, 100)],
    }
}

/// 33°51'54.5"S 151°12'55.2"E
pub fn sydney() -> GpsFixture {
    GpsFixture {
        latitude_ref: b'S',
        latitude: vec![(33, 1), (51, 1), (545, 10)],
        longitude_ref: b'E',
        longitude: vec![(151, 1), (12, 1), (552, 10)],
    }
}

fn put_u16(buf: &mut Vec<u8>, value: u16, order: Endianness) {
    match order {
        Endianness::LittleEndian => buf.extend_from_slice(&value.to_le_bytes()),
        Endianness::BigEndian => buf.extend_from_slice(&value.to_be_bytes()),
    }
}

fn put_u32(buf: &mut Vec<u8>, value: u32, order: Endianness) {
    match order {
        Endianness::LittleEndian => buf.extend_from_slice(&value.to_le_bytes()),
        Endianness::BigEndian => buf.extend_from_slice(&value.to_be_bytes()),
    }
}

fn put_entry(buf: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, order: Endianness) {
    put_u16(buf, tag, order);
    put_u16(buf, field_type, order);
    put_u32(buf, count, order);
}

/// A TIFF block with a primary IFD and, when `gps` is given, a GPS IFD.
pub fn tiff_block(order: Endianness, gps: Option<&GpsFixture>) -> Vec<u8> {
    let mut buf = Vec::new();
    match order {
        Endianness::LittleEndian => buf.extend_from_slice(b"II"),
        Endianness::BigEndian => buf.extend_from_slice(b"MM"),
    }
    put_u16(&mut buf, 42, order);
    put_u32(&mut buf, 8, order);

    // IFD0: Make, and optionally the GPS pointer
    let entry_count: u16 = if gps.is_some() { 2 } else { 1 };
    let gps_ifd_offset = 8 + 2 + 12 * u32::from(entry_count) + 4;
    put_u16(&mut buf, entry_count, order);
    put_entry(&mut buf, 0x010F, 2, 4, order);
    buf.extend_from_slice(b"Cam\0");
    if gps.is_some() {
        put_entry(&mut buf, 0x8825, 4, 1, order);
        put_u32(&mut buf, gps_ifd_offset, order);
    }
    put_u32(&mut buf, 0, order);

    let Some(gps) = gps else {
        return buf;
    };
    assert_eq!(buf.len() as u32, gps_ifd_offset);

    let latitude_offset = gps_ifd_offset + 2 + 5 * 12 + 4;
    let longitude_offset = latitude_offset + 8 * gps.latitude.len() as u32;

    put_u16(&mut buf, 5, order);
    put_entry(&mut buf, 0, 1, 4, order);
    buf.extend_from_slice(&[2, 3, 0, 0]);
    put_entry(&mut buf, 1, 2, 2, order);
    buf.extend_from_slice(&[gps.latitude_ref, 0, 0, 0]);
    put_entry(&mut buf, 2, 5, gps.latitude.len() as u32, order);
    put_u32(&mut buf, latitude_offset, order);
    put_entry(&mut buf, 3, 2, 2, order);
    buf.extend_from_slice(&[gps.longitude_ref, 0, 0, 0]);
    put_entry(&mut buf, 4, 5, gps.longitude.len() as u32, order);
    put_u32(&mut buf, longitude_offset, order);
    put_u32(&mut buf, 0, order);

    for (numerator, denominator) in gps.latitude.iter().chain(gps.longitude.iter()) {
        put_u32(&mut buf, *numerator, order);
        put_u32(&mut buf, *denominator, order);
    }
    buf
}

/// An APP1 segment wrapping `tiff` behind `signature`.
pub fn app1(signature: &[u8], tiff: &[u8]) -> Vec<u8> {
    let length = (2 + signature.len() + tiff.len()) as u16;
    let mut buf = vec![0xFF, 0xE1];
    buf.extend_from_slice(&length.to_be_bytes());
    buf.extend_from_slice(signature);
    buf.extend_from_slice(tiff);
    buf
}

const APP0_JFIF: [u8; 18] = [
    0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00,
    0x01, 0x00, 0x00,
];

const SCAN: [u8; 14] = [
    0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0x12, 0xFF, 0x00, 0x34,
];

/// SOI, JFIF header, the given segments, a short scan and EOI.
pub fn jpeg(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = vec![0xFF, 0xD8];
    buf.extend_from_slice(&APP0_JFIF);
    for segment in segments {
        buf.extend_from_slice(segment);
    }
    buf.extend_from_slice(&SCAN);
    buf.extend_from_slice(&[0xFF, 0xD9]);
    buf
}

/// Offset one past the end of the JFIF header written by [`jpeg`].
pub const JFIF_END: usize = 2 + APP0_JFIF.len();

/// A complete JPEG carrying `gps` in an EXIF block.
pub fn jpeg_with_gps(order: Endianness, gps: &GpsFixture) -> Vec<u8> {
    jpeg(&[app1(b"Exif\0\0", &tiff_block(order, Some(gps)))])
}
