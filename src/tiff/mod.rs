//! TIFF structures embedded in an EXIF block.

pub mod tags;
