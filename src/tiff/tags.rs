//! Tag and field type identifiers used while walking EXIF directories.

#![allow(clippy::upper_case_acronyms)]

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The data type of an IFD entry's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum Type {
    /// 8-bit unsigned integer.
    BYTE = 1,
    /// 8-bit byte that contains a 7-bit ASCII code; the last byte must be zero.
    ASCII = 2,
    /// 16-bit unsigned integer.
    SHORT = 3,
    /// 32-bit unsigned integer.
    LONG = 4,
    /// Fraction stored as two 32-bit unsigned integers.
    RATIONAL = 5,
    /// 8-bit signed integer.
    SBYTE = 6,
    /// 8-bit byte that may contain anything.
    UNDEFINED = 7,
    /// 16-bit signed integer.
    SSHORT = 8,
    /// 32-bit signed integer.
    SLONG = 9,
    /// Fraction stored as two 32-bit signed integers.
    SRATIONAL = 10,
    /// 32-bit IEEE floating point.
    FLOAT = 11,
    /// 64-bit IEEE floating point.
    DOUBLE = 12,
    /// 32-bit unsigned offset to a child IFD.
    IFD = 13,
}

impl Type {
    /// The size in bytes of a single value of this type.
    pub fn byte_size(&self) -> usize {
        match self {
            Type::BYTE | Type::SBYTE | Type::ASCII | Type::UNDEFINED => 1,
            Type::SHORT | Type::SSHORT => 2,
            Type::LONG | Type::SLONG | Type::FLOAT | Type::IFD => 4,
            Type::DOUBLE | Type::RATIONAL | Type::SRATIONAL => 8,
        }
    }
}

/// Tags of the primary image directory that this crate looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum Tag {
    /// Offset of the GPS sub-directory.
    GpsIfd = 0x8825,
}

/// Tags of the GPS sub-directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum GpsTag {
    /// `N` or `S`.
    LatitudeRef = 1,
    /// Degrees, minutes and seconds as three rationals.
    Latitude = 2,
    /// `E` or `W`.
    LongitudeRef = 3,
    /// Degrees, minutes and seconds as three rationals.
    Longitude = 4,
}
