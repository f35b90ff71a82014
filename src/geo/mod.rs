//! Support for geographic coordinates.

mod coordinate;

pub use coordinate::{dms_to_decimal, Dms, GpsCoordinate, Hemisphere, Rational};
