use std::fmt;

/// A TIFF RATIONAL: two unsigned 32-bit integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    /// Numerator
    pub numerator: u32,
    /// Denominator
    pub denominator: u32,
}

impl Rational {
    /// Construct a new rational.
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// The value as a float, or `None` if the denominator is zero.
    pub fn to_f64(&self) -> Option<f64> {
        if self.denominator == 0 {
            None
        } else {
            Some(f64::from(self.numerator) / f64::from(self.denominator))
        }
    }
}

/// Degrees, minutes and seconds of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    /// Degrees
    pub degrees: f64,
    /// Minutes
    pub minutes: f64,
    /// Seconds
    pub seconds: f64,
}

impl Dms {
    /// Evaluate exactly three rationals.
    ///
    /// Returns `None` when there are not exactly three values or any denominator is zero.
    pub fn from_rationals(values: &[Rational]) -> Option<Self> {
        let [degrees, minutes, seconds] = values else {
            return None;
        };
        Some(Self {
            degrees: degrees.to_f64()?,
            minutes: minutes.to_f64()?,
            seconds: seconds.to_f64()?,
        })
    }
}

/// The hemisphere a GPS reference tag points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    /// `N`
    North,
    /// `S`
    South,
    /// `E`
    East,
    /// `W`
    West,
}

impl Hemisphere {
    /// Parse a `GPSLatitudeRef` byte.
    pub fn from_latitude_ref(byte: u8) -> Option<Self> {
        match byte {
            b'N' => Some(Self::North),
            b'S' => Some(Self::South),
            _ => None,
        }
    }

    /// Parse a `GPSLongitudeRef` byte.
    pub fn from_longitude_ref(byte: u8) -> Option<Self> {
        match byte {
            b'E' => Some(Self::East),
            b'W' => Some(Self::West),
            _ => None,
        }
    }

    /// South and west map to negative decimal degrees.
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::South | Self::West)
    }
}

/// Convert degrees, minutes and seconds to signed decimal degrees.
pub fn dms_to_decimal(dms: &Dms, hemisphere: Hemisphere) -> f64 {
    let decimal = dms.degrees + dms.minutes / 60.0 + dms.seconds / 3600.0;
    if hemisphere.is_negative() {
        -decimal
    } else {
        decimal
    }
}

/// A position in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GpsCoordinate {
    /// Construct a coordinate from decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate from one DMS triple and reference per axis.
    ///
    /// The references are expected to come from [`Hemisphere::from_latitude_ref`] and
    /// [`Hemisphere::from_longitude_ref`]; only their sign is used.
    pub fn from_dms(
        latitude: &Dms,
        latitude_ref: Hemisphere,
        longitude: &Dms,
        longitude_ref: Hemisphere,
    ) -> Self {
        Self::new(
            dms_to_decimal(latitude, latitude_ref),
            dms_to_decimal(longitude, longitude_ref),
        )
    }

    /// Latitude in decimal degrees, negative south of the equator.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees, negative west of Greenwich.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GpsCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl From<GpsCoordinate> for (f64, f64) {
    fn from(value: GpsCoordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dms(d: f64, m: f64, s: f64) -> Dms {
        Dms {
            degrees: d,
            minutes: m,
            seconds: s,
        }
    }

    #[test]
    fn test_rational() {
        assert_eq!(Rational::new(3, 4).to_f64(), Some(0.75));
        assert_eq!(Rational::new(0, 1).to_f64(), Some(0.0));
        assert_eq!(Rational::new(1, 0).to_f64(), None);
    }

    #[test]
    fn test_dms_needs_three_values() {
        let values = [Rational::new(37, 1), Rational::new(46, 1), Rational::new(2964, 100)];
        let parsed = Dms::from_rationals(&values).unwrap();
        assert_eq!(parsed, dms(37.0, 46.0, 29.64));

        assert_eq!(Dms::from_rationals(&values[..2]), None);
        assert_eq!(Dms::from_rationals(&[]), None);

        let zero_denominator = [Rational::new(37, 1), Rational::new(46, 0), Rational::new(0, 1)];
        assert_eq!(Dms::from_rationals(&zero_denominator), None);
    }

    #[test]
    fn test_hemisphere_sign() {
        let value = dms(37.0, 46.0, 29.64);
        assert!((dms_to_decimal(&value, Hemisphere::North) - 37.7749).abs() < 1e-4);
        assert!((dms_to_decimal(&value, Hemisphere::South) + 37.7749).abs() < 1e-4);

        for (d, m, s) in [(0.0, 0.0, 0.0), (12.0, 0.0, 1.5), (179.0, 59.0, 59.9)] {
            let value = dms(d, m, s);
            assert!(dms_to_decimal(&value, Hemisphere::North) >= 0.0);
            assert!(dms_to_decimal(&value, Hemisphere::East) >= 0.0);
            assert!(dms_to_decimal(&value, Hemisphere::South) <= 0.0);
            assert!(dms_to_decimal(&value, Hemisphere::West) <= 0.0);
        }
    }

    #[test]
    fn test_hemisphere_refs() {
        assert_eq!(Hemisphere::from_latitude_ref(b'N'), Some(Hemisphere::North));
        assert_eq!(Hemisphere::from_latitude_ref(b'S'), Some(Hemisphere::South));
        assert_eq!(Hemisphere::from_latitude_ref(b'E'), None);
        assert_eq!(Hemisphere::from_longitude_ref(b'W'), Some(Hemisphere::West));
        assert_eq!(Hemisphere::from_longitude_ref(b'n'), None);
    }

    #[test]
    fn test_from_dms() {
        let lat = dms(37.0, 46.0, 29.64);
        let lon = dms(122.0, 25.0, 9.84);
        let coord = GpsCoordinate::from_dms(&lat, Hemisphere::North, &lon, Hemisphere::West);
        assert!((coord.latitude() - 37.7749).abs() < 1e-4);
        assert!((coord.longitude() + 122.4194).abs() < 1e-4);
        assert_eq!(coord.to_string(), "37.774900, -122.419400");
        assert_eq!(<(f64, f64)>::from(coord), (coord.latitude(), coord.longitude()));
    }
}
