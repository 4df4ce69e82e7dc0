use std::fmt;

use atom_core::weather::Coordinates;

/// Coordinates rounded to a fixed number of decimal places.
///
/// Stored as scaled integers so nearby points hash identically. Rounding is
/// half away from zero, matching [`f64::round`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateKey {
    latitude: i64,
    longitude: i64,
    precision: u32,
}

impl CoordinateKey {
    /// Normalizes `at` to `precision` decimal places.
    pub fn new(at: Coordinates, precision: u32) -> Self {
        let scale = 10f64.powi(precision as i32);
        Self {
            latitude: (at.latitude * scale).round() as i64,
            longitude: (at.longitude * scale).round() as i64,
            precision,
        }
    }

    /// The rounded coordinates.
    pub fn coordinates(&self) -> Coordinates {
        let scale = 10f64.powi(self.precision as i32);
        Coordinates::new(
            self.latitude as f64 / scale,
            self.longitude as f64 / scale,
        )
    }
}

impl fmt::Display for CoordinateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.precision as usize;
        let at = self.coordinates();
        write!(
            f,
            "{:.*},{:.*}",
            precision, at.latitude, precision, at.longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_points_share_a_key() {
        let a = CoordinateKey::new(Coordinates::new(37.7712, -122.4134), 2);
        let b = CoordinateKey::new(Coordinates::new(37.7749, -122.4101), 2);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "37.77,-122.41");
    }

    #[test]
    fn distant_points_differ() {
        let a = CoordinateKey::new(Coordinates::new(37.77, -122.41), 2);
        let b = CoordinateKey::new(Coordinates::new(37.78, -122.41), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn precision_is_configurable() {
        let coarse = CoordinateKey::new(Coordinates::new(51.5074, -0.1278), 0);
        assert_eq!(coarse.to_string(), "52,0");
        assert_eq!(coarse.coordinates(), Coordinates::new(52.0, 0.0));

        let fine = CoordinateKey::new(Coordinates::new(51.5074, -0.1278), 3);
        assert_eq!(fine.to_string(), "51.507,-0.128");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let key = CoordinateKey::new(Coordinates::new(0.5, -0.5), 0);
        assert_eq!(key.coordinates(), Coordinates::new(1.0, -1.0));
    }
}
