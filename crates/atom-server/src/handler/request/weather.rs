//! Weather request types.

use atom_core::weather::Coordinates;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for a forecast lookup.
///
/// Both fields are optional at the JSON level so that a missing coordinate
/// yields a descriptive `400` rather than a generic deserialization error.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GetForecast {
    /// Latitude in decimal degrees.
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl GetForecast {
    /// Both coordinates, if both were sent. Zero is a valid coordinate.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_missing() {
        let request = GetForecast {
            latitude: Some(0.0),
            longitude: Some(0.0),
        };
        assert_eq!(request.coordinates(), Some(Coordinates::new(0.0, 0.0)));
    }

    #[test]
    fn either_missing_is_none() {
        let request = GetForecast {
            latitude: Some(37.77),
            longitude: None,
        };
        assert_eq!(request.coordinates(), None);
    }

    #[test]
    fn out_of_range_fails_validation() {
        let request = GetForecast {
            latitude: Some(91.0),
            longitude: Some(0.0),
        };
        assert!(request.validate().is_err());
    }
}
