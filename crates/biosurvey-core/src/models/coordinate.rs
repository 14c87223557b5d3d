use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SurveyError};

/// A WGS84 coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(SurveyError::InvalidCoordinate {
                lat,
                lon,
                reason: "coordinates must be finite".to_string(),
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(SurveyError::InvalidCoordinate {
                lat,
                lon,
                reason: "latitude must be between -90 and 90".to_string(),
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(SurveyError::InvalidCoordinate {
                lat,
                lon,
                reason: "longitude must be between -180 and 180".to_string(),
            });
        }
        Ok(Self { lat, lon })
    }

    /// Build from a GeoJSON position, which is ordered `[lon, lat]`
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Self::new(*lat, *lon).ok(),
            _ => None,
        }
    }

    /// Grouping key shared by every survey recorded at this exact location
    pub fn key(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }

    /// Circle query parameter understood by the directory service
    pub fn circle_param(&self, radius_meters: f64) -> String {
        format!("{},{},{}", self.lat, self.lon, radius_meters)
    }

    /// Great-circle distance in meters
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        Haversine.distance(Point::from(*self), Point::from(*other))
    }
}

impl From<Coordinate> for Point {
    fn from(c: Coordinate) -> Self {
        Point::new(c.lon, c.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(-27.47, 153.02).is_ok());
    }

    #[test]
    fn test_from_position_swaps_axis_order() {
        let c = Coordinate::from_position(&[153.02, -27.47]).unwrap();
        assert_eq!(c.lat, -27.47);
        assert_eq!(c.lon, 153.02);
        assert!(Coordinate::from_position(&[153.02]).is_none());
    }

    #[test]
    fn test_key_and_circle() {
        let c = Coordinate::new(-27.5, 153.0).unwrap();
        assert_eq!(c.key(), "-27.5,153");
        assert_eq!(c.circle_param(6000.0), "-27.5,153,6000");
    }

    #[test]
    fn test_distance_brisbane_gold_coast() {
        // Brisbane CBD to Surfers Paradise is roughly 71km
        let brisbane = Coordinate::new(-27.4698, 153.0251).unwrap();
        let surfers = Coordinate::new(-28.0027, 153.4300).unwrap();
        let d = brisbane.distance_to(&surfers);
        assert!(d > 66_000.0 && d < 76_000.0, "distance {} should be ~71km", d);
        assert!(brisbane.distance_to(&brisbane) < 0.001);
    }
}
