//! Geographic coordinates value object

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::Id;
use crate::errors::DomainError;

/// A WGS84 position as used throughout the Navitia API ("coord")
///
/// The API serialises both components as strings; decoding accepts
/// strings and plain numbers alike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Longitude in degrees (-180 to 180)
    #[serde(rename = "lon", deserialize_with = "lenient_f64")]
    longitude: f64,
    /// Latitude in degrees (-90 to 90)
    #[serde(rename = "lat", deserialize_with = "lenient_f64")]
    latitude: f64,
}

impl Coordinates {
    /// Create coordinates with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates(format!(
                "lon {longitude}, lat {latitude}"
            )));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Create coordinates without validation (for trusted sources)
    #[must_use]
    pub const fn new_unchecked(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Format the coordinates as a Navitia identifier (`lon;lat`)
    #[must_use]
    pub fn id(&self) -> Id {
        Id::new(format!("{:.6};{:.6}", self.longitude, self.latitude))
    }

    /// Calculate approximate distance to other coordinates in kilometers
    ///
    /// Uses the Haversine formula for great-circle distance
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6};{:.6}", self.longitude, self.latitude)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate `{s}`"))),
    }
}
