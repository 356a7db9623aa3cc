use serde::{Deserialize, Serialize};

use crate::error::TourcoinError;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A check-in counts when the user stands within this distance of the place.
pub const DEFAULT_PROXIMITY_THRESHOLD_KM: f64 = 0.1;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build a position, rejecting non-finite or out-of-range degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TourcoinError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(TourcoinError::Validation(format!(
                "latitude must be between -90 and 90, got {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(TourcoinError::Validation(format!(
                "longitude must be between -180 and 180, got {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Haversine distance between two lat/lng points on a sphere of `radius_km`.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64, radius_km: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    radius_km * c
}

/// True iff the two points are within `threshold_km` of each other.
pub fn is_close(
    lat_a: f64,
    lng_a: f64,
    lat_b: f64,
    lng_b: f64,
    radius_km: f64,
    threshold_km: f64,
) -> bool {
    haversine_km(lat_a, lng_a, lat_b, lng_b, radius_km) <= threshold_km
}

/// Tunable proximity rule applied to check-ins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityPolicy {
    pub earth_radius_km: f64,
    pub threshold_km: f64,
}

impl Default for ProximityPolicy {
    fn default() -> Self {
        Self {
            earth_radius_km: EARTH_RADIUS_KM,
            threshold_km: DEFAULT_PROXIMITY_THRESHOLD_KM,
        }
    }
}

impl ProximityPolicy {
    pub fn distance_km(&self, a: Coordinates, b: Coordinates) -> f64 {
        haversine_km(
            a.latitude,
            a.longitude,
            b.latitude,
            b.longitude,
            self.earth_radius_km,
        )
    }

    /// True iff an already computed distance is within the threshold.
    pub fn within(&self, distance_km: f64) -> bool {
        distance_km <= self.threshold_km
    }

    pub fn is_close(&self, a: Coordinates, b: Coordinates) -> bool {
        self.within(self.distance_km(a, b))
    }
}
