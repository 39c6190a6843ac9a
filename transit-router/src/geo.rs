//! Distances between stops.
//!
//! Two notions of distance exist: the great-circle distance between two
//! coordinates, and the road distance a bus actually covers between two
//! adjacent stops. Road distances may be declared by either stop and are
//! not symmetric.

use crate::domain::Stop;

/// Earth radius used by the haversine formula, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance in metres between two coordinates (haversine).
pub fn geo_distance(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points
    let a = a.min(1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Road distance in metres when travelling directly from `from` to `to`.
///
/// Resolution order:
///
/// 1. a distance `from` declares for `to`,
/// 2. otherwise a distance `to` declares for `from`,
/// 3. otherwise the great-circle distance.
///
/// Placeholder stops sit at (0, 0) with no declared distances, so they
/// resolve to whatever the haversine formula gives for that point.
pub fn road_distance(from: &Stop, to: &Stop) -> f64 {
    if let Some(distance) = from.road_distances.get(&to.name) {
        return *distance;
    }
    if let Some(distance) = to.road_distances.get(&from.name) {
        return *distance;
    }
    geo_distance(from.coordinates, to.coordinates)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinates() -> impl Strategy<Value = Coordinates> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinates::new(lat, lon))
    }

    proptest! {
        /// Great-circle distance does not depend on direction
        #[test]
        fn symmetric(a in coordinates(), b in coordinates()) {
            let ab = geo_distance(a, b);
            let ba = geo_distance(b, a);
            prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
        }

        /// Distances are never negative and never exceed half the circumference
        #[test]
        fn bounded(a in coordinates(), b in coordinates()) {
            let d = geo_distance(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= EARTH_RADIUS_M * std::f64::consts::PI + 1e-6);
        }
    }
}
