//! Geofence evaluation: great-circle distance and range checks

use crate::types::LatLng;

/// Mean Earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default geofence radius in meters
pub const DEFAULT_RANGE_M: f64 = 200.0;

/// Great-circle distance between two coordinates in meters, computed with
/// the Haversine formula
pub fn distance_between(a: LatLng, b: LatLng) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Whether `user` is within `range_m` meters of `target`
pub fn is_within_range(user: LatLng, target: LatLng, range_m: f64) -> bool {
    distance_between(user, target) <= range_m
}
