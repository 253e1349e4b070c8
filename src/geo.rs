//! Geodesic model: great-circle math on a spherical Earth.
//!
//! The vehicle is modeled as moving along the great circle between the two
//! journey endpoints at constant angular rate. These are pure functions with
//! no state; everything downstream (the crossing solver, the segment
//! synthesizer) positions the vehicle exclusively through
//! [`position_at_fraction`].

use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_KM;

/// A geographic coordinate in degrees.
///
/// Latitude in [-90, 90], longitude in [-180, 180]. Immutable value type;
/// range validation happens where journeys are constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.lat, self.lon)
    }
}

/// Great-circle distance between two coordinates in kilometers (haversine).
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Initial bearing from `a` toward `b`, in radians normalized to [0, 2π).
pub fn bearing(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let raw = y.atan2(x);
    (raw + 2.0 * std::f64::consts::PI) % (2.0 * std::f64::consts::PI)
}

/// Spherical direct problem: the coordinate reached by traveling
/// `distance_km` from `start` along the initial bearing `bearing_rad`.
///
/// The returned longitude is normalized into [-180, 180].
pub fn destination(start: Coordinate, distance_km: f64, bearing_rad: f64) -> Coordinate {
    let angular = distance_km / EARTH_RADIUS_KM;
    let lat1 = start.lat.to_radians();
    let lon1 = start.lon.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing_rad.cos()).asin();
    let lon2 = lon1
        + (bearing_rad.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    Coordinate {
        lat: lat2.to_degrees(),
        lon: normalize_lon(lon2.to_degrees()),
    }
}

/// Vehicle position after completing `fraction` of the journey.
///
/// Returns the endpoints exactly at fraction 0 and 1 so round-trip floating
/// error never perturbs journey boundaries. Fractions outside [0, 1] are
/// extrapolated along the same great circle; the solver probes slightly past
/// the arrival point while hunting for a boundary.
pub fn position_at_fraction(start: Coordinate, end: Coordinate, fraction: f64) -> Coordinate {
    if fraction == 0.0 {
        return start;
    }
    if fraction == 1.0 {
        return end;
    }
    let total = distance(start, end);
    destination(start, fraction * total, bearing(start, end))
}

/// Wrap a longitude in degrees into [-180, 180].
fn normalize_lon(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps 180 to -180; keep the canonical positive form
    if wrapped == -180.0 && lon > 0.0 { 180.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MADRID: Coordinate = Coordinate { lat: 40.4168, lon: -3.7038 };
    const BARCELONA: Coordinate = Coordinate { lat: 41.3874, lon: 2.1686 };

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(position_at_fraction(MADRID, BARCELONA, 0.0), MADRID);
        assert_eq!(position_at_fraction(MADRID, BARCELONA, 1.0), BARCELONA);
    }

    #[test]
    fn madrid_barcelona_distance_is_plausible() {
        let d = distance(MADRID, BARCELONA);
        // Straight-line distance is just over 500 km
        assert!(d > 480.0 && d < 530.0, "got {d} km");
    }

    #[test]
    fn bearing_is_normalized() {
        let points = [
            (MADRID, BARCELONA),
            (BARCELONA, MADRID),
            (Coordinate::new(0.0, 0.0), Coordinate::new(-10.0, -20.0)),
            (Coordinate::new(60.0, 170.0), Coordinate::new(55.0, -170.0)),
        ];
        for (a, b) in points {
            let br = bearing(a, b);
            assert!((0.0..std::f64::consts::TAU).contains(&br), "bearing {br}");
        }
    }

    #[test]
    fn destination_round_trip() {
        let br = bearing(MADRID, BARCELONA);
        let there = destination(MADRID, 200.0, br);
        let back = distance(MADRID, there);
        assert!((back - 200.0).abs() < 1e-6, "round trip error {}", (back - 200.0).abs());
    }

    #[test]
    fn midpoint_lies_between_endpoints() {
        let mid = position_at_fraction(MADRID, BARCELONA, 0.5);
        assert!(mid.lat > MADRID.lat && mid.lat < BARCELONA.lat);
        assert!(mid.lon > MADRID.lon && mid.lon < BARCELONA.lon);
        let d1 = distance(MADRID, mid);
        let d2 = distance(mid, BARCELONA);
        assert!((d1 - d2).abs() < 1e-6);
    }

    #[test]
    fn longitude_stays_in_range_across_antimeridian() {
        let a = Coordinate::new(35.0, 175.0);
        let b = Coordinate::new(35.0, -175.0);
        for i in 1..10 {
            let p = position_at_fraction(a, b, i as f64 / 10.0);
            assert!(p.lon >= -180.0 && p.lon <= 180.0, "lon {}", p.lon);
        }
    }
}
