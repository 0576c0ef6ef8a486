//! Great-circle geodesy primitives.
//!
//! Headings and bearings are degrees in [0, 360), distances are nautical
//! miles, coordinates are decimal degrees. Accuracy is only required inside
//! a mid-latitude exercise area; there is no pole or antimeridian handling.

use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_NM;

/// A point on the earth in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl Geo {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

/// Fold a heading into [0, 360).
pub fn normalize_heading(h: f64) -> f64 {
    h.rem_euclid(360.0)
}

/// Signed minimal rotation from `current` to `target`, degrees in (-180, 180].
/// Negative means turn left.
pub fn shortest_turn(current: f64, target: f64) -> f64 {
    let delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Initial great-circle bearing from `a` to `b`, degrees in [0, 360).
pub fn bearing(a: &Geo, b: &Geo) -> f64 {
    let phi1 = a.lat_deg.to_radians();
    let phi2 = b.lat_deg.to_radians();
    let dlon = (b.lon_deg - a.lon_deg).to_radians();

    let y = dlon.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlon.cos();
    normalize_heading(y.atan2(x).to_degrees())
}

/// Great-circle distance from `a` to `b` in nautical miles (haversine).
pub fn distance_nm(a: &Geo, b: &Geo) -> f64 {
    let phi1 = a.lat_deg.to_radians();
    let phi2 = b.lat_deg.to_radians();
    let dphi = (b.lat_deg - a.lat_deg).to_radians();
    let dlon = (b.lon_deg - a.lon_deg).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * h.sqrt().asin() * EARTH_RADIUS_NM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_heading_range() {
        for h in [-720.0, -361.0, -180.0, -0.0, 0.0, 359.9, 360.0, 361.0, 1080.5] {
            let n = normalize_heading(h);
            assert!((0.0..360.0).contains(&n), "normalize({h}) = {n}");
        }
        assert_eq!(normalize_heading(360.0), 0.0);
        assert_eq!(normalize_heading(-90.0), 270.0);
        assert_eq!(normalize_heading(450.0), 90.0);
    }

    #[test]
    fn test_shortest_turn_direction() {
        assert!((shortest_turn(350.0, 10.0) - 20.0).abs() < 1e-10);
        assert!((shortest_turn(10.0, 350.0) + 20.0).abs() < 1e-10);
        assert!((shortest_turn(90.0, 90.0)).abs() < 1e-10);
        // Exactly opposite resolves to +180, never -180.
        assert!((shortest_turn(0.0, 180.0) - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_bearing_cardinals() {
        let origin = Geo::new(26.0, 54.0);
        let north = Geo::new(27.0, 54.0);
        let east = Geo::new(26.0, 55.0);
        let south = Geo::new(25.0, 54.0);

        assert!(bearing(&origin, &north).abs() < 1e-6);
        // Due east is slightly off 90 on a sphere, but well within a degree
        // at this latitude.
        assert!((bearing(&origin, &east) - 90.0).abs() < 0.5);
        assert!((bearing(&origin, &south) - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = Geo::new(26.0, 54.0);
        let b = Geo::new(27.0, 54.0);
        // One degree of latitude is 60 NM by definition of the mean radius.
        let d = distance_nm(&a, &b);
        assert!((d - 60.0).abs() < 0.1, "1 deg lat = {d} NM");
    }

    #[test]
    fn test_distance_zero() {
        let a = Geo::new(26.5, 54.25);
        assert!(distance_nm(&a, &a) < 1e-9);
    }
}
