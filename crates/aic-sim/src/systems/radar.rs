//! Rotating-sweep radar contact generation.
//!
//! One global sweep angle advances 0.6 degrees per tick while the simulation
//! runs. An asset is painted when it is inside maximum range, inside the
//! two-term radar horizon, and within one degree of the sweep line. Paints
//! age out under the operator-configured decay window.

use hecs::World;

use aic_core::components::{AssetId, AssetInfo, Kinematics, OwnShip};
use aic_core::constants::*;
use aic_core::contacts::RadarReturn;
use aic_core::enums::Domain;
use aic_core::geo::{self, Geo};

/// Radar horizon in NM from antenna and target heights in feet.
pub fn horizon_nm(own_alt_ft: f64, tgt_alt_ft: f64) -> f64 {
    HORIZON_COEFF * (own_alt_ft.max(0.0).sqrt() + tgt_alt_ft.max(0.0).sqrt())
}

/// True when `bearing` falls inside the one-degree beam around the sweep.
fn in_beam(bearing_deg: f64, sweep_deg: f64) -> bool {
    geo::shortest_turn(sweep_deg, bearing_deg).abs() < BEAM_HALF_WIDTH_DEG
}

/// Height used for horizon geometry: air assets use altitude, everything
/// else counts as sea level.
pub(crate) fn sensor_height_ft(domain: Domain, kin: &Kinematics) -> f64 {
    match domain {
        Domain::Air => kin.altitude_ft,
        _ => 0.0,
    }
}

/// Own ship position and antenna height, the origin for all sensor geometry.
pub(crate) struct OwnShipFix {
    pub pos: Geo,
    pub height_ft: f64,
}

pub(crate) fn own_ship_fix(world: &World) -> Option<OwnShipFix> {
    let mut query = world.query::<(&OwnShip, &AssetInfo, &Geo, &Kinematics)>();
    query.iter().next().map(|(_, (_, info, pos, kin))| OwnShipFix {
        pos: *pos,
        height_ft: sensor_height_ft(info.domain, kin),
    })
}

/// Evaluate the range, horizon, and sweep gates for one target.
/// Returns (bearing, distance) on a paint.
///
/// The horizon gate only applies when the two-term horizon is positive:
/// sea-level-to-sea-level geometry is range-limited only.
pub(crate) fn paint(
    own: &OwnShipFix,
    tgt_pos: &Geo,
    tgt_height_ft: f64,
    sweep_deg: f64,
) -> Option<(f64, f64)> {
    let distance = geo::distance_nm(&own.pos, tgt_pos);
    if distance >= RADAR_MAX_RANGE_NM {
        return None;
    }

    let horizon = horizon_nm(own.height_ft, tgt_height_ft);
    if horizon > 0.0 && distance > horizon {
        return None;
    }

    let bearing = geo::bearing(&own.pos, tgt_pos);
    if !in_beam(bearing, sweep_deg) {
        return None;
    }
    Some((bearing, distance))
}

/// Paint every detectable non-own-ship asset under the current sweep angle.
pub fn run(world: &World, sweep_deg: f64, tick: u64, returns: &mut Vec<RadarReturn>) {
    let Some(own) = own_ship_fix(world) else {
        return;
    };

    let mut query = world
        .query::<(&AssetId, &AssetInfo, &Geo, &Kinematics)>()
        .without::<&OwnShip>();
    for (_entity, (id, info, pos, kin)) in query.iter() {
        let height = sensor_height_ft(info.domain, kin);
        if let Some((bearing_deg, distance_nm)) = paint(&own, pos, height, sweep_deg) {
            returns.push(RadarReturn {
                asset_id: *id,
                pos: *pos,
                bearing_deg,
                distance_nm,
                tick,
            });
        }
    }
}

/// Drop returns whose age has reached the decay window.
pub fn purge(returns: &mut Vec<RadarReturn>, now: u64, window_ticks: u64) {
    returns.retain(|r| now.saturating_sub(r.tick) < window_ticks);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn own_at(lat: f64, lon: f64, height_ft: f64) -> OwnShipFix {
        OwnShipFix {
            pos: Geo::new(lat, lon),
            height_ft,
        }
    }

    /// A target due north at `nm` nautical miles. Converts with the same
    /// earth radius as `distance_nm` so boundary placements are exact.
    fn north_of(own: &OwnShipFix, nm: f64) -> Geo {
        let deg = nm / (EARTH_RADIUS_NM * std::f64::consts::PI / 180.0);
        Geo::new(own.pos.lat_deg + deg, own.pos.lon_deg)
    }

    #[test]
    fn test_north_of_matches_distance_nm() {
        let own = own_at(26.0, 54.0, 0.0);
        let target = north_of(&own, 319.9);
        let d = geo::distance_nm(&own.pos, &target);
        assert!((d - 319.9).abs() < 1e-6, "placed at {d} NM");
    }

    #[test]
    fn test_sea_level_detection_is_range_limited_only() {
        let own = own_at(26.0, 54.0, 0.0);

        let near = north_of(&own, 319.9);
        assert!(
            paint(&own, &near, 0.0, 0.0).is_some(),
            "319.9 NM at sea level should be detectable"
        );

        // Placed a hair past the limit so rounding in the degree round-trip
        // cannot pull the computed distance back under 320.0.
        let at_limit = north_of(&own, 320.0001);
        assert!(
            paint(&own, &at_limit, 0.0, 0.0).is_none(),
            "320 NM is outside maximum range"
        );
    }

    #[test]
    fn test_horizon_gates_low_altitude_target() {
        let own = own_at(26.0, 54.0, 0.0);
        // Horizon for a 10,000 ft target from a sea-level antenna: ~123 NM.
        let horizon = horizon_nm(0.0, 10_000.0);
        assert!((horizon - 123.0).abs() < 0.1, "horizon = {horizon}");

        let inside = north_of(&own, horizon - 5.0);
        assert!(paint(&own, &inside, 10_000.0, 0.0).is_some());

        let beyond = north_of(&own, horizon + 5.0);
        assert!(paint(&own, &beyond, 10_000.0, 0.0).is_none());
    }

    #[test]
    fn test_beam_gating() {
        let own = own_at(26.0, 54.0, 0.0);
        let target = north_of(&own, 50.0); // bearing ~0

        assert!(paint(&own, &target, 0.0, 0.0).is_some());
        assert!(paint(&own, &target, 0.0, 0.9).is_some());
        assert!(paint(&own, &target, 0.0, 90.0).is_none());
        // Beam wraps across north.
        assert!(paint(&own, &target, 0.0, 359.5).is_some());
    }

    #[test]
    fn test_purge_boundary() {
        let mut returns = vec![RadarReturn {
            asset_id: aic_core::components::AssetId(1),
            pos: Geo::new(26.0, 54.0),
            bearing_deg: 0.0,
            distance_nm: 10.0,
            tick: 100,
        }];

        // Present while age < window.
        purge(&mut returns, 100 + 599, 600);
        assert_eq!(returns.len(), 1);

        // Absent once age reaches the window.
        purge(&mut returns, 100 + 600, 600);
        assert!(returns.is_empty());
    }
}
