//! Rate-limited channel convergence and position propagation.
//!
//! Each scalar channel (heading, speed, altitude, depth) is a two-state
//! machine: converging while a target is set, converged once the value is
//! within one unit and snapped. Position integration runs unconditionally
//! every tick on a flat local-tangent-plane approximation.

use hecs::World;

use aic_core::components::{AssetInfo, Kinematics, OwnShip};
use aic_core::constants::*;
use aic_core::enums::Domain;
use aic_core::geo::{self, Geo};
use aic_core::platform::PlatformCatalog;

/// Performance limits resolved for one asset: platform override where
/// present, else the domain table. Speed rate always comes from the domain
/// table; own ship is additionally hard-capped.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_speed_kt: f64,
    pub max_altitude_ft: f64,
    pub max_depth_ft: f64,
    pub turn_rate_deg_s: f64,
    pub climb_rate_ft_s: f64,
    pub speed_rate_kt_s: f64,
}

pub fn resolve_limits(info: &AssetInfo, catalog: &PlatformCatalog, is_own_ship: bool) -> Limits {
    let d = info.domain.limits();
    let p = info
        .platform
        .as_deref()
        .and_then(|name| catalog.get(info.domain, name));

    let mut limits = Limits {
        max_speed_kt: p.map_or(d.max_speed_kt, |p| p.max_speed_kt),
        max_altitude_ft: p.map_or(d.max_altitude_ft, |p| p.max_altitude_ft),
        max_depth_ft: d.max_depth_ft,
        turn_rate_deg_s: p.map_or(d.turn_rate_deg_s, |p| p.turn_rate_deg_s),
        climb_rate_ft_s: p.map_or(d.climb_rate_ft_s, |p| p.climb_rate_ft_min / 60.0),
        speed_rate_kt_s: d.speed_rate_kt_s,
    };

    if is_own_ship {
        limits.max_speed_kt = limits.max_speed_kt.min(OWNSHIP_MAX_SPEED_KT);
        limits.max_altitude_ft = limits.max_altitude_ft.min(OWNSHIP_MAX_ALTITUDE_FT);
    }
    limits
}

/// Advance one scalar channel toward its target by at most `rate * DT`.
/// Returns the new value and whether the target was reached.
fn converge(current: f64, target: f64, rate_per_sec: f64) -> (f64, bool) {
    let delta = target - current;
    if delta.abs() > CONVERGE_SNAP_UNITS {
        let step = (rate_per_sec * DT).min(delta.abs());
        (current + delta.signum() * step, false)
    } else {
        (target, true)
    }
}

/// Run channel convergence and position integration for every asset.
pub fn run(world: &mut World, catalog: &PlatformCatalog) {
    for (_entity, (info, kin, pos, own)) in
        world.query_mut::<(&AssetInfo, &mut Kinematics, &mut Geo, Option<&OwnShip>)>()
    {
        let limits = resolve_limits(info, catalog, own.is_some());

        // Heading: turn direction chosen by shortest rotation, never
        // overshooting within a tick.
        if let Some(target) = kin.target_heading {
            let delta = geo::shortest_turn(kin.heading_deg, target);
            if delta.abs() > CONVERGE_SNAP_UNITS {
                let step = (limits.turn_rate_deg_s * DT).min(delta.abs());
                kin.heading_deg =
                    geo::normalize_heading(kin.heading_deg + delta.signum() * step);
            } else {
                kin.heading_deg = geo::normalize_heading(target);
                kin.target_heading = None;
            }
        }

        if let Some(target) = kin.target_speed {
            let target = target.clamp(0.0, limits.max_speed_kt);
            let (v, done) = converge(kin.speed_kt, target, limits.speed_rate_kt_s);
            kin.speed_kt = v.clamp(0.0, limits.max_speed_kt);
            if done {
                kin.target_speed = None;
            }
        }

        if info.domain == Domain::Air {
            if let Some(target) = kin.target_altitude {
                let target = target.clamp(0.0, limits.max_altitude_ft);
                let (v, done) = converge(kin.altitude_ft, target, limits.climb_rate_ft_s);
                kin.altitude_ft = v.clamp(0.0, limits.max_altitude_ft);
                if done {
                    kin.target_altitude = None;
                }
            }
        }

        if info.domain == Domain::SubSurface {
            if let Some(target) = kin.target_depth {
                let target = target.clamp(0.0, limits.max_depth_ft);
                let (v, done) = converge(kin.depth_ft, target, DEPTH_RATE_FT_PER_SEC);
                kin.depth_ft = v.clamp(0.0, limits.max_depth_ft);
                if done {
                    kin.target_depth = None;
                }
            }
        }

        // Position propagation. An asset at speed 0 does not move, even
        // while other channels are still converging.
        if kin.speed_kt > 0.0 {
            let dist_nm = kin.speed_kt / 3600.0 * DT;
            let hdg = kin.heading_deg.to_radians();
            pos.lat_deg += dist_nm * hdg.cos() / 60.0;
            pos.lon_deg += dist_nm * hdg.sin() / (60.0 * pos.lat_deg.to_radians().cos());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converge_steps_then_snaps() {
        // 10 kt/s toward 100 from 0: one tick moves by rate * DT.
        let (v, done) = converge(0.0, 100.0, 10.0);
        assert!(!done);
        assert!((v - 10.0 * DT).abs() < 1e-12);

        // Within one unit: snap and report done.
        let (v, done) = converge(99.5, 100.0, 10.0);
        assert!(done);
        assert_eq!(v, 100.0);
    }

    #[test]
    fn test_converge_never_overshoots() {
        let mut v = 0.0;
        loop {
            let (next, done) = converge(v, 50.0, 1000.0);
            assert!(next <= 50.0, "overshot: {next}");
            v = next;
            if done {
                break;
            }
        }
        assert_eq!(v, 50.0);
    }
}
