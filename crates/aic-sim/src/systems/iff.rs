//! IFF interrogation: sweep-gated transponder replies.
//!
//! Shares the radar sweep, range, and horizon gates, with one extra
//! precondition: the target's squawk flag must be enabled. Replies decay
//! under the same window as radar returns; only the display intensity is
//! configured separately.

use hecs::World;

use aic_core::components::{AssetId, AssetInfo, IffTransponder, Kinematics, OwnShip};
use aic_core::contacts::IffReturn;
use aic_core::geo::Geo;

use crate::systems::radar;

/// Interrogate every squawking non-own-ship asset under the current sweep.
pub fn run(world: &World, sweep_deg: f64, tick: u64, returns: &mut Vec<IffReturn>) {
    let Some(own) = radar::own_ship_fix(world) else {
        return;
    };

    let mut query = world
        .query::<(&AssetId, &AssetInfo, &Geo, &Kinematics, &IffTransponder)>()
        .without::<&OwnShip>();
    for (_entity, (id, info, pos, kin, iff)) in query.iter() {
        if !iff.squawk {
            continue;
        }

        let height = radar::sensor_height_ft(info.domain, kin);
        if let Some((bearing_deg, distance_nm)) = radar::paint(&own, pos, height, sweep_deg) {
            returns.push(IffReturn {
                asset_id: *id,
                pos: *pos,
                bearing_deg,
                distance_nm,
                tick,
                mode1: iff.mode1.clone(),
                mode2: iff.mode2.clone(),
                mode3: iff.mode3.clone(),
                mode4: iff.mode4,
            });
        }
    }
}

/// Drop replies whose age has reached the shared decay window.
pub fn purge(returns: &mut Vec<IffReturn>, now: u64, window_ticks: u64) {
    returns.retain(|r| now.saturating_sub(r.tick) < window_ticks);
}
