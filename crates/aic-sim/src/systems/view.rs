//! View builder: read-only projection of the world for the console display.
//!
//! Never modifies the world. Asset geometry (bearing/range) is computed
//! relative to own ship; rows are sorted for stable display ordering.

use hecs::World;

use aic_core::components::*;
use aic_core::contacts::{DetectedEmitter, IffReturn, ManualBearingLine, RadarReturn};
use aic_core::enums::RunState;
use aic_core::geo::{self, Geo};
use aic_core::state::{AssetView, SensorSettings, SimView};

#[allow(clippy::too_many_arguments)]
pub fn build(
    world: &World,
    tick: u64,
    mission_clock_secs: u64,
    run_state: RunState,
    sweep_deg: f64,
    settings: &SensorSettings,
    radar_returns: &[RadarReturn],
    iff_returns: &[IffReturn],
    esm_contacts: &[DetectedEmitter],
    bearing_lines: &[ManualBearingLine],
    bullseye: Option<Geo>,
) -> SimView {
    let own_pos = world
        .query::<(&OwnShip, &Geo)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
        .unwrap_or_default();

    let mut assets: Vec<AssetView> = world
        .query::<(
            &AssetId,
            &AssetInfo,
            &Geo,
            &Kinematics,
            &NavRoute,
            &TrackLabel,
            &DatalinkFit,
        )>()
        .iter()
        .map(|(_, (id, info, pos, kin, route, label, fit))| AssetView {
            id: *id,
            name: info.name.clone(),
            identity: info.identity,
            domain: info.domain,
            platform: info.platform.clone(),
            pos: *pos,
            heading_deg: kin.heading_deg,
            speed_kt: kin.speed_kt,
            altitude_ft: kin.altitude_ft,
            depth_ft: kin.depth_ft,
            bearing_deg: geo::bearing(&own_pos, pos),
            range_nm: geo::distance_nm(&own_pos, pos),
            track_number: label.0.clone(),
            datalink_active: fit.active,
            waypoints: route.waypoints.iter().copied().collect(),
        })
        .collect();
    assets.sort_by_key(|a| a.id);

    let mut esm: Vec<DetectedEmitter> = esm_contacts.to_vec();
    esm.sort_by_key(|c| c.serial);

    SimView {
        tick,
        mission_clock_secs,
        run_state,
        sweep_deg,
        settings: settings.clone(),
        assets,
        radar_returns: radar_returns.to_vec(),
        iff_returns: iff_returns.to_vec(),
        esm_contacts: esm,
        bearing_lines: bearing_lines.to_vec(),
        bullseye,
    }
}
