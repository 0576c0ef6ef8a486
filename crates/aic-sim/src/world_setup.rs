//! Spawn factories and snapshot reload.
//!
//! Builds asset entities with the full component bundle from serialized
//! `AssetState` records, clamping kinematic values to the resolved limits so
//! a snapshot can never introduce an out-of-envelope asset.

use hecs::World;

use aic_core::components::*;
use aic_core::enums::{Domain, Identity};
use aic_core::geo::{self, Geo};
use aic_core::platform::PlatformCatalog;
use aic_core::state::{AssetState, ScenarioSnapshot};

use crate::systems::kinematics;

/// Default own ship used when no scenario has been loaded (and for baseline
/// snapshots of a fresh console).
pub fn default_own_ship() -> AssetState {
    AssetState {
        id: 1,
        name: "OWNSHIP".to_string(),
        identity: Identity::OwnShip,
        domain: Domain::Air,
        platform: None,
        pos: Geo::new(26.0, 54.0),
        heading_deg: 0.0,
        speed_kt: 0.0,
        altitude_ft: 20_000.0,
        depth_ft: 0.0,
        target_heading: None,
        target_speed: None,
        target_altitude: None,
        target_depth: None,
        waypoints: Vec::new(),
        track_number: None,
        emitters_on: Default::default(),
        iff: IffTransponder::default(),
        datalink: DatalinkFit::default(),
    }
}

/// Spawn one asset from its serialized state. Heading is normalized and the
/// scalar channels are clamped to the resolved limits on the way in.
pub fn spawn_asset(world: &mut World, catalog: &PlatformCatalog, state: &AssetState) -> hecs::Entity {
    let is_own_ship = state.identity == Identity::OwnShip;

    let info = AssetInfo {
        name: state.name.clone(),
        identity: state.identity,
        domain: state.domain,
        platform: state.platform.clone(),
    };
    let limits = kinematics::resolve_limits(&info, catalog, is_own_ship);

    let kin = Kinematics {
        heading_deg: geo::normalize_heading(state.heading_deg),
        speed_kt: state.speed_kt.clamp(0.0, limits.max_speed_kt),
        altitude_ft: state.altitude_ft.clamp(0.0, limits.max_altitude_ft),
        depth_ft: state.depth_ft.clamp(0.0, limits.max_depth_ft),
        target_heading: state.target_heading.map(geo::normalize_heading),
        target_speed: state.target_speed,
        target_altitude: state.target_altitude,
        target_depth: state.target_depth,
    };

    let route = NavRoute {
        waypoints: state.waypoints.iter().copied().collect(),
    };
    let switches = EmitterSwitches {
        on: state.emitters_on.clone(),
    };

    let entity = world.spawn((
        AssetId(state.id),
        info,
        state.pos,
        kin,
        route,
        switches,
        state.iff.clone(),
        state.datalink.clone(),
        TrackLabel(state.track_number.clone()),
    ));
    if is_own_ship {
        world.insert_one(entity, OwnShip).ok();
    }
    entity
}

/// Rebuild the world from a scenario snapshot. Returns the next free asset
/// id. A snapshot without an own-ship entry gets the default one, so the
/// one-own-ship invariant survives malformed or legacy scenarios.
pub fn load(world: &mut World, catalog: &PlatformCatalog, snapshot: &ScenarioSnapshot) -> u64 {
    world.clear();

    let mut next_id = 1;
    let mut has_own_ship = false;
    for state in &snapshot.assets {
        if state.identity == Identity::OwnShip && has_own_ship {
            // Only the first own-ship entry keeps the role; duplicates in a
            // hand-edited scenario are demoted to plain unknown tracks.
            let mut demoted = state.clone();
            demoted.identity = Identity::Unknown;
            spawn_asset(world, catalog, &demoted);
        } else {
            spawn_asset(world, catalog, state);
            has_own_ship |= state.identity == Identity::OwnShip;
        }
        next_id = next_id.max(state.id + 1);
    }

    if !has_own_ship {
        let mut own = default_own_ship();
        own.id = next_id;
        next_id += 1;
        spawn_asset(world, catalog, &own);
    }
    next_id
}

/// Serialize the current roster, sorted by asset id.
pub fn export_roster(world: &World) -> Vec<AssetState> {
    let mut roster: Vec<AssetState> = world
        .query::<(
            &AssetId,
            &AssetInfo,
            &Geo,
            &Kinematics,
            &NavRoute,
            &EmitterSwitches,
            &IffTransponder,
            &DatalinkFit,
        )>()
        .iter()
        .map(|(entity, (id, info, pos, kin, route, switches, iff, fit))| {
            let label = world
                .get::<&TrackLabel>(entity)
                .map(|l| l.0.clone())
                .unwrap_or_default();
            AssetState {
                id: id.0,
                name: info.name.clone(),
                identity: info.identity,
                domain: info.domain,
                platform: info.platform.clone(),
                pos: *pos,
                heading_deg: kin.heading_deg,
                speed_kt: kin.speed_kt,
                altitude_ft: kin.altitude_ft,
                depth_ft: kin.depth_ft,
                target_heading: kin.target_heading,
                target_speed: kin.target_speed,
                target_altitude: kin.target_altitude,
                target_depth: kin.target_depth,
                waypoints: route.waypoints.iter().copied().collect(),
                track_number: label,
                emitters_on: switches.on.clone(),
                iff: iff.clone(),
                datalink: fit.clone(),
            }
        })
        .collect();
    roster.sort_by_key(|a| a.id);
    roster
}
