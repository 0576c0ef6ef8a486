//! Simulation engine: owns the hecs world and drives every subsystem.
//!
//! `SimEngine` applies operator commands synchronously (validated at this
//! boundary; a rejected command is a no-op), runs the subsystem list in a
//! fixed order at the 60 Hz tick, advances the 1 Hz mission clock, and
//! rebuilds the datalink picture whenever its inputs change. Completely
//! headless, enabling deterministic testing.

use std::collections::BTreeSet;

use hecs::World;
use tracing::{debug, info};

use aic_core::commands::{CommandError, ConsoleCommand};
use aic_core::components::*;
use aic_core::constants::*;
use aic_core::contacts::{IffReturn, ManualBearingLine, RadarReturn};
use aic_core::enums::{Domain, Identity, RunState, SensorSystem};
use aic_core::geo::{self, Geo};
use aic_core::platform::PlatformCatalog;
use aic_core::state::{ConsoleDatalink, ScenarioSnapshot, SensorSettings, SimView};

use crate::systems::{self, datalink, esm::EsmStore, kinematics};
use crate::world_setup;

pub struct SimEngine {
    world: World,
    catalog: PlatformCatalog,
    tick: u64,
    run_state: RunState,

    mission_clock_secs: u64,
    clock_subtick: u32,

    settings: SensorSettings,
    console: ConsoleDatalink,
    sweep_deg: f64,

    radar_returns: Vec<RadarReturn>,
    iff_returns: Vec<IffReturn>,
    esm: EsmStore,

    bearing_lines: Vec<ManualBearingLine>,
    next_line_serial: u32,
    bullseye: Option<Geo>,

    /// Asset ids already issued a number under the current console config.
    issued: BTreeSet<AssetId>,
    issued_count: u32,

    next_asset_id: u64,
    /// Last-loaded scenario; Restart reverts to this.
    baseline: ScenarioSnapshot,
}

impl SimEngine {
    /// Create an engine with a default own ship and an empty air picture.
    pub fn new(catalog: PlatformCatalog) -> Self {
        let baseline = ScenarioSnapshot {
            assets: vec![world_setup::default_own_ship()],
            ..Default::default()
        };
        let mut engine = Self {
            world: World::new(),
            catalog,
            tick: 0,
            run_state: RunState::Paused,
            mission_clock_secs: 0,
            clock_subtick: 0,
            settings: SensorSettings::default(),
            console: ConsoleDatalink::default(),
            sweep_deg: 0.0,
            radar_returns: Vec::new(),
            iff_returns: Vec::new(),
            esm: EsmStore::default(),
            bearing_lines: Vec::new(),
            next_line_serial: 1,
            bullseye: None,
            issued: BTreeSet::new(),
            issued_count: 0,
            next_asset_id: 1,
            baseline,
        };
        engine.reset_to(&engine.baseline.clone());
        engine
    }

    /// Reinitialize the whole engine from a scenario snapshot. This becomes
    /// the new baseline for `Restart`.
    pub fn load_snapshot(&mut self, snapshot: ScenarioSnapshot) {
        info!(assets = snapshot.assets.len(), "loading scenario snapshot");
        self.reset_to(&snapshot);
        self.baseline = snapshot;
    }

    /// Export the complete world state.
    pub fn export_snapshot(&self) -> ScenarioSnapshot {
        ScenarioSnapshot {
            mission_clock_secs: self.mission_clock_secs,
            assets: world_setup::export_roster(&self.world),
            settings: self.settings.clone(),
            console: self.console.clone(),
            bullseye: self.bullseye,
            bearing_lines: self.bearing_lines.clone(),
        }
    }

    /// Advance the simulation by one tick and return the display view.
    /// Ticking while paused returns the unchanged view.
    pub fn tick(&mut self) -> SimView {
        if self.run_state == RunState::Running {
            self.run_systems();
            self.tick += 1;
            self.clock_subtick += 1;
            if self.clock_subtick == TICK_RATE {
                self.clock_subtick = 0;
                self.mission_clock_secs += 1;
            }
        }
        self.view()
    }

    /// Build the current display view without advancing time.
    pub fn view(&self) -> SimView {
        systems::view::build(
            &self.world,
            self.tick,
            self.mission_clock_secs,
            self.run_state,
            self.sweep_deg,
            &self.settings,
            &self.radar_returns,
            &self.iff_returns,
            &self.esm.contacts,
            &self.bearing_lines,
            self.bullseye,
        )
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn mission_clock_secs(&self) -> u64 {
        self.mission_clock_secs
    }

    pub fn settings(&self) -> &SensorSettings {
        &self.settings
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Run all subsystems in their fixed order.
    fn run_systems(&mut self) {
        // 1. Channel convergence + position propagation.
        systems::kinematics::run(&mut self.world, &self.catalog);
        // 2. Waypoint capture and heading retargeting.
        systems::navigation::run(&mut self.world);
        // 3. Sweep advance.
        self.sweep_deg = geo::normalize_heading(self.sweep_deg + SWEEP_DEG_PER_TICK);
        // 4-6. Contact generation.
        if self.settings.radar_enabled {
            systems::radar::run(&self.world, self.sweep_deg, self.tick, &mut self.radar_returns);
        }
        if self.settings.iff_enabled {
            systems::iff::run(&self.world, self.sweep_deg, self.tick, &mut self.iff_returns);
        }
        if self.settings.esm_enabled {
            systems::esm::run(&self.world, &self.catalog, self.tick, &mut self.esm);
        }
        // 7. Age out radar and IFF returns under the shared window.
        let window_ticks = (self.settings.decay_window_secs * TICK_RATE as f64) as u64;
        systems::radar::purge(&mut self.radar_returns, self.tick, window_ticks);
        systems::iff::purge(&mut self.iff_returns, self.tick, window_ticks);
    }

    /// Apply one operator command. Validation happens here, at the boundary;
    /// a rejected command leaves the world untouched.
    pub fn apply(&mut self, command: ConsoleCommand) -> Result<(), CommandError> {
        match command {
            ConsoleCommand::SetHeading { id, heading_deg } => {
                if !heading_deg.is_finite() {
                    return Err(CommandError::InvalidValue);
                }
                let target = geo::normalize_heading(heading_deg);
                self.with_kinematics(id, |kin, _| kin.target_heading = Some(target))
            }
            ConsoleCommand::SetSpeed { id, speed_kt } => {
                if !speed_kt.is_finite() || speed_kt < 0.0 {
                    return Err(CommandError::InvalidValue);
                }
                self.with_kinematics(id, |kin, limits| {
                    kin.target_speed = Some(speed_kt.min(limits.max_speed_kt));
                })
            }
            ConsoleCommand::SetAltitude { id, altitude_ft } => {
                if !altitude_ft.is_finite() || altitude_ft < 0.0 {
                    return Err(CommandError::InvalidValue);
                }
                self.with_vertical(id, Domain::Air, move |kin, limits| {
                    kin.target_altitude = Some(altitude_ft.min(limits.max_altitude_ft));
                })
            }
            ConsoleCommand::SetDepth { id, depth_ft } => {
                if !depth_ft.is_finite() || depth_ft < 0.0 {
                    return Err(CommandError::InvalidValue);
                }
                self.with_vertical(id, Domain::SubSurface, move |kin, limits| {
                    kin.target_depth = Some(depth_ft.min(limits.max_depth_ft));
                })
            }
            ConsoleCommand::SetPosition { id, pos } => {
                validate_coords(&pos)?;
                for (_e, (aid, kin, asset_pos, route)) in self
                    .world
                    .query_mut::<(&AssetId, &mut Kinematics, &mut Geo, &NavRoute)>()
                {
                    if *aid != id {
                        continue;
                    }
                    *asset_pos = pos;
                    // Repositioning overrides the tick-driven retarget.
                    if let Some(head) = route.waypoints.front() {
                        kin.target_heading = Some(geo::bearing(&pos, head));
                    }
                    return Ok(());
                }
                Err(CommandError::UnknownAsset(id))
            }
            ConsoleCommand::SetFirstWaypoint { id, point } => {
                validate_coords(&point)?;
                for (_e, (aid, kin, pos, route)) in self
                    .world
                    .query_mut::<(&AssetId, &mut Kinematics, &Geo, &mut NavRoute)>()
                {
                    if *aid != id {
                        continue;
                    }
                    route.waypoints.clear();
                    route.waypoints.push_back(point);
                    kin.target_heading = Some(geo::bearing(pos, &point));
                    return Ok(());
                }
                Err(CommandError::UnknownAsset(id))
            }
            ConsoleCommand::AppendWaypoint { id, point } => {
                validate_coords(&point)?;
                for (_e, (aid, route)) in self.world.query_mut::<(&AssetId, &mut NavRoute)>() {
                    if *aid == id {
                        route.waypoints.push_back(point);
                        return Ok(());
                    }
                }
                Err(CommandError::UnknownAsset(id))
            }
            ConsoleCommand::MoveWaypoint { id, index, point } => {
                validate_coords(&point)?;
                for (_e, (aid, kin, pos, route)) in self
                    .world
                    .query_mut::<(&AssetId, &mut Kinematics, &Geo, &mut NavRoute)>()
                {
                    if *aid != id {
                        continue;
                    }
                    let Some(wp) = route.waypoints.get_mut(index) else {
                        return Err(CommandError::BadWaypointIndex(index));
                    };
                    *wp = point;
                    if index == 0 {
                        kin.target_heading = Some(geo::bearing(pos, &point));
                    }
                    return Ok(());
                }
                Err(CommandError::UnknownAsset(id))
            }
            ConsoleCommand::RemoveWaypoint { id, index } => {
                for (_e, (aid, kin, pos, route)) in self
                    .world
                    .query_mut::<(&AssetId, &mut Kinematics, &Geo, &mut NavRoute)>()
                {
                    if *aid != id {
                        continue;
                    }
                    if index >= route.waypoints.len() {
                        return Err(CommandError::BadWaypointIndex(index));
                    }
                    route.waypoints.remove(index);
                    if index == 0 {
                        kin.target_heading = route
                            .waypoints
                            .front()
                            .map(|head| geo::bearing(pos, head));
                    }
                    return Ok(());
                }
                Err(CommandError::UnknownAsset(id))
            }
            ConsoleCommand::SetIdentity { id, identity } => {
                if identity == Identity::OwnShip {
                    return Err(CommandError::InvalidValue);
                }
                for (_e, (aid, info, own)) in self
                    .world
                    .query_mut::<(&AssetId, &mut AssetInfo, Option<&OwnShip>)>()
                {
                    if *aid != id {
                        continue;
                    }
                    if own.is_some() {
                        return Err(CommandError::OwnShipProtected);
                    }
                    info.identity = identity;
                    return Ok(());
                }
                Err(CommandError::UnknownAsset(id))
            }
            ConsoleCommand::CreateAsset {
                name,
                identity,
                domain,
                platform,
                pos,
                heading_deg,
                speed_kt,
                altitude_ft,
                depth_ft,
            } => {
                validate_coords(&pos)?;
                if identity == Identity::OwnShip {
                    return Err(CommandError::OwnShipProtected);
                }
                if !heading_deg.is_finite()
                    || !speed_kt.is_finite()
                    || speed_kt < 0.0
                    || !altitude_ft.is_finite()
                    || !depth_ft.is_finite()
                {
                    return Err(CommandError::InvalidValue);
                }
                if let Some(p) = &platform {
                    if self.catalog.get(domain, p).is_none() {
                        return Err(CommandError::UnknownPlatform(p.clone()));
                    }
                }

                let id = self.next_asset_id;
                self.next_asset_id += 1;
                let mut state = world_setup::default_own_ship();
                state.id = id;
                state.name = name;
                state.identity = identity;
                state.domain = domain;
                state.platform = platform;
                state.pos = pos;
                state.heading_deg = geo::normalize_heading(heading_deg);
                state.speed_kt = speed_kt;
                state.altitude_ft = altitude_ft;
                state.depth_ft = depth_ft;
                world_setup::spawn_asset(&mut self.world, &self.catalog, &state);
                debug!(id, "asset created");

                datalink::refresh(&mut self.world, &self.console);
                Ok(())
            }
            ConsoleCommand::DeleteAsset { id } => {
                let mut found = None;
                for (entity, (aid, own)) in
                    self.world.query::<(&AssetId, Option<&OwnShip>)>().iter()
                {
                    if *aid == id {
                        if own.is_some() {
                            return Err(CommandError::OwnShipProtected);
                        }
                        found = Some(entity);
                        break;
                    }
                }
                let entity = found.ok_or(CommandError::UnknownAsset(id))?;
                let _ = self.world.despawn(entity);
                self.issued.remove(&id);
                datalink::refresh(&mut self.world, &self.console);
                Ok(())
            }
            ConsoleCommand::SetSensor { system, enabled } => {
                match system {
                    SensorSystem::Radar => self.settings.radar_enabled = enabled,
                    SensorSystem::Iff => self.settings.iff_enabled = enabled,
                    SensorSystem::Esm => {
                        self.settings.esm_enabled = enabled;
                        if !enabled {
                            // Dropping ESM clears the picture and restarts
                            // the serial sequence.
                            self.esm.clear();
                        }
                    }
                }
                Ok(())
            }
            ConsoleCommand::SetDecayWindow { secs } => {
                if !secs.is_finite() {
                    return Err(CommandError::InvalidValue);
                }
                self.settings.decay_window_secs =
                    secs.clamp(DECAY_WINDOW_MIN_SECS, DECAY_WINDOW_MAX_SECS);
                Ok(())
            }
            ConsoleCommand::SetRadarIntensity { value } => {
                self.settings.radar_intensity = validate_unit(value)?;
                Ok(())
            }
            ConsoleCommand::SetIffIntensity { value } => {
                self.settings.iff_intensity = validate_unit(value)?;
                Ok(())
            }
            ConsoleCommand::SetSweepOpacity { value } => {
                self.settings.sweep_opacity = validate_unit(value)?;
                Ok(())
            }
            ConsoleCommand::SetEmitter { id, emitter, on } => {
                for (_e, (aid, info, switches)) in self
                    .world
                    .query_mut::<(&AssetId, &AssetInfo, &mut EmitterSwitches)>()
                {
                    if *aid != id {
                        continue;
                    }
                    let known = info
                        .platform
                        .as_deref()
                        .and_then(|name| self.catalog.get(info.domain, name))
                        .is_some_and(|p| p.emitters.contains(&emitter));
                    if !known {
                        return Err(CommandError::UnknownEmitter(emitter));
                    }
                    switches.on.insert(emitter, on);
                    return Ok(());
                }
                Err(CommandError::UnknownAsset(id))
            }
            ConsoleCommand::SetIffConfig {
                id,
                mode1,
                mode2,
                mode3,
                mode4,
                squawk,
            } => {
                if !is_octal(&mode1, 2) || !is_octal(&mode2, 4) || !is_octal(&mode3, 4) {
                    return Err(CommandError::InvalidCode);
                }
                for (_e, (aid, iff)) in
                    self.world.query_mut::<(&AssetId, &mut IffTransponder)>()
                {
                    if *aid == id {
                        iff.mode1 = mode1;
                        iff.mode2 = mode2;
                        iff.mode3 = mode3;
                        iff.mode4 = mode4;
                        iff.squawk = squawk;
                        return Ok(());
                    }
                }
                Err(CommandError::UnknownAsset(id))
            }
            ConsoleCommand::SetEsmContactVisible { serial, visible } => {
                match self.esm.contacts.iter_mut().find(|c| c.serial == serial) {
                    Some(contact) => {
                        contact.visible = visible;
                        Ok(())
                    }
                    None => Err(CommandError::UnknownContact(serial)),
                }
            }
            ConsoleCommand::DropBearingLine { bearing_deg } => {
                if !bearing_deg.is_finite() {
                    return Err(CommandError::InvalidValue);
                }
                let origin = systems::radar::own_ship_fix(&self.world)
                    .map(|fix| fix.pos)
                    .unwrap_or_default();
                let serial = self.next_line_serial;
                self.next_line_serial += 1;
                self.bearing_lines.push(ManualBearingLine {
                    serial,
                    bearing_deg: geo::normalize_heading(bearing_deg),
                    origin,
                });
                Ok(())
            }
            ConsoleCommand::SetConsoleDatalink {
                net,
                ju,
                block_start,
                block_end,
            } => {
                if !datalink::is_ju(&ju) {
                    return Err(CommandError::InvalidCode);
                }
                if net.trim().is_empty() || block_start > block_end {
                    return Err(CommandError::InvalidValue);
                }
                self.console = ConsoleDatalink {
                    net,
                    ju,
                    block_start: Some(block_start),
                    block_end: Some(block_end),
                };
                // A reconfigured console starts a fresh issuance ledger.
                self.issued.clear();
                self.issued_count = 0;
                datalink::refresh(&mut self.world, &self.console);
                Ok(())
            }
            ConsoleCommand::SetAssetDatalink {
                id,
                net,
                ju,
                block_start,
                block_end,
            } => {
                if !ju.is_empty() && !datalink::is_ju(&ju) {
                    return Err(CommandError::InvalidCode);
                }
                let mut found = false;
                for (_e, (aid, fit)) in self.world.query_mut::<(&AssetId, &mut DatalinkFit)>() {
                    if *aid == id {
                        fit.net = net.clone();
                        fit.ju = ju.clone();
                        fit.block_start = block_start;
                        fit.block_end = block_end;
                        found = true;
                        break;
                    }
                }
                if !found {
                    return Err(CommandError::UnknownAsset(id));
                }
                datalink::refresh(&mut self.world, &self.console);
                Ok(())
            }
            ConsoleCommand::ReportTrack { id } => self.report_track(id),
            ConsoleCommand::SetBullseye { pos } => {
                if let Some(p) = &pos {
                    validate_coords(p)?;
                }
                self.bullseye = pos;
                Ok(())
            }
            ConsoleCommand::Start => {
                self.run_state = RunState::Running;
                Ok(())
            }
            ConsoleCommand::Stop => {
                self.run_state = RunState::Paused;
                Ok(())
            }
            ConsoleCommand::Restart => {
                info!("restarting scenario from baseline");
                let baseline = self.baseline.clone();
                self.reset_to(&baseline);
                Ok(())
            }
        }
    }

    /// Assign the next sequential number from the console track block.
    /// At most one number per asset per console configuration.
    fn report_track(&mut self, id: AssetId) -> Result<(), CommandError> {
        if !datalink::console_configured(&self.console) {
            return Err(CommandError::DatalinkNotConfigured);
        }
        let block_start = self.console.block_start.unwrap_or(0);
        let block_end = self.console.block_end.unwrap_or(0);

        let mut result = Err(CommandError::UnknownAsset(id));
        for (_e, (aid, fit, label, own)) in self.world.query_mut::<(
            &AssetId,
            &DatalinkFit,
            &mut TrackLabel,
            Option<&OwnShip>,
        )>() {
            if *aid != id {
                continue;
            }
            if own.is_some() {
                result = Err(CommandError::OwnShipProtected);
                break;
            }
            if datalink::in_network(fit, &self.console.net) {
                result = Err(CommandError::AlreadyInNetwork);
                break;
            }
            if self.issued.contains(&id) {
                result = Err(CommandError::AlreadyReported);
                break;
            }
            let number = block_start + self.issued_count;
            if number > block_end {
                result = Err(CommandError::TrackBlockExhausted);
                break;
            }
            label.0 = Some(number.to_string());
            self.issued.insert(id);
            self.issued_count += 1;
            debug!(?id, number, "track reported");
            result = Ok(());
            break;
        }
        result
    }

    /// Hard reset to a snapshot: roster rebuilt, all ephemeral contacts
    /// cleared, datalink picture recomputed, clock restored, sim paused.
    fn reset_to(&mut self, snapshot: &ScenarioSnapshot) {
        self.next_asset_id = world_setup::load(&mut self.world, &self.catalog, snapshot);
        self.tick = 0;
        self.run_state = RunState::Paused;
        self.mission_clock_secs = snapshot.mission_clock_secs;
        self.clock_subtick = 0;
        self.settings = snapshot.settings.clone();
        self.console = snapshot.console.clone();
        self.sweep_deg = 0.0;
        self.radar_returns.clear();
        self.iff_returns.clear();
        self.esm = EsmStore::default();
        self.bearing_lines = snapshot.bearing_lines.clone();
        self.next_line_serial = self
            .bearing_lines
            .iter()
            .map(|l| l.serial + 1)
            .max()
            .unwrap_or(1);
        self.bullseye = snapshot.bullseye;
        self.issued.clear();
        self.issued_count = 0;
        datalink::refresh(&mut self.world, &self.console);
    }

    /// Mutate an asset's kinematics with its resolved limits in hand.
    fn with_kinematics<F>(&mut self, id: AssetId, f: F) -> Result<(), CommandError>
    where
        F: FnOnce(&mut Kinematics, &kinematics::Limits),
    {
        for (_e, (aid, info, kin, own)) in self
            .world
            .query_mut::<(&AssetId, &AssetInfo, &mut Kinematics, Option<&OwnShip>)>()
        {
            if *aid == id {
                let limits = kinematics::resolve_limits(info, &self.catalog, own.is_some());
                f(kin, &limits);
                return Ok(());
            }
        }
        Err(CommandError::UnknownAsset(id))
    }

    /// Like `with_kinematics`, but requires the asset's domain to expose the
    /// vertical channel being commanded.
    fn with_vertical<F>(
        &mut self,
        id: AssetId,
        required: Domain,
        f: F,
    ) -> Result<(), CommandError>
    where
        F: FnOnce(&mut Kinematics, &kinematics::Limits),
    {
        for (_e, (aid, info, kin, own)) in self
            .world
            .query_mut::<(&AssetId, &AssetInfo, &mut Kinematics, Option<&OwnShip>)>()
        {
            if *aid == id {
                if info.domain != required {
                    return Err(CommandError::WrongDomain(info.domain));
                }
                let limits = kinematics::resolve_limits(info, &self.catalog, own.is_some());
                f(kin, &limits);
                return Ok(());
            }
        }
        Err(CommandError::UnknownAsset(id))
    }
}

/// Reject coordinates outside the valid lat/lon ranges (or non-finite).
fn validate_coords(pos: &Geo) -> Result<(), CommandError> {
    let ok = pos.lat_deg.is_finite()
        && pos.lon_deg.is_finite()
        && (-90.0..=90.0).contains(&pos.lat_deg)
        && (-180.0..=180.0).contains(&pos.lon_deg);
    if ok {
        Ok(())
    } else {
        Err(CommandError::InvalidCoordinates)
    }
}

/// Validate a display setting in [0, 1].
fn validate_unit(value: f64) -> Result<f64, CommandError> {
    if value.is_finite() {
        Ok(value.clamp(0.0, 1.0))
    } else {
        Err(CommandError::InvalidValue)
    }
}

/// A transponder code is `len` octal digits.
fn is_octal(code: &str, len: usize) -> bool {
    code.len() == len && code.bytes().all(|b| (b'0'..=b'7').contains(&b))
}
