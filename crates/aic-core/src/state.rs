//! Scenario snapshot and per-tick display view.
//!
//! `ScenarioSnapshot` is the complete serializable world state. The on-disk
//! format and persistence layer live outside the core; the core only exports
//! this value and reinitializes from one. Fields added after early scenario
//! versions carry serde defaults so older snapshots still load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::{AssetId, DatalinkFit, IffTransponder};
use crate::constants::DECAY_WINDOW_DEFAULT_SECS;
use crate::contacts::{DetectedEmitter, IffReturn, ManualBearingLine, RadarReturn};
use crate::enums::{Domain, Identity, RunState};
use crate::geo::Geo;

/// Serializable state of one asset in the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetState {
    pub id: u64,
    pub name: String,
    pub identity: Identity,
    #[serde(default)]
    pub domain: Domain,
    #[serde(default)]
    pub platform: Option<String>,
    pub pos: Geo,
    pub heading_deg: f64,
    pub speed_kt: f64,
    #[serde(default)]
    pub altitude_ft: f64,
    #[serde(default)]
    pub depth_ft: f64,
    #[serde(default)]
    pub target_heading: Option<f64>,
    #[serde(default)]
    pub target_speed: Option<f64>,
    #[serde(default)]
    pub target_altitude: Option<f64>,
    #[serde(default)]
    pub target_depth: Option<f64>,
    #[serde(default)]
    pub waypoints: Vec<Geo>,
    #[serde(default)]
    pub track_number: Option<String>,
    #[serde(default)]
    pub emitters_on: BTreeMap<String, bool>,
    #[serde(default)]
    pub iff: IffTransponder,
    #[serde(default)]
    pub datalink: DatalinkFit,
}

/// Operator-adjustable sensor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSettings {
    pub radar_enabled: bool,
    pub esm_enabled: bool,
    pub iff_enabled: bool,
    /// Shared radar/IFF decay window in seconds.
    pub decay_window_secs: f64,
    pub radar_intensity: f64,
    pub iff_intensity: f64,
    pub sweep_opacity: f64,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            radar_enabled: true,
            esm_enabled: true,
            iff_enabled: true,
            decay_window_secs: DECAY_WINDOW_DEFAULT_SECS,
            radar_intensity: 0.8,
            iff_intensity: 0.8,
            sweep_opacity: 0.5,
        }
    }
}

/// Console-wide datalink configuration. Track numbers are issued from this
/// single block; there is no per-entity issuance configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleDatalink {
    pub net: String,
    pub ju: String,
    pub block_start: Option<u32>,
    pub block_end: Option<u32>,
}

/// The complete serializable world state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub mission_clock_secs: u64,
    pub assets: Vec<AssetState>,
    #[serde(default)]
    pub settings: SensorSettings,
    #[serde(default)]
    pub console: ConsoleDatalink,
    #[serde(default)]
    pub bullseye: Option<Geo>,
    #[serde(default)]
    pub bearing_lines: Vec<ManualBearingLine>,
}

/// One asset as shown on the display, with geometry relative to own ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetView {
    pub id: AssetId,
    pub name: String,
    pub identity: Identity,
    pub domain: Domain,
    pub platform: Option<String>,
    pub pos: Geo,
    pub heading_deg: f64,
    pub speed_kt: f64,
    pub altitude_ft: f64,
    pub depth_ft: f64,
    /// Bearing from own ship, degrees.
    pub bearing_deg: f64,
    /// Range from own ship, NM.
    pub range_nm: f64,
    pub track_number: Option<String>,
    pub datalink_active: bool,
    pub waypoints: Vec<Geo>,
}

/// Complete per-tick display state handed to the console UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimView {
    pub tick: u64,
    pub mission_clock_secs: u64,
    pub run_state: RunState,
    pub sweep_deg: f64,
    pub settings: SensorSettings,
    pub assets: Vec<AssetView>,
    pub radar_returns: Vec<RadarReturn>,
    pub iff_returns: Vec<IffReturn>,
    pub esm_contacts: Vec<DetectedEmitter>,
    pub bearing_lines: Vec<ManualBearingLine>,
    pub bullseye: Option<Geo>,
}
