//! Sensor contact records.
//!
//! These are created and expired only by per-tick sensor evaluation; nothing
//! outside the engine mutates them. Radar and IFF returns are ephemeral and
//! age out under the shared decay window; ESM contacts persist inactive so
//! their age stays visible to the operator.

use serde::{Deserialize, Serialize};

use crate::components::AssetId;
use crate::geo::Geo;

/// One radar paint, created when the sweep crosses a detectable asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarReturn {
    pub asset_id: AssetId,
    /// Position snapshot at paint time.
    pub pos: Geo,
    pub bearing_deg: f64,
    pub distance_nm: f64,
    /// Mission tick at creation; the return is purged once its age
    /// reaches the decay window.
    pub tick: u64,
}

/// One transponder reply. Same gating as radar plus the squawk precondition;
/// decays under the same window as radar returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IffReturn {
    pub asset_id: AssetId,
    pub pos: Geo,
    pub bearing_deg: f64,
    pub distance_nm: f64,
    pub tick: u64,
    pub mode1: String,
    pub mode2: String,
    pub mode3: String,
    pub mode4: bool,
}

/// Persistent passive emitter contact, keyed by (asset, emitter name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedEmitter {
    /// Assigned once on first detection, monotonically increasing per
    /// session, never reused.
    pub serial: u32,
    pub asset_id: AssetId,
    pub emitter: String,
    pub bearing_deg: f64,
    pub pos: Geo,
    pub last_seen_tick: u64,
    /// False once the emitter is no longer observed; the contact is kept.
    pub active: bool,
    /// Operator display visibility toggle.
    pub visible: bool,
}

/// Operator-dropped line of bearing. An immutable annotation, not derived
/// from ongoing world state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualBearingLine {
    pub serial: u32,
    pub bearing_deg: f64,
    pub origin: Geo,
}
