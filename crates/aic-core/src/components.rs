//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Simulation logic lives in systems, not components.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::enums::{Domain, Identity};
use crate::geo::Geo;

/// Stable asset identifier assigned by the engine, never reused in a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AssetId(pub u64);

/// Descriptive fields of an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInfo {
    pub name: String,
    pub identity: Identity,
    pub domain: Domain,
    /// Platform profile name in the catalog, if one is assigned.
    pub platform: Option<String>,
}

/// Rate-limited scalar channels. A `Some` target converges toward its value
/// at the resolved rate, then snaps and clears.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kinematics {
    /// Always normalized to [0, 360).
    pub heading_deg: f64,
    pub speed_kt: f64,
    /// Air assets only; 0 for everything else.
    pub altitude_ft: f64,
    /// Subsurface assets only; 0 for everything else.
    pub depth_ft: f64,
    pub target_heading: Option<f64>,
    pub target_speed: Option<f64>,
    pub target_altitude: Option<f64>,
    pub target_depth: Option<f64>,
}

/// Waypoint queue. The head is the only active navigation target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavRoute {
    pub waypoints: VecDeque<Geo>,
}

/// Per-emitter on/off switches, keyed by emitter name from the platform
/// profile. Missing keys read as off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmitterSwitches {
    pub on: BTreeMap<String, bool>,
}

/// IFF transponder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IffTransponder {
    /// Mode I: two octal digits.
    pub mode1: String,
    /// Mode II: four octal digits.
    pub mode2: String,
    /// Mode III/A: four octal digits.
    pub mode3: String,
    pub mode4: bool,
    /// Squawk must be enabled for the asset to generate IFF returns.
    pub squawk: bool,
}

impl Default for IffTransponder {
    fn default() -> Self {
        Self {
            mode1: "00".to_string(),
            mode2: "0000".to_string(),
            mode3: "0000".to_string(),
            mode4: false,
            squawk: false,
        }
    }
}

/// Tactical datalink fit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatalinkFit {
    /// Network identifier, matched against the console NET.
    pub net: String,
    /// Five-digit JU unit number.
    pub ju: String,
    pub block_start: Option<u32>,
    pub block_end: Option<u32>,
    /// True while the asset satisfies the common-network predicate.
    /// Cleared when membership is lost; identity is never auto-reverted.
    #[serde(default)]
    pub active: bool,
}

/// Nullable track number shown next to the asset symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackLabel(pub Option<String>);

/// Marks the operator's own platform: origin for all sensor geometry,
/// never deletable, identity and domain immutable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OwnShip;
