//! Operator console commands and their rejection errors.
//!
//! Commands are validated at the engine boundary and applied synchronously.
//! An invalid command is a no-op that returns a `CommandError`; it never
//! leaves the world partially updated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::AssetId;
use crate::enums::{Domain, Identity, SensorSystem};
use crate::geo::Geo;

/// All operator actions on the simulation core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConsoleCommand {
    // --- Maneuvering ---
    /// Set a target heading; the asset turns at its rated rate.
    SetHeading { id: AssetId, heading_deg: f64 },
    SetSpeed { id: AssetId, speed_kt: f64 },
    /// Air assets only.
    SetAltitude { id: AssetId, altitude_ft: f64 },
    /// Subsurface assets only.
    SetDepth { id: AssetId, depth_ft: f64 },
    /// Manually reposition; retargets heading toward the current waypoint
    /// head if one exists.
    SetPosition { id: AssetId, pos: Geo },

    // --- Navigation ---
    /// Replace the whole queue with one waypoint and retarget immediately.
    SetFirstWaypoint { id: AssetId, point: Geo },
    /// Push to the tail without touching the current heading target.
    AppendWaypoint { id: AssetId, point: Geo },
    /// Edit the waypoint at `index` in place.
    MoveWaypoint { id: AssetId, index: usize, point: Geo },
    RemoveWaypoint { id: AssetId, index: usize },

    // --- Identity / roster ---
    SetIdentity { id: AssetId, identity: Identity },
    CreateAsset {
        name: String,
        identity: Identity,
        domain: Domain,
        platform: Option<String>,
        pos: Geo,
        heading_deg: f64,
        speed_kt: f64,
        altitude_ft: f64,
        depth_ft: f64,
    },
    DeleteAsset { id: AssetId },

    // --- Sensors ---
    SetSensor { system: SensorSystem, enabled: bool },
    /// Shared radar/IFF decay window, clamped to 10-60 s.
    SetDecayWindow { secs: f64 },
    SetRadarIntensity { value: f64 },
    SetIffIntensity { value: f64 },
    SetSweepOpacity { value: f64 },
    SetEmitter { id: AssetId, emitter: String, on: bool },
    SetIffConfig {
        id: AssetId,
        mode1: String,
        mode2: String,
        mode3: String,
        mode4: bool,
        squawk: bool,
    },
    SetEsmContactVisible { serial: u32, visible: bool },
    /// Drop a line of bearing from own ship's current position.
    DropBearingLine { bearing_deg: f64 },

    // --- Datalink ---
    SetConsoleDatalink {
        net: String,
        ju: String,
        block_start: u32,
        block_end: u32,
    },
    SetAssetDatalink {
        id: AssetId,
        net: String,
        ju: String,
        block_start: Option<u32>,
        block_end: Option<u32>,
    },
    /// Assign the next number from the console track block to an asset.
    ReportTrack { id: AssetId },

    // --- Annotations ---
    SetBullseye { pos: Option<Geo> },

    // --- Run control ---
    Start,
    Stop,
    /// Hard reset: clears all contacts and reloads the baseline snapshot.
    Restart,
}

/// Why a command was rejected. The world state is unchanged on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CommandError {
    #[error("no asset with id {0:?}")]
    UnknownAsset(AssetId),
    #[error("operation not permitted on own ship")]
    OwnShipProtected,
    #[error("channel not available in domain {0:?}")]
    WrongDomain(Domain),
    #[error("coordinates out of range")]
    InvalidCoordinates,
    #[error("malformed transponder or JU code")]
    InvalidCode,
    #[error("value out of range or not finite")]
    InvalidValue,
    #[error("unknown platform '{0}'")]
    UnknownPlatform(String),
    #[error("unknown emitter '{0}'")]
    UnknownEmitter(String),
    #[error("no waypoint at index {0}")]
    BadWaypointIndex(usize),
    #[error("unknown ESM contact serial {0}")]
    UnknownContact(u32),
    #[error("console datalink is not fully configured")]
    DatalinkNotConfigured,
    #[error("asset already participates in the console network")]
    AlreadyInNetwork,
    #[error("asset was already assigned a number from this block")]
    AlreadyReported,
    #[error("track block exhausted")]
    TrackBlockExhausted,
}
