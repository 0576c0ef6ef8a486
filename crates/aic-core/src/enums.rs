//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Track identity classification shown on the tactical display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identity {
    #[default]
    Unknown,
    /// Detected but not yet evaluated by the operator.
    UnknownUnevaluated,
    Friendly,
    Hostile,
    Neutral,
    /// The operator's controlled platform. Exactly one asset carries this.
    OwnShip,
}

/// Movement regime. Fixes which vertical channel applies (altitude vs depth)
/// and the default performance limits.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Domain {
    #[default]
    Air,
    Surface,
    SubSurface,
    Land,
}

/// Sensor systems the operator can toggle on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorSystem {
    Radar,
    Esm,
    Iff,
}

/// Simulation run state. Pausing halts both periodic schedules; all
/// persistent state is retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}
