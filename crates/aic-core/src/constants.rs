//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Mean earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

// --- Radar ---

/// Maximum radar detection range (NM). A contact is detectable only while
/// strictly inside this range.
pub const RADAR_MAX_RANGE_NM: f64 = 320.0;

/// Sweep advance per tick (degrees). 36 deg/s, one full revolution per 10 s.
pub const SWEEP_DEG_PER_TICK: f64 = 0.6;

/// Angular half-width of the sweep beam (degrees).
pub const BEAM_HALF_WIDTH_DEG: f64 = 1.0;

/// Two-term radar horizon coefficient:
/// `horizon_nm = 1.23 * (sqrt(h1_ft) + sqrt(h2_ft))`.
pub const HORIZON_COEFF: f64 = 1.23;

// --- Contact decay ---

/// Operator-configurable decay window bounds (seconds).
/// Radar and IFF returns share one window by design.
pub const DECAY_WINDOW_MIN_SECS: f64 = 10.0;
pub const DECAY_WINDOW_MAX_SECS: f64 = 60.0;
pub const DECAY_WINDOW_DEFAULT_SECS: f64 = 30.0;

// --- Navigation ---

/// Waypoint capture radius (NM). Reaching the head of the queue within this
/// distance pops it.
pub const WAYPOINT_CAPTURE_NM: f64 = 0.5;

/// Convergence snap threshold per scalar channel, in units of that channel
/// (degrees, knots, feet). Within this of the target, the channel snaps.
pub const CONVERGE_SNAP_UNITS: f64 = 1.0;

// --- Vertical rates ---

/// Depth change rate for subsurface assets (ft/s). Not platform-dependent.
pub const DEPTH_RATE_FT_PER_SEC: f64 = 10.0;

// --- Own ship hard caps ---

/// Own ship never exceeds these regardless of domain or platform profile.
pub const OWNSHIP_MAX_SPEED_KT: f64 = 220.0;
pub const OWNSHIP_MAX_ALTITUDE_FT: f64 = 27_000.0;
