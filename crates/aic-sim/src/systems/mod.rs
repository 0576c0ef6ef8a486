//! Subsystems that operate on the simulation world.
//!
//! Each is a pure function over `&mut World` (or `&World` for read-only
//! contact generation) invoked by the engine in a fixed order per tick,
//! so no subsystem ever observes a partially updated world.

pub mod datalink;
pub mod esm;
pub mod iff;
pub mod kinematics;
pub mod navigation;
pub mod radar;
pub mod view;
