//! Headless simulation engine for the AIC trainer.
//!
//! Owns the hecs ECS world, runs subsystems in a fixed order at the 60 Hz
//! tick, applies operator commands synchronously, and exports scenario
//! snapshots. No UI or runtime framework dependency.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use aic_core as core;
pub use engine::SimEngine;
