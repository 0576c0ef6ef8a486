//! Core types and definitions for the AIC trainer simulation.
//!
//! This crate defines the vocabulary shared across the workspace: geodesy
//! primitives, ECS components, operator commands, sensor contact records,
//! the platform catalog, and scenario snapshots. It has no dependency on
//! any runtime or UI framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod contacts;
pub mod enums;
pub mod geo;
pub mod platform;
pub mod state;
