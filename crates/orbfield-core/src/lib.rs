//! Orbfield Core - Foundational types for the Orbfield simulation
//!
//! This crate provides the types that all other Orbfield crates depend on:
//! - `Vec3`, `Hsl`, `HslRange` - Spatial and color types
//! - `SimulationParams` - The host-owned parameter snapshot
//! - `SettingsStore` - Range-checked parameter source for the host side
//! - `OrbfieldConfig` - Layered TOML configuration
//! - Error types and Result alias

mod config;
mod error;
mod params;
mod settings;
mod types;

pub use config::{
    OrbfieldConfig, RuntimeConfig, ZPhase, DEFAULT_REFRESH_RATE_HZ, DEFAULT_REPORT_INTERVAL_MS,
};
pub use error::{OrbfieldError, Result};
pub use params::{GenerationParams, SimulationParams};
pub use settings::{
    ParameterSource, SettingsStore, MAX_ORB_SIZE_RANGE, ORB_DENSITY_FACTOR_RANGE, XY_SPEED_RANGE,
    Z_DEPTH_RANGE,
};
pub use types::{Hsl, HslChannel, HslRange, NumberRange, Vec3};
