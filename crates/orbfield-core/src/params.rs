//! Simulation parameters passed by value from the host into the simulation

use crate::types::HslRange;
use serde::{Deserialize, Serialize};

/// The five user-adjustable parameters that drive the orb field.
///
/// The simulation treats these as read-only and never validates them;
/// range checking belongs to whoever owns the values (see [`crate::SettingsStore`]).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    /// Multiplier on the upper bound of the base orb radius
    pub max_orb_size: f64,
    /// Multiplier on the area-derived orb count
    pub orb_density_factor: f64,
    /// Multiplier on x/y drift speed
    pub xy_speed: f64,
    /// Multiplier on depth travel
    pub z_depth: f64,
    /// Per-channel HSL ranges orbs are colored from
    pub orb_color_range: HslRange,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            max_orb_size: 1.0,
            orb_color_range: HslRange::default(),
            orb_density_factor: 1.0,
            xy_speed: 1.0,
            z_depth: 1.0,
        }
    }
}

impl SimulationParams {
    /// The subset of parameters that determines how orbs are spawned.
    /// A change here requires a fresh orb set; `xy_speed` alone does not.
    pub fn generation(&self) -> GenerationParams {
        GenerationParams {
            max_orb_size: self.max_orb_size,
            orb_color_range: self.orb_color_range,
            orb_density_factor: self.orb_density_factor,
            z_depth: self.z_depth,
        }
    }
}

/// Spawn-time parameters an orb set was built from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    pub max_orb_size: f64,
    pub orb_color_range: HslRange,
    pub orb_density_factor: f64,
    pub z_depth: f64,
}
