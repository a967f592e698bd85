//! Orbfield Particles - the orb model
//!
//! Provides the CPU-side simulation of soft drifting orbs:
//! - Spawn with center-biased depth and per-channel HSL colors
//! - Oscillator-driven advance with depth reversal and edge wraparound
//! - Canvas-style render through the `DrawContext` trait
//! - `OrbSet` sized from surface area and density

pub mod draw;
pub mod orb;
pub mod rand;
pub mod set;

pub use draw::{CommandRecorder, DrawCommand, DrawContext, DrawStats};
pub use orb::{wrap_tolerance, Orb, Step, ZDirection, FPMS, MAX_Z, MIN_RADIUS, MIN_Z, Z_RANGE};
pub use rand::OrbRng;
pub use set::{orb_count, OrbSet};
