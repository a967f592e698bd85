//! Events sent from the simulation back to the host

use serde::{Deserialize, Serialize};

/// Outbound notifications. Fire-and-forget; the simulation never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrbEvent {
    /// Mean frame rate over the last report interval
    #[serde(rename = "FPS")]
    FpsReport { fps: f64 },
}
