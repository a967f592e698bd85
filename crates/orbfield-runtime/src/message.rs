//! Commands from the host to the surface controller

use crate::surface::SurfaceHandle;
use orbfield_core::{HslRange, SimulationParams};
use serde::{Deserialize, Serialize};

/// Everything the controller accepts
#[derive(Debug)]
pub enum Command<S> {
    /// Hand the surface over. Only the first one is honored.
    Setup(SurfaceHandle<S>),
    /// Respawn the orbs from these parameters and (re)start the loop
    Update(SimulationParams),
    /// Stop ticking; surface and orbs are kept
    Stop,
    /// Stop ticking without losing the orbs or the FPS samples
    Pause,
    /// Continue after a pause or stop, with the parameters resent
    Resume(ResumeParams),
}

/// Parameters resent with a resume.
///
/// `z_depth` may be omitted, in which case the depth from the last update
/// stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeParams {
    pub max_orb_size: f64,
    pub orb_density_factor: f64,
    pub xy_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_depth: Option<f64>,
    pub orb_color_range: HslRange,
}

impl ResumeParams {
    /// Fill in the optional depth from what is currently in effect
    pub fn resolve(&self, current_z_depth: f64) -> SimulationParams {
        SimulationParams {
            max_orb_size: self.max_orb_size,
            orb_density_factor: self.orb_density_factor,
            xy_speed: self.xy_speed,
            z_depth: self.z_depth.unwrap_or(current_z_depth),
            orb_color_range: self.orb_color_range,
        }
    }
}

impl From<SimulationParams> for ResumeParams {
    fn from(params: SimulationParams) -> Self {
        Self {
            max_orb_size: params.max_orb_size,
            orb_density_factor: params.orb_density_factor,
            xy_speed: params.xy_speed,
            z_depth: Some(params.z_depth),
            orb_color_range: params.orb_color_range,
        }
    }
}

/// The serializable commands, tagged by `"type"`.
///
/// `Setup` has no wire form since it carries an owned surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlMessage {
    Update(SimulationParams),
    Stop,
    Pause,
    Resume(ResumeParams),
}

impl ControlMessage {
    /// Parse a JSON control message. Unknown or malformed messages are
    /// logged and yield `None`.
    pub fn parse(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::warn!("ignoring unrecognized control message: {e}");
                None
            }
        }
    }

    pub fn to_json(&self) -> orbfield_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<S> From<ControlMessage> for Command<S> {
    fn from(message: ControlMessage) -> Self {
        match message {
            ControlMessage::Update(params) => Command::Update(params),
            ControlMessage::Stop => Command::Stop,
            ControlMessage::Pause => Command::Pause,
            ControlMessage::Resume(params) => Command::Resume(params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_parse_update() {
        let json = r#"{
            "type": "UPDATE",
            "maxOrbSize": 2.0,
            "orbColorRange": {
                "h": {"min": 0.0, "max": 90.0},
                "s": {"min": 10.0, "max": 20.0},
                "l": {"min": 30.0, "max": 40.0}
            },
            "orbDensityFactor": 1.5,
            "xySpeed": 4.0,
            "zDepth": 0.5
        }"#;
        let message = ControlMessage::parse(json).unwrap();
        let ControlMessage::Update(params) = message else {
            panic!("expected update, got {message:?}");
        };
        assert_eq!(params.max_orb_size, 2.0);
        assert_eq!(params.orb_density_factor, 1.5);
        assert_eq!(params.orb_color_range.h.max, 90.0);
        assert_eq!(params.z_depth, 0.5);
    }

    #[test]
    fn test_parse_unit_messages() {
        assert_eq!(ControlMessage::parse(r#"{"type":"STOP"}"#), Some(ControlMessage::Stop));
        assert_eq!(ControlMessage::parse(r#"{"type":"PAUSE"}"#), Some(ControlMessage::Pause));
    }

    #[test]
    fn test_resume_without_depth() {
        let json = r#"{
            "type": "RESUME",
            "maxOrbSize": 1.0,
            "orbColorRange": {
                "h": {"min": 140.0, "max": 220.0},
                "s": {"min": 20.0, "max": 40.0},
                "l": {"min": 40.0, "max": 80.0}
            },
            "orbDensityFactor": 1.0,
            "xySpeed": 2.0
        }"#;
        let Some(ControlMessage::Resume(params)) = ControlMessage::parse(json) else {
            panic!("expected resume");
        };
        assert_eq!(params.z_depth, None);
        assert_eq!(params.resolve(2.5).z_depth, 2.5);
        assert_eq!(params.resolve(2.5).xy_speed, 2.0);
    }

    #[test]
    fn test_unknown_tag_is_ignored() {
        assert!(ControlMessage::parse(r#"{"type":"EXPLODE"}"#).is_none());
        assert!(ControlMessage::parse(r#"{"type":"UPDATE"}"#).is_none());
        assert!(ControlMessage::parse("not json").is_none());
    }

    #[test]
    fn test_json_tag_shape() {
        let json = ControlMessage::Pause.to_json().unwrap();
        assert_eq!(json, r#"{"type":"PAUSE"}"#);

        let update = ControlMessage::Update(SimulationParams::default()).to_json().unwrap();
        assert!(update.starts_with(r#"{"type":"UPDATE","maxOrbSize":1.0"#));
    }

    #[test]
    fn test_into_command() {
        let command: Command<RecordingSurface> = ControlMessage::Stop.into();
        assert!(matches!(command, Command::Stop));
    }
}
