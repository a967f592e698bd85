//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `ORBFIELD_REPORT_INTERVAL_MS`, `ORBFIELD_REFRESH_HZ`,
//!    `ORBFIELD_Z_PHASE`, `ORBFIELD_SEED`
//! 2. Project-local: `.orbfield/config.toml`
//! 3. Global: `~/.orbfield/config.toml`

use crate::error::{OrbfieldError, Result};
use crate::params::SimulationParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_REPORT_INTERVAL_MS: f64 = 500.0;
pub const DEFAULT_REFRESH_RATE_HZ: f64 = 60.0;

/// How the depth oscillator's phase is chosen per orb.
///
/// `Shared` keeps every orb's z phase at 0, so depth motion is partly
/// correlated across the field. `Independent` randomizes it per orb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZPhase {
    #[default]
    Shared,
    Independent,
}

impl FromStr for ZPhase {
    type Err = OrbfieldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shared" => Ok(ZPhase::Shared),
            "independent" => Ok(ZPhase::Independent),
            other => Err(OrbfieldError::InvalidEnumValue {
                value: other.to_string(),
                allowed: vec!["shared".into(), "independent".into()],
            }),
        }
    }
}

/// `[runtime]` table. Every field is optional so layers can be merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeSection {
    #[serde(default)]
    pub report_interval_ms: Option<f64>,
    #[serde(default)]
    pub refresh_rate_hz: Option<f64>,
    #[serde(default)]
    pub z_phase: Option<ZPhase>,
    #[serde(default)]
    pub seed: Option<u32>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrbfieldConfigFile {
    #[serde(default)]
    pub runtime: RuntimeSection,
    #[serde(default)]
    pub simulation: Option<SimulationParams>,
}

/// Resolved runtime settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuntimeConfig {
    /// Minimum time between FPS reports
    pub report_interval_ms: f64,
    /// Frame pacing for the threaded worker
    pub refresh_rate_hz: f64,
    pub z_phase: ZPhase,
    /// PRNG seed; `None` derives one from the clock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            z_phase: ZPhase::default(),
            seed: None,
        }
    }
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrbfieldConfig {
    pub runtime: RuntimeConfig,
    pub simulation: SimulationParams,
}

impl OrbfieldConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = OrbfieldConfigFile::default();

        // Layer 1: Global config (~/.orbfield/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        // Layer 2: Project-local config (.orbfield/config.toml)
        let local_path = PathBuf::from(".orbfield/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        // Layer 3: Environment variable overrides
        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        Self::resolve(config)
    }

    /// Load config from a specific file path only (plus env overrides)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Self::resolve(config)
    }

    /// Serialize the resolved config back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".orbfield").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<OrbfieldConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: OrbfieldConfigFile = toml::from_str(&content).map_err(|e| {
            OrbfieldError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut OrbfieldConfigFile, overlay: OrbfieldConfigFile) {
        if overlay.runtime.report_interval_ms.is_some() {
            base.runtime.report_interval_ms = overlay.runtime.report_interval_ms;
        }
        if overlay.runtime.refresh_rate_hz.is_some() {
            base.runtime.refresh_rate_hz = overlay.runtime.refresh_rate_hz;
        }
        if overlay.runtime.z_phase.is_some() {
            base.runtime.z_phase = overlay.runtime.z_phase;
        }
        if overlay.runtime.seed.is_some() {
            base.runtime.seed = overlay.runtime.seed;
        }
        if overlay.simulation.is_some() {
            base.simulation = overlay.simulation;
        }
    }

    fn apply_env_overrides(config: &mut OrbfieldConfigFile, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("ORBFIELD_REPORT_INTERVAL_MS") {
            match raw.parse::<f64>() {
                Ok(v) => config.runtime.report_interval_ms = Some(v),
                Err(e) => tracing::warn!("ignoring ORBFIELD_REPORT_INTERVAL_MS={raw}: {e}"),
            }
        }
        if let Some(raw) = lookup("ORBFIELD_REFRESH_HZ") {
            match raw.parse::<f64>() {
                Ok(v) => config.runtime.refresh_rate_hz = Some(v),
                Err(e) => tracing::warn!("ignoring ORBFIELD_REFRESH_HZ={raw}: {e}"),
            }
        }
        if let Some(raw) = lookup("ORBFIELD_Z_PHASE") {
            match raw.parse::<ZPhase>() {
                Ok(v) => config.runtime.z_phase = Some(v),
                Err(e) => tracing::warn!("ignoring ORBFIELD_Z_PHASE: {e}"),
            }
        }
        if let Some(raw) = lookup("ORBFIELD_SEED") {
            match raw.parse::<u32>() {
                Ok(v) => config.runtime.seed = Some(v),
                Err(e) => tracing::warn!("ignoring ORBFIELD_SEED={raw}: {e}"),
            }
        }
    }

    fn resolve(file: OrbfieldConfigFile) -> Result<Self> {
        let defaults = RuntimeConfig::default();
        let runtime = RuntimeConfig {
            report_interval_ms: file
                .runtime
                .report_interval_ms
                .unwrap_or(defaults.report_interval_ms),
            refresh_rate_hz: file
                .runtime
                .refresh_rate_hz
                .unwrap_or(defaults.refresh_rate_hz),
            z_phase: file.runtime.z_phase.unwrap_or(defaults.z_phase),
            seed: file.runtime.seed,
        };

        if !(runtime.report_interval_ms > 0.0) {
            return Err(OrbfieldError::ConfigError(format!(
                "report_interval_ms must be positive, got {}",
                runtime.report_interval_ms
            )));
        }
        if !(runtime.refresh_rate_hz > 0.0) {
            return Err(OrbfieldError::ConfigError(format!(
                "refresh_rate_hz must be positive, got {}",
                runtime.refresh_rate_hz
            )));
        }

        Ok(OrbfieldConfig {
            runtime,
            simulation: file.simulation.unwrap_or_default(),
        })
    }
}
