//! CLI command implementations

pub mod config;
pub mod count;
pub mod message;
pub mod simulate;

use anyhow::{Context, Result};
use orbfield_core::OrbfieldConfig;
use std::path::Path;

/// Layered config, or a single file when `--config` was given
pub fn load_config(path: Option<&str>) -> Result<OrbfieldConfig> {
    match path {
        Some(path) => OrbfieldConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path)),
        None => OrbfieldConfig::load().context("Failed to load config"),
    }
}
