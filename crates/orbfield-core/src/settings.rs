//! Validated parameter store owned by the host side.
//!
//! The simulation itself never checks its inputs; this store is where the
//! slider ranges are enforced before a snapshot is sent across.

use crate::error::{OrbfieldError, Result};
use crate::params::SimulationParams;
use crate::types::{HslChannel, HslRange, NumberRange};

pub const ORB_DENSITY_FACTOR_RANGE: NumberRange = NumberRange::new(0.1, 3.0);
pub const MAX_ORB_SIZE_RANGE: NumberRange = NumberRange::new(1.0, 3.0);
pub const XY_SPEED_RANGE: NumberRange = NumberRange::new(1.0, 10.0);
pub const Z_DEPTH_RANGE: NumberRange = NumberRange::new(0.0, 3.0);

/// Anything that can hand out the current simulation parameters on demand
pub trait ParameterSource {
    fn snapshot(&self) -> SimulationParams;
}

/// Holds the current parameter values and a dirty flag for change detection
#[derive(Debug, Clone)]
pub struct SettingsStore {
    params: SimulationParams,
    dirty: bool,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::with_params(SimulationParams::default())
    }

    pub fn with_params(params: SimulationParams) -> Self {
        Self {
            params,
            dirty: false,
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn set_orb_density_factor(&mut self, value: f64) -> Result<()> {
        check_range("orb_density_factor", ORB_DENSITY_FACTOR_RANGE, value)?;
        self.assign(|p| p.orb_density_factor = value);
        Ok(())
    }

    pub fn set_max_orb_size(&mut self, value: f64) -> Result<()> {
        check_range("max_orb_size", MAX_ORB_SIZE_RANGE, value)?;
        self.assign(|p| p.max_orb_size = value);
        Ok(())
    }

    pub fn set_xy_speed(&mut self, value: f64) -> Result<()> {
        check_range("xy_speed", XY_SPEED_RANGE, value)?;
        self.assign(|p| p.xy_speed = value);
        Ok(())
    }

    pub fn set_z_depth(&mut self, value: f64) -> Result<()> {
        check_range("z_depth", Z_DEPTH_RANGE, value)?;
        self.assign(|p| p.z_depth = value);
        Ok(())
    }

    /// Partially update one color channel.
    ///
    /// Each bound is applied independently, and only if it stays inside the
    /// channel's legal HSL bounds and does not cross the other bound (taking
    /// the incoming value of the other bound into account when both are given).
    /// Invalid bounds are skipped silently.
    pub fn set_color_channel(&mut self, channel: HslChannel, min: Option<f64>, max: Option<f64>) {
        let bounds = HslRange::BOUNDS.channel(channel);
        let mut updated = self.params.orb_color_range;
        let current = updated.channel(channel);
        let range = updated.channel_mut(channel);

        if let Some(new_min) = min {
            if new_min >= bounds.min && new_min <= max.unwrap_or(current.max) {
                range.min = new_min;
            }
        }
        if let Some(new_max) = max {
            if new_max <= bounds.max && new_max >= min.unwrap_or(current.min) {
                range.max = new_max;
            }
        }

        if updated != self.params.orb_color_range {
            self.assign(|p| p.orb_color_range = updated);
        }
    }

    /// Returns true once per batch of changes, clearing the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn assign(&mut self, f: impl FnOnce(&mut SimulationParams)) {
        let before = self.params;
        f(&mut self.params);
        if before != self.params {
            self.dirty = true;
        }
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterSource for SettingsStore {
    fn snapshot(&self) -> SimulationParams {
        self.params
    }
}

fn check_range(field: &str, range: NumberRange, value: f64) -> Result<()> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(OrbfieldError::ValueOutOfRange {
            field: field.to_string(),
            min: range.min,
            max: range.max,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let store = SettingsStore::new();
        assert_eq!(store.snapshot(), SimulationParams::default());
    }

    #[test]
    fn test_numeric_setters_reject_out_of_range() {
        let mut store = SettingsStore::new();
        assert!(store.set_orb_density_factor(2.5).is_ok());
        assert_eq!(store.params().orb_density_factor, 2.5);

        let err = store.set_orb_density_factor(5.0).unwrap_err();
        assert!(matches!(err, OrbfieldError::ValueOutOfRange { .. }));
        assert_eq!(store.params().orb_density_factor, 2.5);

        assert!(store.set_xy_speed(0.5).is_err());
        assert!(store.set_z_depth(0.0).is_ok());
        assert!(store.set_max_orb_size(3.5).is_err());
    }

    #[test]
    fn test_dirty_flag() {
        let mut store = SettingsStore::new();
        assert!(!store.take_dirty());

        store.set_xy_speed(1.0).unwrap();
        assert!(!store.take_dirty(), "same value should not mark dirty");

        store.set_xy_speed(4.0).unwrap();
        assert!(store.take_dirty());
        assert!(!store.take_dirty());
    }

    #[test]
    fn test_color_channel_partial_update() {
        let mut store = SettingsStore::new();
        store.set_color_channel(HslChannel::Hue, Some(10.0), None);
        assert_eq!(store.params().orb_color_range.h, NumberRange::new(10.0, 220.0));

        store.set_color_channel(HslChannel::Saturation, None, Some(90.0));
        assert_eq!(store.params().orb_color_range.s, NumberRange::new(20.0, 90.0));
    }

    #[test]
    fn test_color_channel_rejects_invalid_bounds() {
        let mut store = SettingsStore::new();

        // Out of HSL bounds
        store.set_color_channel(HslChannel::Hue, Some(-5.0), Some(400.0));
        assert_eq!(store.params().orb_color_range.h, NumberRange::new(140.0, 220.0));

        // Min above current max
        store.set_color_channel(HslChannel::Lightness, Some(90.0), None);
        assert_eq!(store.params().orb_color_range.l, NumberRange::new(40.0, 80.0));
        assert!(!store.take_dirty());
    }

    #[test]
    fn test_color_channel_both_bounds_move_together() {
        let mut store = SettingsStore::new();
        // New min exceeds the old max but not the new one
        store.set_color_channel(HslChannel::Hue, Some(250.0), Some(300.0));
        assert_eq!(store.params().orb_color_range.h, NumberRange::new(250.0, 300.0));
    }
}
