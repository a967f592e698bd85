//! Spatial and color types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// A 3D vector. x/y are screen-space pixels, z is pseudo-depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

/// An inclusive `[min, max]` range of floats
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: f64,
    pub max: f64,
}

impl NumberRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// HSL color. Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// Formats as a CSS-style fill string, e.g. `hsl(180, 30%, 60%)`
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Independent ranges for each HSL channel
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HslRange {
    pub h: NumberRange,
    pub s: NumberRange,
    pub l: NumberRange,
}

impl HslRange {
    /// The widest legal range for every channel
    pub const BOUNDS: Self = Self {
        h: NumberRange::new(0.0, 360.0),
        s: NumberRange::new(0.0, 100.0),
        l: NumberRange::new(0.0, 100.0),
    };

    /// Mutable access to one channel by key
    pub fn channel_mut(&mut self, channel: HslChannel) -> &mut NumberRange {
        match channel {
            HslChannel::Hue => &mut self.h,
            HslChannel::Saturation => &mut self.s,
            HslChannel::Lightness => &mut self.l,
        }
    }

    pub fn channel(&self, channel: HslChannel) -> NumberRange {
        match channel {
            HslChannel::Hue => self.h,
            HslChannel::Saturation => self.s,
            HslChannel::Lightness => self.l,
        }
    }
}

impl Default for HslRange {
    fn default() -> Self {
        Self {
            h: NumberRange::new(140.0, 220.0),
            s: NumberRange::new(20.0, 40.0),
            l: NumberRange::new(40.0, 80.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HslChannel {
    Hue,
    Saturation,
    Lightness,
}

impl HslChannel {
    pub const ALL: [HslChannel; 3] = [
        HslChannel::Hue,
        HslChannel::Saturation,
        HslChannel::Lightness,
    ];
}
