//! The orb collection for one surface, rebuilt wholesale on parameter changes

use crate::orb::Orb;
use crate::rand::OrbRng;
use orbfield_core::{GenerationParams, ZPhase};

/// Surface area, in square pixels, that earns one orb at density 1
pub const AREA_PER_ORB: f64 = 20_000.0;
/// Floor on the area-derived count, before the density factor
pub const MIN_BASE_COUNT: f64 = 10.0;

/// `floor(max(10, w*h / 20000) * density)`
///
/// Negative or NaN densities produce an empty set.
pub fn orb_count(width: u32, height: u32, density: f64) -> usize {
    let area = width as f64 * height as f64;
    let base = (area / AREA_PER_ORB).max(MIN_BASE_COUNT);
    // `as` saturates: NaN and negatives become 0
    (base * density).floor() as usize
}

/// Orbs sized to one surface and one set of generation parameters
#[derive(Debug, Clone)]
pub struct OrbSet {
    orbs: Vec<Orb>,
    generation: GenerationParams,
    width: u32,
    height: u32,
}

impl OrbSet {
    /// Spawn a fresh set. Orbs are independent of one another.
    pub fn build(
        width: u32,
        height: u32,
        params: &GenerationParams,
        z_phase: ZPhase,
        rng: &mut OrbRng,
    ) -> Self {
        let count = orb_count(width, height, params.orb_density_factor);
        let orbs = (0..count)
            .map(|_| Orb::spawn(width as f64, height as f64, params, z_phase, rng))
            .collect();
        Self {
            orbs,
            generation: *params,
            width,
            height,
        }
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Orb> {
        self.orbs.iter_mut()
    }

    /// The parameters this set was spawned from
    pub fn generation(&self) -> &GenerationParams {
        &self.generation
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True if a rebuild with these inputs would be redundant
    pub fn is_current(&self, params: &GenerationParams, width: u32, height: u32) -> bool {
        self.generation == *params && self.width == width && self.height == height
    }
}
