//! Orb count for a surface size

use anyhow::{bail, Result};
use orbfield_core::ORB_DENSITY_FACTOR_RANGE;
use orbfield_particles::orb_count;

pub fn run(width: u32, height: u32, density: Option<f64>, config: Option<&str>) -> Result<()> {
    let density = match density {
        Some(d) => d,
        None => super::load_config(config)?.simulation.orb_density_factor,
    };
    if !ORB_DENSITY_FACTOR_RANGE.contains(density) {
        bail!(
            "density must be between {} and {}, got {}",
            ORB_DENSITY_FACTOR_RANGE.min,
            ORB_DENSITY_FACTOR_RANGE.max,
            density
        );
    }

    println!("{}", orb_count(width, height, density));
    Ok(())
}
