//! Headless simulation run on a worker thread

use anyhow::{bail, Context, Result};
use orbfield_core::{ParameterSource, SettingsStore};
use orbfield_particles::orb_count;
use orbfield_runtime::{worker, HostAdapter, OrbEvent, RecordingSurface};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct SimulateArgs {
    pub width: u32,
    pub height: u32,
    pub seconds: f64,
    pub density: Option<f64>,
    pub size: Option<f64>,
    pub speed: Option<f64>,
    pub depth: Option<f64>,
    pub pause_after: Option<f64>,
    pub pause_for: f64,
    pub json: bool,
}

pub fn run(args: SimulateArgs, config: Option<&str>) -> Result<()> {
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        bail!("--seconds must be a positive number, got {}", args.seconds);
    }
    if !(args.pause_for.is_finite() && args.pause_for >= 0.0) {
        bail!("--pause-for must be zero or more, got {}", args.pause_for);
    }

    if let Some(start) = args.pause_after {
        if !(start.is_finite() && start >= 0.0) {
            bail!("--pause-after must be zero or more, got {}", start);
        }
    }

    let config = super::load_config(config)?;
    let mut store = SettingsStore::with_params(config.simulation);
    if let Some(density) = args.density {
        store.set_orb_density_factor(density).context("Invalid --density")?;
    }
    if let Some(size) = args.size {
        store.set_max_orb_size(size).context("Invalid --size")?;
    }
    if let Some(speed) = args.speed {
        store.set_xy_speed(speed).context("Invalid --speed")?;
    }
    if let Some(depth) = args.depth {
        store.set_z_depth(depth).context("Invalid --depth")?;
    }

    let params = store.snapshot();
    println!(
        "Simulating {} orbs on {}x{} for {}s",
        orb_count(args.width, args.height, params.orb_density_factor),
        args.width,
        args.height,
        args.seconds
    );

    let surface = RecordingSurface::counting(args.width, args.height);
    let stats = surface.stats();
    let worker = worker::spawn::<RecordingSurface>(config.runtime)
        .context("Failed to start simulation worker")?;
    let mut host = HostAdapter::new(store, worker);
    host.setup(surface)?;
    tracing::info!(width = args.width, height = args.height, "simulation started");

    let total = Duration::from_secs_f64(args.seconds);
    let pause_window = args
        .pause_after
        .map(|start| PauseWindow::new(start, args.pause_for));

    let started = Instant::now();
    while started.elapsed() < total {
        std::thread::sleep(POLL_INTERVAL);
        let elapsed = started.elapsed();

        if let Some(window) = pause_window {
            let hidden = window.hides(elapsed);
            if hidden != host.is_hidden() {
                tracing::debug!(hidden, ?elapsed, "visibility changed");
                host.visibility_changed(hidden)?;
                println!("{}", if hidden { "[hidden]" } else { "[visible]" });
            }
        }

        if host.poll_events() > 0 {
            if let Some(fps) = host.current_fps() {
                report(fps, elapsed, args.json)?;
            }
        }
    }

    host.into_transport()
        .shutdown()
        .context("Simulation worker failed")?;
    tracing::info!("simulation finished");

    println!(
        "Done: {} frames cleared, {} orbs drawn",
        stats.clears(),
        stats.fills()
    );
    Ok(())
}

/// Span of the run during which the surface counts as hidden
#[derive(Debug, Clone, Copy)]
struct PauseWindow {
    hide_at: Duration,
    show_at: Duration,
}

impl PauseWindow {
    fn new(after_secs: f64, for_secs: f64) -> Self {
        let hide_at = Duration::from_secs_f64(after_secs);
        Self {
            hide_at,
            show_at: hide_at + Duration::from_secs_f64(for_secs),
        }
    }

    fn hides(&self, elapsed: Duration) -> bool {
        elapsed >= self.hide_at && elapsed < self.show_at
    }
}

fn report(fps: f64, elapsed: Duration, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&OrbEvent::FpsReport { fps })?);
    } else {
        println!("  {:>6.2}s  {:.1} fps", elapsed.as_secs_f64(), fps);
    }
    Ok(())
}
