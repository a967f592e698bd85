//! One frame of the simulation: clear, advance, draw, sample

use crate::clock::FrameClock;
use crate::fps::FpsSampler;
use orbfield_particles::{DrawContext, Orb, OrbSet, Step, FPMS};

/// Motion parameters that can change without respawning the orbs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub xy_speed: f64,
    pub z_depth: f64,
}

/// Owns the orb set and the timing state for one running surface
#[derive(Debug)]
pub struct FrameDriver {
    set: OrbSet,
    motion: Motion,
    clock: FrameClock,
    sampler: FpsSampler,
}

impl FrameDriver {
    pub fn new(set: OrbSet, motion: Motion, report_interval_ms: f64) -> Self {
        Self {
            set,
            motion,
            clock: FrameClock::new(),
            sampler: FpsSampler::new(report_interval_ms),
        }
    }

    /// Swap in a freshly spawned set. Timing state carries over.
    pub fn replace_set(&mut self, set: OrbSet) {
        self.set = set;
    }

    pub fn set_motion(&mut self, motion: Motion) {
        self.motion = motion;
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// The next tick measures a zero interval
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    pub fn set(&self) -> &OrbSet {
        &self.set
    }

    pub fn orbs(&self) -> &[Orb] {
        self.set.orbs()
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count
    }

    /// Run one frame at `timestamp_ms` and draw it into `ctx`.
    ///
    /// Returns the mean FPS when a report is due.
    pub fn tick(
        &mut self,
        timestamp_ms: f64,
        ctx: &mut dyn DrawContext,
        width: u32,
        height: u32,
    ) -> Option<f64> {
        let delta_ms = self.clock.tick(timestamp_ms);
        let step = Step {
            elapsed_ms: timestamp_ms,
            normalized_delta: delta_ms / FPMS,
            xy_speed: self.motion.xy_speed,
            z_depth: self.motion.z_depth,
        };

        let (w, h) = (width as f64, height as f64);
        ctx.clear_rect(0.0, 0.0, w, h);
        for orb in self.set.iter_mut() {
            orb.advance(&step, w, h);
            orb.render(ctx);
            ctx.fill();
        }

        self.sampler.record(timestamp_ms, delta_ms)
    }
}
