//! 2D drawing contract the orbs paint through, plus a recording implementation

use orbfield_core::Hsl;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The subset of a canvas-style 2D context the simulation needs.
///
/// Path calls build the current path; nothing is painted until [`fill`](Self::fill).
pub trait DrawContext {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Gaussian blur applied to subsequent fills, in pixels
    fn set_blur(&mut self, radius: f64);
    fn set_fill_style(&mut self, color: Hsl);
    fn begin_path(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
}

/// One call made against a [`DrawContext`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    SetBlur(f64),
    SetFillStyle(Hsl),
    BeginPath,
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ClosePath,
    Fill,
}

/// Draw counters readable from another thread
#[derive(Debug, Default)]
pub struct DrawStats {
    clears: AtomicU64,
    fills: AtomicU64,
}

impl DrawStats {
    pub fn clears(&self) -> u64 {
        self.clears.load(Ordering::Relaxed)
    }

    pub fn fills(&self) -> u64 {
        self.fills.load(Ordering::Relaxed)
    }
}

/// Records draw calls. Used headless and in tests.
///
/// Counters are always kept; the command log only when retaining.
#[derive(Debug)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    retain: bool,
    stats: Arc<DrawStats>,
}

impl CommandRecorder {
    /// Keeps every command
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            retain: true,
            stats: Arc::new(DrawStats::default()),
        }
    }

    /// Only counts; for long runs where the log would grow without bound
    pub fn counting() -> Self {
        Self {
            retain: false,
            ..Self::new()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, keeping the counters
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn stats(&self) -> Arc<DrawStats> {
        Arc::clone(&self.stats)
    }

    /// Total fills since creation
    pub fn fill_count(&self) -> u64 {
        self.stats.fills()
    }

    /// Total clears since creation
    pub fn clear_count(&self) -> u64 {
        self.stats.clears()
    }

    fn record(&mut self, command: DrawCommand) {
        if self.retain {
            self.commands.push(command);
        }
    }
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for CommandRecorder {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.stats.clears.fetch_add(1, Ordering::Relaxed);
        self.record(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn set_blur(&mut self, radius: f64) {
        self.record(DrawCommand::SetBlur(radius));
    }

    fn set_fill_style(&mut self, color: Hsl) {
        self.record(DrawCommand::SetFillStyle(color));
    }

    fn begin_path(&mut self) {
        self.record(DrawCommand::BeginPath);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.record(DrawCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn close_path(&mut self) {
        self.record(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.stats.fills.fetch_add(1, Ordering::Relaxed);
        self.record(DrawCommand::Fill);
    }
}
