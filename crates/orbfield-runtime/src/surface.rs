//! The drawing surface contract and its single-transfer handle

use orbfield_particles::{CommandRecorder, DrawContext, DrawStats};
use std::sync::Arc;

/// A drawable target with pixel dimensions and a 2D context.
///
/// The context may not be resolvable yet; `None` means "not ready".
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn context(&mut self) -> Option<&mut dyn DrawContext>;
}

/// Move-only wrapper that carries a surface into a controller.
///
/// There is no `Clone` and no way back out for the sender: once the handle is
/// sent, the host has nothing left to draw with.
pub struct SurfaceHandle<S> {
    surface: S,
}

impl<S: Surface> SurfaceHandle<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub(crate) fn into_surface(self) -> S {
        self.surface
    }
}

impl<S> std::fmt::Debug for SurfaceHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SurfaceHandle(..)")
    }
}

/// Headless surface backed by a [`CommandRecorder`]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    recorder: CommandRecorder,
    ready: bool,
}

impl RecordingSurface {
    /// Keeps the full command log
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            recorder: CommandRecorder::new(),
            ready: true,
        }
    }

    /// Counts draw calls only
    pub fn counting(width: u32, height: u32) -> Self {
        Self {
            recorder: CommandRecorder::counting(),
            ..Self::new(width, height)
        }
    }

    /// A surface whose context cannot be resolved yet
    pub fn unready(width: u32, height: u32) -> Self {
        Self {
            ready: false,
            ..Self::new(width, height)
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn recorder(&self) -> &CommandRecorder {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut CommandRecorder {
        &mut self.recorder
    }

    /// Counters that stay readable after the surface is handed off
    pub fn stats(&self) -> Arc<DrawStats> {
        self.recorder.stats()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn context(&mut self) -> Option<&mut dyn DrawContext> {
        if self.ready {
            Some(&mut self.recorder)
        } else {
            None
        }
    }
}
