//! Orbfield Runtime - Frame loop and surface control
//!
//! Provides the pieces that put the orb field on screen:
//! - `FrameClock` / `FpsSampler` - frame timing and periodic FPS reports
//! - `FrameDriver` - one frame: clear, advance, draw
//! - `SurfaceController` - the SETUP/UPDATE/STOP/PAUSE/RESUME state machine
//! - `ControlMessage` / `OrbEvent` - the JSON wire forms of commands and events
//! - `worker::spawn` - runs a controller on its own thread
//! - `HostAdapter` - turns settings and visibility changes into commands

mod clock;
mod controller;
mod driver;
mod event;
mod event_bus;
mod fps;
mod host;
mod message;
mod scheduler;
mod surface;
pub mod worker;

pub use clock::FrameClock;
pub use controller::{SurfaceController, SurfaceState};
pub use driver::{FrameDriver, Motion};
pub use event::OrbEvent;
pub use event_bus::{EventBus, EventSink};
pub use fps::FpsSampler;
pub use host::{HostAdapter, HostTransport};
pub use message::{Command, ControlMessage, ResumeParams};
pub use scheduler::{FrameQueue, FrameRequest, FrameScheduler};
pub use surface::{RecordingSurface, Surface, SurfaceHandle};
pub use worker::WorkerHandle;
