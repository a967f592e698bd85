//! Surface controller: owns one surface and runs the orb field on it
//!
//! The controller is a small state machine driven by [`Command`]s:
//!
//! ```text
//! Uninitialized --SETUP--> Ready --UPDATE--> Running <--PAUSE/RESUME--> Paused
//!                             |                 |                          |
//!                             +-----------------+---------STOP-------------+--> Stopped
//! Stopped --UPDATE/RESUME--> Running
//! ```
//!
//! Frames are requested from a [`FrameScheduler`]. At most one request is
//! outstanding; a callback whose token does not match it is stale and ignored.

use crate::driver::{FrameDriver, Motion};
use crate::event::OrbEvent;
use crate::event_bus::EventSink;
use crate::message::{Command, ResumeParams};
use crate::scheduler::{FrameRequest, FrameScheduler};
use crate::surface::{Surface, SurfaceHandle};
use orbfield_core::{RuntimeConfig, SimulationParams, ZPhase};
use orbfield_particles::{Orb, OrbRng, OrbSet};

/// Lifecycle of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// No surface yet
    Uninitialized,
    /// Surface owned, nothing spawned
    Ready,
    /// Frames are being requested and drawn
    Running,
    /// Ticking suspended; orbs and FPS samples kept
    Paused,
    /// Ticking ended until the next UPDATE or RESUME
    Stopped,
}

pub struct SurfaceController<S, F, E> {
    surface: Option<S>,
    driver: Option<FrameDriver>,
    state: SurfaceState,
    scheduler: F,
    events: E,
    pending: Option<FrameRequest>,
    rng: OrbRng,
    z_phase: ZPhase,
    report_interval_ms: f64,
}

impl<S: Surface, F: FrameScheduler, E: EventSink> SurfaceController<S, F, E> {
    pub fn new(config: &RuntimeConfig, scheduler: F, events: E) -> Self {
        let rng = match config.seed {
            Some(seed) => OrbRng::new(seed),
            None => OrbRng::from_time(),
        };
        Self {
            surface: None,
            driver: None,
            state: SurfaceState::Uninitialized,
            scheduler,
            events,
            pending: None,
            rng,
            z_phase: config.z_phase,
            report_interval_ms: config.report_interval_ms,
        }
    }

    /// Apply one command. Commands that make no sense in the current state
    /// are logged and dropped.
    pub fn handle(&mut self, command: Command<S>) {
        match command {
            Command::Setup(handle) => self.setup(handle),
            Command::Update(params) => self.update(params),
            Command::Stop => self.stop(),
            Command::Pause => self.pause(),
            Command::Resume(params) => self.resume(params),
        }
    }

    /// Run the frame for `request` at `timestamp_ms`.
    ///
    /// Ignored unless `request` is the outstanding one and the controller is
    /// running. Requests the next frame afterwards.
    pub fn on_frame(&mut self, request: FrameRequest, timestamp_ms: f64) {
        if self.pending != Some(request) {
            tracing::trace!(frame = request.id(), "stale frame callback ignored");
            return;
        }
        self.pending = None;
        if self.state != SurfaceState::Running {
            return;
        }

        let (Some(surface), Some(driver)) = (self.surface.as_mut(), self.driver.as_mut()) else {
            return;
        };

        let (width, height) = (surface.width(), surface.height());
        if driver.set().dimensions() != (width, height) {
            tracing::debug!(width, height, "surface resized, respawning orbs");
            let generation = *driver.set().generation();
            driver.replace_set(OrbSet::build(
                width,
                height,
                &generation,
                self.z_phase,
                &mut self.rng,
            ));
        }

        match surface.context() {
            Some(ctx) => {
                if let Some(fps) = driver.tick(timestamp_ms, ctx, width, height) {
                    self.events.emit(OrbEvent::FpsReport { fps });
                }
            }
            None => tracing::warn!("drawing context lost, skipping frame"),
        }

        self.request_frame();
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// The current orbs, empty until the first UPDATE
    pub fn orbs(&self) -> &[Orb] {
        self.driver.as_ref().map(|d| d.orbs()).unwrap_or(&[])
    }

    pub fn motion(&self) -> Option<Motion> {
        self.driver.as_ref().map(|d| d.motion())
    }

    /// The frame request the controller is waiting on
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    fn setup(&mut self, handle: SurfaceHandle<S>) {
        if self.surface.is_some() {
            tracing::debug!("surface already attached, ignoring SETUP");
            return;
        }
        let surface = handle.into_surface();
        tracing::info!(
            width = surface.width(),
            height = surface.height(),
            "surface attached"
        );
        self.surface = Some(surface);
        self.state = SurfaceState::Ready;
    }

    fn update(&mut self, params: SimulationParams) {
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("UPDATE before SETUP ignored");
            return;
        };
        if surface.context().is_none() {
            tracing::warn!("drawing context unavailable, dropping UPDATE");
            return;
        }
        let (width, height) = (surface.width(), surface.height());

        self.cancel_pending();
        let set = OrbSet::build(
            width,
            height,
            &params.generation(),
            self.z_phase,
            &mut self.rng,
        );
        tracing::debug!(orbs = set.len(), width, height, "orb set built");

        let motion = Motion {
            xy_speed: params.xy_speed,
            z_depth: params.z_depth,
        };
        match self.driver.as_mut() {
            Some(driver) => {
                driver.replace_set(set);
                driver.set_motion(motion);
                driver.reset_clock();
            }
            None => self.driver = Some(FrameDriver::new(set, motion, self.report_interval_ms)),
        }
        self.start();
    }

    fn stop(&mut self) {
        match self.state {
            SurfaceState::Ready | SurfaceState::Running | SurfaceState::Paused => {
                self.cancel_pending();
                self.state = SurfaceState::Stopped;
                tracing::info!("stopped");
            }
            state => tracing::debug!(?state, "STOP ignored"),
        }
    }

    fn pause(&mut self) {
        if self.state != SurfaceState::Running {
            tracing::debug!(state = ?self.state, "PAUSE ignored");
            return;
        }
        self.cancel_pending();
        self.state = SurfaceState::Paused;
        tracing::info!("paused");
    }

    fn resume(&mut self, params: ResumeParams) {
        if !matches!(self.state, SurfaceState::Paused | SurfaceState::Stopped) {
            tracing::debug!(state = ?self.state, "RESUME ignored");
            return;
        }
        // Stopped before the first UPDATE: nothing spawned yet
        let Some(driver) = self.driver.as_mut() else {
            self.update(params.resolve(SimulationParams::default().z_depth));
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if surface.context().is_none() {
            tracing::warn!("drawing context unavailable, dropping RESUME");
            return;
        }

        let params = params.resolve(driver.motion().z_depth);
        let generation = params.generation();
        let (width, height) = (surface.width(), surface.height());
        if !driver.set().is_current(&generation, width, height) {
            tracing::debug!("resent parameters differ, respawning orbs");
            driver.replace_set(OrbSet::build(
                width,
                height,
                &generation,
                self.z_phase,
                &mut self.rng,
            ));
        }
        driver.set_motion(Motion {
            xy_speed: params.xy_speed,
            z_depth: params.z_depth,
        });
        driver.reset_clock();

        self.cancel_pending();
        self.start();
        tracing::info!("resumed");
    }

    fn start(&mut self) {
        self.state = SurfaceState::Running;
        self.request_frame();
    }

    fn request_frame(&mut self) {
        self.pending = Some(self.scheduler.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
        }
    }
}
