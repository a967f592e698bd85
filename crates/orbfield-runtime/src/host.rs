//! Host side of the protocol: turns UI changes into commands

use crate::controller::SurfaceController;
use crate::event::OrbEvent;
use crate::event_bus::EventBus;
use crate::message::{Command, ResumeParams};
use crate::scheduler::FrameQueue;
use crate::surface::{Surface, SurfaceHandle};
use crate::worker::WorkerHandle;
use orbfield_core::{ParameterSource, Result};

/// Something that carries commands to a controller and brings events back
pub trait HostTransport {
    type Surface: Surface;

    fn send(&mut self, command: Command<Self::Surface>) -> Result<()>;
    fn drain_events(&mut self) -> Vec<OrbEvent>;
}

impl<S: Surface> HostTransport for WorkerHandle<S> {
    type Surface = S;

    fn send(&mut self, command: Command<S>) -> Result<()> {
        WorkerHandle::send(self, command)
    }

    fn drain_events(&mut self) -> Vec<OrbEvent> {
        self.try_events()
    }
}

/// In-process transport, for single-threaded hosts and tests
impl<S: Surface> HostTransport for SurfaceController<S, FrameQueue, EventBus> {
    type Surface = S;

    fn send(&mut self, command: Command<S>) -> Result<()> {
        self.handle(command);
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<OrbEvent> {
        self.events_mut().drain()
    }
}

/// Wires a parameter source to a controller
pub struct HostAdapter<P, T> {
    source: P,
    transport: T,
    current_fps: Option<f64>,
    hidden: bool,
}

impl<P: ParameterSource, T: HostTransport> HostAdapter<P, T> {
    pub fn new(source: P, transport: T) -> Self {
        Self {
            source,
            transport,
            current_fps: None,
            hidden: false,
        }
    }

    /// Hand the surface to the controller and start it with the current
    /// parameters
    pub fn setup(&mut self, surface: T::Surface) -> Result<()> {
        self.transport
            .send(Command::Setup(SurfaceHandle::new(surface)))?;
        self.transport.send(Command::Update(self.source.snapshot()))
    }

    /// Restart the simulation with a fresh snapshot
    pub fn params_changed(&mut self) -> Result<()> {
        self.transport.send(Command::Stop)?;
        self.transport.send(Command::Update(self.source.snapshot()))
    }

    /// Pause while hidden; resume with the current parameters when shown.
    /// Repeated notifications for the same visibility are dropped.
    pub fn visibility_changed(&mut self, hidden: bool) -> Result<()> {
        if hidden == self.hidden {
            return Ok(());
        }
        self.hidden = hidden;
        if hidden {
            self.transport.send(Command::Pause)
        } else {
            let params = ResumeParams::from(self.source.snapshot());
            self.transport.send(Command::Resume(params))
        }
    }

    /// Drain pending events. Returns how many FPS reports arrived.
    pub fn poll_events(&mut self) -> usize {
        let events = self.transport.drain_events();
        for event in &events {
            match event {
                OrbEvent::FpsReport { fps } => self.current_fps = Some(*fps),
            }
        }
        events.len()
    }

    /// The most recent FPS report
    pub fn current_fps(&self) -> Option<f64> {
        self.current_fps
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut P {
        &mut self.source
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}
