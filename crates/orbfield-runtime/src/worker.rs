//! Runs a surface controller on its own thread

use crate::controller::SurfaceController;
use crate::event::OrbEvent;
use crate::message::Command;
use crate::scheduler::FrameQueue;
use crate::surface::Surface;
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use orbfield_core::{OrbfieldError, Result, RuntimeConfig, DEFAULT_REFRESH_RATE_HZ};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Host-side end of a worker: command sender, event receiver, thread handle
pub struct WorkerHandle<S> {
    commands: Option<Sender<Command<S>>>,
    events: Receiver<OrbEvent>,
    thread: Option<JoinHandle<()>>,
}

/// Start a worker thread owning a fresh controller.
///
/// The thread lives until every command sender is gone.
pub fn spawn<S: Surface + Send + 'static>(config: RuntimeConfig) -> Result<WorkerHandle<S>> {
    let (command_send, command_recv) = crossbeam::channel::unbounded();
    let (event_send, event_recv) = crossbeam::channel::unbounded();

    let thread = std::thread::Builder::new()
        .name("orbfield-worker".into())
        .spawn(move || run(config, command_recv, event_send))?;

    Ok(WorkerHandle {
        commands: Some(command_send),
        events: event_recv,
        thread: Some(thread),
    })
}

impl<S> WorkerHandle<S> {
    /// Queue a command. Fails only if the worker thread has exited.
    pub fn send(&self, command: Command<S>) -> Result<()> {
        let commands = self
            .commands
            .as_ref()
            .ok_or_else(|| OrbfieldError::WorkerDisconnected("worker shut down".into()))?;
        commands
            .send(command)
            .map_err(|_| OrbfieldError::WorkerDisconnected("worker thread exited".into()))
    }

    /// Events received so far, without waiting
    pub fn try_events(&self) -> Vec<OrbEvent> {
        self.events.try_iter().collect()
    }

    pub fn events(&self) -> &Receiver<OrbEvent> {
        &self.events
    }

    /// Close the command channel and wait for the thread to finish
    pub fn shutdown(mut self) -> Result<()> {
        self.join()
    }

    fn join(&mut self) -> Result<()> {
        self.commands = None;
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| OrbfieldError::WorkerError("worker thread panicked".into())),
            None => Ok(()),
        }
    }
}

impl<S> Drop for WorkerHandle<S> {
    fn drop(&mut self) {
        if let Err(e) = self.join() {
            tracing::error!("{e}");
        }
    }
}

fn frame_interval(refresh_rate_hz: f64) -> Duration {
    let hz = if refresh_rate_hz.is_finite() && refresh_rate_hz > 0.0 {
        refresh_rate_hz
    } else {
        DEFAULT_REFRESH_RATE_HZ
    };
    Duration::from_secs_f64(1.0 / hz)
}

fn run<S: Surface>(
    config: RuntimeConfig,
    commands: Receiver<Command<S>>,
    events: Sender<OrbEvent>,
) {
    let interval = frame_interval(config.refresh_rate_hz);
    let epoch = Instant::now();
    let mut controller = SurfaceController::new(&config, FrameQueue::new(), events);
    let mut next_frame = epoch;

    tracing::debug!(?interval, "worker started");
    loop {
        if !controller.scheduler().has_pending() {
            // Idle: nothing to draw until a command arrives
            match commands.recv() {
                Ok(command) => controller.handle(command),
                Err(_) => break,
            }
            continue;
        }

        match commands.recv_deadline(next_frame) {
            Ok(command) => controller.handle(command),
            Err(RecvTimeoutError::Timeout) => {
                let now = Instant::now();
                let timestamp_ms = now.duration_since(epoch).as_secs_f64() * 1000.0;
                for request in controller.scheduler_mut().take_due() {
                    controller.on_frame(request, timestamp_ms);
                }
                next_frame += interval;
                if next_frame < now {
                    // Fell behind; don't try to catch up with a burst
                    next_frame = now + interval;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    tracing::debug!("worker exiting");
}
