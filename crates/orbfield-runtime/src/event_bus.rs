//! Event sinks: an in-process queue and the cross-thread channel

use crate::event::OrbEvent;
use crossbeam::channel::Sender;

/// Where the controller posts events. Implementations must not block.
pub trait EventSink {
    fn emit(&mut self, event: OrbEvent);
}

/// In-process event queue; the controller emits, the host drains
#[derive(Debug, Default)]
pub struct EventBus {
    queued: Vec<OrbEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: OrbEvent) {
        self.queued.push(event);
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&mut self) -> Vec<OrbEvent> {
        std::mem::take(&mut self.queued)
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }
}

impl EventSink for EventBus {
    fn emit(&mut self, event: OrbEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<OrbEvent> {
    fn emit(&mut self, event: OrbEvent) {
        // A host that has gone away just stops hearing about frame rates
        if self.try_send(event).is_err() {
            tracing::trace!("event receiver gone, dropping {event:?}");
        }
    }
}
