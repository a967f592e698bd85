//! Frame-callback scheduling with cancellable request tokens

/// Token for one requested frame callback.
///
/// The controller keeps the token of its outstanding request and only runs a
/// callback that presents the same token; anything else is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The host's "call me on the next display refresh" mechanism
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequest;
    /// Cancel a request that has not fired yet. Unknown tokens are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Queue of outstanding frame requests, fired by whoever owns the loop
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    outstanding: Vec<FrameRequest>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every outstanding request, oldest first
    pub fn take_due(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.outstanding)
    }

    pub fn outstanding(&self) -> &[FrameRequest] {
        &self.outstanding
    }

    pub fn has_pending(&self) -> bool {
        !self.outstanding.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.outstanding.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.outstanding.retain(|r| *r != request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_cancel() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        assert_ne!(a, b);
        assert_eq!(queue.outstanding().len(), 2);

        queue.cancel_frame(a);
        assert_eq!(queue.outstanding(), &[b]);

        // Cancelling twice is harmless
        queue.cancel_frame(a);
        assert_eq!(queue.outstanding().len(), 1);
    }

    #[test]
    fn test_take_due_empties_queue() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        assert!(queue.has_pending());
        assert_eq!(queue.take_due(), vec![a]);
        assert!(!queue.has_pending());
    }
}
