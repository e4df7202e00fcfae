use std::collections::VecDeque;

/// Opaque token for one requested frame callback.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Raw token value.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// "Next frame" port: the controller asks for exactly one future callback at a time.
///
/// The host calls the controller's `on_frame` with the handle when the frame is due.
pub trait FrameScheduler {
    /// Request one callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a requested callback. Unknown or already delivered handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel(&mut self, handle: FrameHandle) {
        (**self).cancel(handle)
    }
}

/// Scheduler driven explicitly by its host, one due frame at a time.
///
/// Handles are never reused, so a stale handle can always be told apart from a fresh one.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest pending handle; the host then delivers it to the controller.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    /// Number of callbacks currently pending.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `handle` is still pending.
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Total callbacks requested so far.
    pub fn requested_count(&self) -> u64 {
        self.requested
    }

    /// Total pending callbacks withdrawn so far.
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.requested += 1;
        self.pending.push_back(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if let Some(pos) = self.pending.iter().position(|h| *h == handle) {
            self.pending.remove(pos);
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
