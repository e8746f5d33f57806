use std::collections::VecDeque;

/// Token for one outstanding "call me on the next display refresh" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefreshHandle(pub u64);

/// Host primitive that schedules a callback for the next display refresh.
///
/// Implementations hand out a fresh handle per request. Cancelling a handle
/// that already fired or was already cancelled is a no-op.
pub trait RefreshScheduler {
    fn request_refresh(&mut self) -> RefreshHandle;
    fn cancel_refresh(&mut self, handle: RefreshHandle);
}

/// Scheduler with no clock behind it: requests queue up until the caller
/// pops them with [`ManualScheduler::next_due`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<RefreshHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding registrations, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = RefreshHandle> + '_ {
        self.pending.iter().copied()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Fire the oldest registration, if any.
    pub fn next_due(&mut self) -> Option<RefreshHandle> {
        self.pending.pop_front()
    }
}

impl RefreshScheduler for ManualScheduler {
    fn request_refresh(&mut self) -> RefreshHandle {
        let handle = RefreshHandle(self.next_id);
        self.next_id += 1;
        self.pending.push_back(handle);
        handle
    }

    fn cancel_refresh(&mut self, handle: RefreshHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let mut s = ManualScheduler::new();
        let a = s.request_refresh();
        let b = s.request_refresh();
        assert_ne!(a, b);
        assert_eq!(s.pending_count(), 2);
    }

    #[test]
    fn fires_in_request_order() {
        let mut s = ManualScheduler::new();
        let a = s.request_refresh();
        let b = s.request_refresh();
        assert_eq!(s.next_due(), Some(a));
        assert_eq!(s.next_due(), Some(b));
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn cancel_removes_only_that_handle() {
        let mut s = ManualScheduler::new();
        let a = s.request_refresh();
        let b = s.request_refresh();
        s.cancel_refresh(a);
        assert_eq!(s.pending().collect::<Vec<_>>(), vec![b]);

        // Cancelling twice is harmless.
        s.cancel_refresh(a);
        assert_eq!(s.pending_count(), 1);
    }
}
