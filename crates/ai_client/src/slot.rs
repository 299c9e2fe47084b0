// Single-slot request coordination.
//
// The solver accepts only one outstanding request. A second submission while
// one is in flight is rejected outright rather than queued or cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Tracks whether a solver request is in flight.
#[derive(Debug, Clone, Default)]
pub struct RequestSlot {
    busy: Arc<AtomicBool>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot. Returns `None` while another request is outstanding;
    /// the returned guard releases the slot when dropped.
    pub fn try_begin(&self) -> Option<SlotGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SlotGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the duration of one solver request.
#[derive(Debug)]
pub struct SlotGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
