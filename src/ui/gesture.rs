//! Hidden admin-entry gesture: N rapid clicks on the header logo.

use std::time::{Duration, Instant};

/// Debounced logo click counter.
///
/// Every change of the count replaces the pending reset deadline, so the count only
/// decays after a full idle window with no clicks.
#[derive(Debug, Clone)]
pub struct AdminGesture {
    threshold: u32,
    window: Duration,
    count: u32,
    reset_at: Option<Instant>,
}

impl AdminGesture {
    pub fn new(threshold: u32, window: Duration) -> Self {
        Self {
            threshold: threshold.max(1),
            window,
            count: 0,
            reset_at: None,
        }
    }

    /// Clicks counted so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Clicks still needed to open the dashboard.
    pub fn remaining(&self) -> u32 {
        self.threshold.saturating_sub(self.count)
    }

    /// Deadline of the scheduled reset, if one is pending.
    pub fn pending_reset(&self) -> Option<Instant> {
        self.reset_at
    }

    /// Fire the scheduled reset if it is due. Returns `true` when the count was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.reset_at {
            Some(deadline) if now >= deadline => {
                tracing::debug!("Admin gesture idle, resetting count from {}", self.count);
                self.set_count(0, now);
                true
            }
            _ => false,
        }
    }

    /// Register a logo click. Returns `true` when the threshold is reached.
    pub fn click(&mut self, now: Instant) -> bool {
        self.tick(now);

        let next = self.count + 1;
        if next >= self.threshold {
            self.set_count(0, now);
            true
        } else {
            self.set_count(next, now);
            false
        }
    }

    fn set_count(&mut self, count: u32, now: Instant) {
        self.count = count;
        // A zero count needs no reset; any other value restarts the idle window.
        self.reset_at = (count > 0).then(|| now + self.window);
    }
}
