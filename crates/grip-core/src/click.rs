#![forbid(unsafe_code)]

//! Multi-click counting.
//!
//! [`ClickCounter`] stamps each click with its position in a run of rapid
//! clicks on the same control. A click within the window of the previous click
//! on the same id continues the run; anything else starts a new run at 1.
//!
//! Runs are tracked per control id, so interleaving buttons does not reset
//! either button's run. Counts are not capped (saturating at `u8::MAX`); a
//! triple-click binding matches only the third click of a run.

use ahash::AHashMap;
use web_time::{Duration, Instant};

use crate::shortcut::ControlId;

/// Per-control multi-click run tracker.
#[derive(Debug, Clone)]
pub struct ClickCounter {
    window: Duration,
    last: AHashMap<ControlId, (Instant, u8)>,
}

impl ClickCounter {
    /// Create a counter with the given multi-click window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: AHashMap::new(),
        }
    }

    /// Record a click on `id` at `now` and return its count within the run.
    pub fn register(&mut self, id: ControlId, now: Instant) -> u8 {
        let count = match self.last.get(&id) {
            Some(&(at, count)) if now.saturating_duration_since(at) <= self.window => {
                count.saturating_add(1)
            }
            _ => 1,
        };
        self.last.insert(id, (now, count));
        count
    }

    /// Forget every run.
    pub fn reset(&mut self) {
        self.last.clear();
    }

    /// The multi-click window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Change the multi-click window. Runs in progress are kept.
    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }
}
