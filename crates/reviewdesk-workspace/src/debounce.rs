// ABOUTME: Debounces workspace saves so bursts of layout changes write once
// ABOUTME: Pure state with the clock passed in by the caller

use std::time::{Duration, Instant};

/// Coalesces revision bumps into a single save after a quiet window
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    window: Duration,
    pending: Option<(u64, Instant)>,
}

impl SaveDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn from_millis(window_ms: u64) -> Self {
        Self::new(Duration::from_millis(window_ms))
    }

    /// Note a change at `revision`; restarts the quiet window
    pub fn register(&mut self, revision: u64, now: Instant) {
        self.pending = Some((revision, now));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The newest revision once the window has elapsed since the last change
    pub fn flush_ready(&mut self, now: Instant) -> Option<u64> {
        let (revision, changed_at) = self.pending?;
        if now.duration_since(changed_at) < self.window {
            return None;
        }
        self.pending = None;
        Some(revision)
    }

    /// Take the pending revision regardless of the window, e.g. on shutdown
    pub fn flush_now(&mut self) -> Option<u64> {
        self.pending.take().map(|(revision, _)| revision)
    }
}

impl Default for SaveDebouncer {
    fn default() -> Self {
        Self::from_millis(reviewdesk_types::config::default_save_debounce_ms())
    }
}
