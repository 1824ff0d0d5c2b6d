//! Debounced save scheduling.

use std::time::{Duration, Instant};

/// Default quiet period before a save fires.
pub const SAVE_DEBOUNCE: Duration = Duration::from_secs(1);

/// Trailing-edge save debouncer.
///
/// Every scene mutation calls [`SaveDebouncer::mark_changed`], restarting
/// the quiet period. [`SaveDebouncer::poll`] returns true exactly once per
/// burst of edits, after the quiet period has elapsed with no further
/// changes. The host performs the actual persistence when poll fires.
#[derive(Debug)]
pub struct SaveDebouncer {
    quiet: Duration,
    last_change: Option<Instant>,
}

impl Default for SaveDebouncer {
    fn default() -> Self {
        Self::new(SAVE_DEBOUNCE)
    }
}

impl SaveDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_change: None,
        }
    }

    /// Record a mutation now.
    pub fn mark_changed(&mut self) {
        self.mark_changed_at(Instant::now());
    }

    /// Record a mutation at an explicit time.
    pub fn mark_changed_at(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    /// Whether a save is pending (changed, not yet fired).
    pub fn is_dirty(&self) -> bool {
        self.last_change.is_some()
    }

    /// Check whether the quiet period has elapsed; fires at most once per
    /// burst of changes.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Check against an explicit time.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.last_change {
            Some(at) if now.duration_since(at) >= self.quiet => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending save without firing.
    pub fn cancel(&mut self) {
        self.last_change = None;
    }
}
