//! Debounce scheduler for suggest dispatch.
//!
//! Delays dispatch until input has been stable for the configured interval,
//! collapsing a burst of keystrokes into a single backend request.

use std::time::{Duration, Instant};

use super::key::QueryKey;

/// Manages debounced dispatch timing.
///
/// Holds at most one pending key. Each `schedule` call replaces the pending
/// key and restarts the timer, so only the latest key of a burst is ever
/// dispatched.
#[derive(Debug)]
pub struct Debouncer {
    /// Debounce delay in milliseconds
    delay_ms: u64,
    /// Timestamp of the last input that triggered a debounce
    last_input_time: Option<Instant>,
    /// Key waiting for the debounce period to expire
    pending: Option<QueryKey>,
}

impl Debouncer {
    /// Creates a new debouncer with the specified delay.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            last_input_time: None,
            pending: None,
        }
    }

    /// Schedule a key for dispatch after the debounce delay.
    ///
    /// Replaces any pending key and restarts the timer.
    pub fn schedule(&mut self, key: QueryKey) {
        self.last_input_time = Some(Instant::now());
        self.pending = Some(key);
    }

    /// Cancel the pending key and clear the timer.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_input_time = None;
    }

    /// Check whether the debounce period has elapsed for a pending key.
    pub fn is_ready(&self) -> bool {
        if self.pending.is_none() {
            return false;
        }

        match self.last_input_time {
            Some(last_time) => last_time.elapsed() >= Duration::from_millis(self.delay_ms),
            None => false,
        }
    }

    /// Take the pending key once the debounce period has elapsed.
    pub fn take_ready(&mut self) -> Option<QueryKey> {
        if !self.is_ready() {
            return None;
        }
        self.last_input_time = None;
        self.pending.take()
    }

    /// Check if a key is waiting for dispatch.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Get the configured delay in milliseconds.
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(250)
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
