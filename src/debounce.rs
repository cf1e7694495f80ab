//! Leading-edge rate limiting for UI callbacks.
//!
//! The first call in a window runs; calls arriving before `wait` has elapsed
//! since the last accepted one are dropped, never replayed.

use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct Debounced<F> {
    wait: Duration,
    last_accepted: Mutex<Option<Instant>>,
    callback: F,
}

impl<F> Debounced<F> {
    pub fn new(wait: Duration, callback: F) -> Self {
        Self {
            wait,
            last_accepted: Mutex::new(None),
            callback,
        }
    }

    /// Invoke the callback unless the previous accepted call was less than
    /// `wait` ago. Returns `None` for a dropped call.
    pub fn call<A, R>(&self, args: A) -> Option<R>
    where
        F: Fn(A) -> R,
    {
        self.call_at(Instant::now(), args)
    }

    pub fn call_at<A, R>(&self, now: Instant, args: A) -> Option<R>
    where
        F: Fn(A) -> R,
    {
        // Held across the callback so concurrent callers serialize
        let mut last = match self.last_accepted.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let ready = match *last {
            None => true,
            Some(previous) => now.saturating_duration_since(previous) >= self.wait,
        };
        if !ready {
            return None;
        }
        *last = Some(now);
        Some((self.callback)(args))
    }
}

impl<F> std::fmt::Debug for Debounced<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}
