//! Per-class rate limiting of continuous pointer input.
//!
//! The remote session expects a bounded input rate.  Pointer motion and wheel
//! scroll arrive far faster than that, so each of the two classes gets a
//! minimum spacing (the *throttle window*) between forwarded events.
//!
//! Events that arrive inside the window are dropped, not queued.  Button
//! transitions are never throttled.

use std::collections::HashMap;

use crate::protocol::events::EventClass;

/// Minimum spacing between two forwarded events of the same throttled class.
pub const DEFAULT_THROTTLE_WINDOW_MS: u64 = 100;

/// Last-admitted timestamps, keyed by event class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThrottleState {
    last_admitted: HashMap<EventClass, u64>,
}

impl ThrottleState {
    pub fn last_admitted(&self, class: EventClass) -> Option<u64> {
        self.last_admitted.get(&class).copied()
    }
}

/// Drop-don't-queue rate limiter for `Move` and `Wheel` events.
///
/// # Example
///
/// ```rust
/// use vbrowser_core::{EventClass, InputThrottler};
///
/// let mut throttler = InputThrottler::new();
/// assert!(throttler.admit(EventClass::Move, 0));
/// assert!(!throttler.admit(EventClass::Move, 50));
/// assert!(throttler.admit(EventClass::Move, 100));
/// ```
#[derive(Debug, Clone)]
pub struct InputThrottler {
    window_ms: u64,
    state: ThrottleState,
}

impl InputThrottler {
    /// Creates a throttler with the default 100 ms window.
    pub fn new() -> Self {
        Self::with_window(DEFAULT_THROTTLE_WINDOW_MS)
    }

    pub fn with_window(window_ms: u64) -> Self {
        Self {
            window_ms,
            state: ThrottleState::default(),
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Decides whether an event of `class` arriving at `now_ms` may be
    /// forwarded, and records the admission if so.
    ///
    /// Unthrottled classes are always admitted and never recorded.  A
    /// timestamp earlier than the last admission of the same class is
    /// rejected, which keeps recorded timestamps non-decreasing.
    pub fn admit(&mut self, class: EventClass, now_ms: u64) -> bool {
        if !class.is_throttled() {
            return true;
        }

        let admitted = match self.state.last_admitted(class) {
            None => true,
            Some(last) => now_ms >= last && now_ms - last >= self.window_ms,
        };
        if admitted {
            self.state.last_admitted.insert(class, now_ms);
        }
        admitted
    }

    /// Forgets every recorded admission (session start).
    pub fn reset(&mut self) {
        self.state.last_admitted.clear();
    }

    pub fn state(&self) -> &ThrottleState {
        &self.state
    }
}

impl Default for InputThrottler {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
