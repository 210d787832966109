#![forbid(unsafe_code)]

//! Leading-edge time-window throttle for key handling.
//!
//! Some hosts cannot tell a held key from repeated presses, so key
//! handlers gate themselves: the first event in a window is handled, every
//! other event that arrives before the window elapses is dropped.
//!
//! Time is passed in by the caller, which keeps the throttle deterministic
//! under test.
//!
//! ```
//! use explorer_core::throttle::Throttle;
//! use web_time::{Duration, Instant};
//!
//! let mut throttle = Throttle::new(Duration::from_millis(60));
//! let t0 = Instant::now();
//! assert!(throttle.try_acquire(t0));
//! assert!(!throttle.try_acquire(t0 + Duration::from_millis(10)));
//! assert!(throttle.try_acquire(t0 + Duration::from_millis(60)));
//! ```

use web_time::{Duration, Instant};

/// Admits at most one event per window.
///
/// A zero window admits everything.
#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    last_admitted: Option<Instant>,
    dropped: u64,
}

impl Throttle {
    /// Create a throttle with the given window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_admitted: None,
            dropped: 0,
        }
    }

    /// The configured window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Number of events dropped since creation or the last [`reset`](Self::reset).
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Try to admit an event at `now`.
    ///
    /// Returns `true` and opens a new window when the previous window has
    /// elapsed; returns `false` otherwise. Clocks that step backwards are
    /// treated as "no time elapsed".
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if self.window.is_zero() {
            self.last_admitted = Some(now);
            return true;
        }
        if let Some(last) = self.last_admitted
            && now.saturating_duration_since(last) < self.window
        {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        self.last_admitted = Some(now);
        true
    }

    /// Forget the current window.
    pub fn reset(&mut self) {
        self.last_admitted = None;
        self.dropped = 0;
    }
}
