//! Clocks and cancellable timers for debounced validation.
//!
//! The engine never sleeps or spawns. A debounced field arms a [`Timer`]
//! with a deadline read from the form's [`Clock`]; the host later calls
//! [`Form::run_due_timers`](crate::Form::run_due_timers) and every timer whose
//! deadline has passed fires once. Re-arming a timer replaces its deadline,
//! which is what makes a burst of changes collapse into one evaluation.
//!
//! ```rust
//! use std::time::Duration;
//! use stillform::timer::{Clock, ManualClock, Timer};
//!
//! let clock = ManualClock::new();
//! let mut timer = Timer::default();
//!
//! timer.arm(clock.now(), Duration::from_millis(1000));
//! clock.advance(Duration::from_millis(400));
//! timer.arm(clock.now(), Duration::from_millis(1000)); // restarts the window
//!
//! clock.advance(Duration::from_millis(999));
//! assert!(!timer.fire_if_due(clock.now()));
//! clock.advance(Duration::from_millis(1));
//! assert!(timer.fire_if_due(clock.now()));
//! assert!(!timer.is_armed());
//! ```

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time, as an offset from an arbitrary origin.
pub trait Clock: Debug {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from when the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the form.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Start at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move forward by `by`, stopping at [`Duration::MAX`].
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Jump to an absolute time.
    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A single-shot deadline that can be re-armed or cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Duration>,
}

impl Timer {
    /// Schedule the timer for `now + delay`, replacing any pending deadline.
    /// A deadline past [`Duration::MAX`] is clamped to it.
    ///
    /// Returns the new deadline.
    pub fn arm(&mut self, now: Duration, delay: Duration) -> Duration {
        let deadline = now.saturating_add(delay);
        self.deadline = Some(deadline);
        deadline
    }

    /// Drop the pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// `true` while a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// `true` if a deadline is pending and `now` has reached it.
    pub fn is_due(&self, now: Duration) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Disarm and return `true` if the timer is due.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(ms(250));
        assert_eq!(clock.now(), ms(250));
        clock.set(ms(10));
        assert_eq!(handle.now(), ms(10));
    }

    #[test]
    fn rearm_replaces_deadline() {
        let mut timer = Timer::default();
        assert_eq!(timer.arm(ms(0), ms(1000)), ms(1000));
        assert_eq!(timer.arm(ms(900), ms(1000)), ms(1900));
        assert!(!timer.is_due(ms(1000)));
        assert!(timer.is_due(ms(1900)));
    }

    #[test]
    fn cancel_disarms() {
        let mut timer = Timer::default();
        assert!(!timer.cancel());
        timer.arm(ms(0), ms(5));
        assert!(timer.cancel());
        assert!(!timer.fire_if_due(ms(10)));
        assert_eq!(timer.deadline(), None);
    }

    #[test]
    fn fires_once() {
        let mut timer = Timer::default();
        timer.arm(ms(0), ms(5));
        assert!(timer.fire_if_due(ms(5)));
        assert!(!timer.fire_if_due(ms(6)));
    }

    #[test]
    fn oversized_delay_clamps_deadline() {
        let mut timer = Timer::default();
        assert_eq!(timer.arm(ms(1000), Duration::MAX), Duration::MAX);
        assert!(!timer.is_due(ms(1_000_000)));
        assert!(timer.fire_if_due(Duration::MAX));

        let clock = ManualClock::new();
        clock.set(ms(1));
        clock.advance(Duration::MAX);
        assert_eq!(clock.now(), Duration::MAX);
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock::new();
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
