//! Construction options for a [`Form`](crate::Form).

use std::rc::Rc;

use crate::timer::{Clock, SystemClock};

/// Settings shared by every control of one form.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use stillform::timer::{Clock, ManualClock};
/// use stillform::FormOptions;
///
/// let clock = ManualClock::new();
/// let options = FormOptions::new().with_clock(clock.clone());
///
/// clock.advance(Duration::from_millis(5));
/// assert_eq!(options.clock().now(), Duration::from_millis(5));
/// ```
#[derive(Debug, Clone)]
pub struct FormOptions {
    clock: Rc<dyn Clock>,
}

impl FormOptions {
    /// Options reading time from a [`SystemClock`].
    pub fn new() -> Self {
        Self {
            clock: Rc::new(SystemClock::new()),
        }
    }

    /// Replace the clock used to schedule debounced validation.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    /// The configured clock.
    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    pub(crate) fn into_clock(self) -> Rc<dyn Clock> {
        self.clock
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self::new()
    }
}
