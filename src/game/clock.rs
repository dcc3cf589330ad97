use std::time::{Duration, Instant};

/// Keeps track of when the next simulation step is due.
///
/// The deadline is armed lazily with whatever tick period is current at the
/// time, so a change in the period takes effect from the following tick.
/// Once a tick has fired, no further tick is scheduled until the caller asks
/// again, so steps can never overlap.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Clock {
    deadline: Option<Instant>,
}

impl Clock {
    pub(crate) fn new() -> Clock {
        Clock::default()
    }

    /// Return how long to wait from `now` until the next tick.  If no tick is
    /// scheduled, one is scheduled for `period` after `now`.
    pub(crate) fn time_left(&mut self, now: Instant, period: Duration) -> Duration {
        let deadline = *self.deadline.get_or_insert(now + period);
        deadline.saturating_duration_since(now)
    }

    /// If the scheduled tick is due at `now`, unschedule it and return `true`
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(when) if when <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Unschedule any pending tick
    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
