//! A polled, cancellable periodic tick.
//!
//! The live statistics of a running session refresh on a fixed interval. The
//! shell's event loop polls the session, and the session polls its [`Ticker`].
//! Since the ticker lives inside the session, a reset cancels it and replacing
//! the session drops it; there is nothing left that could fire into a new one.

use std::time::Duration;

use web_time::Instant;

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Start ticking, with the first tick one interval after `now`
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Stop ticking. Polling a cancelled ticker never fires.
    pub const fn cancel(&mut self) {
        self.next_due = None;
    }

    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true if a tick is due at `now`.
    ///
    /// Fires at most once per call. Periods missed while nobody polled are
    /// skipped, so a slow caller gets one tick instead of a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };

        if now < due {
            return false;
        }

        let next = if self.interval.is_zero() {
            now
        } else {
            // Stay on the original grid: due + k * interval, the first one after now
            let into_period = now.duration_since(due).as_nanos() % self.interval.as_nanos();
            let into_period = Duration::from_nanos(u64::try_from(into_period).unwrap_or_default());
            now + (self.interval - into_period)
        };
        self.next_due = Some(next);

        true
    }
}
