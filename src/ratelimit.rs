//! Fixed-window admission gate shared by all submitters of one client.

use parking_lot::Mutex;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use crate::clock::{Clock, SystemClock};

/// Granularity of the rate window. One unit is one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn duration(&self) -> Duration {
        match self {
            TimeUnit::Milliseconds => Duration::from_millis(1),
            TimeUnit::Seconds => Duration::from_secs(1),
            TimeUnit::Minutes => Duration::from_secs(60),
            TimeUnit::Hours => Duration::from_secs(3600),
            TimeUnit::Days => Duration::from_secs(86400),
        }
    }
}

struct RateWindow {
    limit: u32,
    duration: Duration,
    count: u32,
    window_start: Instant,
}

impl RateWindow {
    /// Starts a fresh window if `duration` has passed. A `now` earlier than
    /// `window_start` counts as not elapsed.
    fn roll_over(&mut self, now: Instant) -> bool {
        let elapsed = match now.checked_duration_since(self.window_start) {
            Some(elapsed) => elapsed,
            None => return false,
        };
        if elapsed < self.duration {
            return false;
        }
        self.count = 0;
        self.window_start = now;
        true
    }
}

/// Counts confirmed successes per window and answers admission polls.
///
/// Admission does not consume quota; only [`RateGate::record_success`] does.
/// Callers that poll concurrently before any success is recorded can all be
/// admitted, so a burst may exceed `limit` within one window.
pub struct RateGate<C: Clock = SystemClock> {
    window: Mutex<RateWindow>,
    clock: C,
}

impl RateGate<SystemClock> {
    pub fn new(unit: TimeUnit, limit: u32) -> Self {
        Self::with_clock(limit, unit.duration(), SystemClock)
    }
}

impl<C: Clock> RateGate<C> {
    pub fn with_clock(limit: u32, duration: Duration, clock: C) -> Self {
        if limit == 0 {
            warn!("Rate gate created with limit 0; no request will ever be admitted");
        }
        let window_start = clock.now();
        Self {
            window: Mutex::new(RateWindow {
                limit,
                duration,
                count: 0,
                window_start,
            }),
            clock,
        }
    }

    /// Non-blocking admission poll. Never waits for the window to reset.
    pub fn try_admit(&self) -> bool {
        let mut window = self.window.lock();
        if window.count < window.limit {
            trace!(count = window.count, limit = window.limit, "Admitted");
            return true;
        }

        let now = self.clock.now();
        if window.roll_over(now) {
            debug!(limit = window.limit, "Rate window reset");
            return window.count < window.limit;
        }

        debug!(count = window.count, limit = window.limit, "Admission refused");
        false
    }

    /// Records one confirmed successful request against the current window.
    pub fn record_success(&self) {
        let mut window = self.window.lock();
        window.count = window.count.saturating_add(1).min(window.limit);
    }

    pub fn remaining(&self) -> u32 {
        let window = self.window.lock();
        window.limit.saturating_sub(window.count)
    }

    pub fn limit(&self) -> u32 {
        self.window.lock().limit
    }

    pub fn window(&self) -> Duration {
        self.window.lock().duration
    }
}
