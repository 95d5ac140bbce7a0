use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::EvaluationError;
use crate::threshold::ThresholdProvider;

use super::comparison::compare;
use super::ConditionEvaluator;

/// A metric that can report its request rate over a trailing window.
pub trait RequestRateSource {
    /// Requests per second observed over the trailing `window`.
    fn requests_per_second(&self, window: Duration) -> f64;
}

/// Holds while the request rate over the trailing window is at or below the
/// threshold. The threshold is read on every test.
pub struct RequestRateSafe {
    rate_threshold: Arc<dyn ThresholdProvider<f64>>,
    window: Duration,
}

impl RequestRateSafe {
    /// Compare the rate over `window` against `rate_threshold` (requests/second).
    #[must_use]
    pub fn new(rate_threshold: Arc<dyn ThresholdProvider<f64>>, window: Duration) -> Self {
        Self {
            rate_threshold,
            window,
        }
    }

    /// Trailing window the rate is computed over.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }
}

impl fmt::Debug for RequestRateSafe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestRateSafe")
            .field("rate_threshold", &self.rate_threshold.threshold())
            .field("window", &self.window)
            .finish()
    }
}

impl<M: RequestRateSource> ConditionEvaluator<M> for RequestRateSafe {
    fn test(&self, metric: &M) -> bool {
        metric.requests_per_second(self.window) <= self.rate_threshold.threshold()
    }

    fn try_test(&self, metric: &M) -> Result<bool, EvaluationError> {
        let rate = metric.requests_per_second(self.window);
        compare(&rate, &self.rate_threshold.threshold()).map(std::cmp::Ordering::is_le)
    }
}

/// Request arrival log used to derive a trailing request rate.
///
/// Entries older than `retention` are pruned on insert.
#[derive(Debug, Clone)]
pub struct RequestLog {
    arrivals: VecDeque<DateTime<Utc>>,
    retention: Duration,
}

impl RequestLog {
    /// Create a log that keeps arrivals for `retention`.
    #[must_use]
    pub fn new(retention: Duration) -> Self {
        Self {
            arrivals: VecDeque::new(),
            retention,
        }
    }

    /// Record a request that arrived at `at`. Arrivals should be recorded in
    /// time order.
    pub fn record(&mut self, at: DateTime<Utc>) {
        self.arrivals.push_back(at);
        let cutoff = window_start(at, self.retention);
        while self.arrivals.front().is_some_and(|t| *t < cutoff) {
            self.arrivals.pop_front();
        }
    }

    /// Record a request arriving now.
    pub fn record_now(&mut self) {
        self.record(Utc::now());
    }

    /// Number of retained arrivals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    /// True if no arrivals are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    /// Requests per second over `(now - window, now]`. A zero window yields 0.
    #[must_use]
    pub fn requests_per_second_at(&self, window: Duration, now: DateTime<Utc>) -> f64 {
        if window.is_zero() {
            return 0.0;
        }
        let start = window_start(now, window);
        let count = self
            .arrivals
            .iter()
            .filter(|t| **t > start && **t <= now)
            .count();
        count as f64 / window.as_secs_f64()
    }
}

impl RequestRateSource for RequestLog {
    fn requests_per_second(&self, window: Duration) -> f64 {
        self.requests_per_second_at(window, Utc::now())
    }
}

fn window_start(end: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(window)
        .ok()
        .and_then(|w| end.checked_sub_signed(w))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
