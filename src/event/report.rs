use crate::error::ObserverError;
use crate::observer::SubscriptionId;

/// An observer whose update failed during a cycle.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverFailure {
    pub subscription_id: SubscriptionId,
    pub error: ObserverError,
}

/// Outcome of one evaluation cycle (or one forced notification round).
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Name of the event that ran.
    pub event: String,
    /// Subscribers registered when the cycle took its snapshot.
    pub subscribers: usize,
    /// Observers whose update was invoked and succeeded.
    pub notified: usize,
    /// Observers skipped because a predicate did not hold.
    pub rejected: usize,
    /// True if the event-level gate rejected the snapshot.
    pub gated: bool,
    /// True if the cycle stopped early on an interrupt.
    pub interrupted: bool,
    /// Observers whose update returned an error or panicked.
    pub failures: Vec<ObserverFailure>,
}

impl CycleReport {
    pub(crate) fn new(event: &str, subscribers: usize) -> Self {
        Self {
            event: event.to_string(),
            subscribers,
            notified: 0,
            rejected: 0,
            gated: false,
            interrupted: false,
            failures: Vec::new(),
        }
    }

    /// Observers whose update was invoked, successfully or not.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.notified + self.failures.len()
    }

    /// True if every invoked observer succeeded and the cycle ran to completion.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.interrupted
    }
}
