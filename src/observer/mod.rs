//! Observers: parties that gate on their own condition and receive updates.
//!
//! An event holds non-owning registrations (`Arc` clones) of its observers;
//! the application owns the observers and decides their lifetime.

/// Channel-backed observer and its receiving stream.
pub mod stream;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ObserverError;
use crate::evaluator::ConditionEvaluator;

pub use stream::{notification_stream, Notification, NotificationStream, StreamObserver};

/// A subscriber to an event.
pub trait Observer<T>: Send + Sync {
    /// The observer's own gating predicate.
    fn condition_evaluator(&self) -> &dyn ConditionEvaluator<T>;

    /// Receive a metric that passed the applicable predicates.
    ///
    /// `context` names the notifying event, e.g. `"Handling decrease event"`.
    /// An error (or a panic) is isolated to this observer: siblings in the
    /// same cycle are still notified.
    fn update(&self, metric: &T, context: &str) -> Result<(), ObserverError>;
}

/// Unique identifier for one subscription of an observer to an event.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random subscription id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Observer assembled from an evaluator and an update closure.
pub struct FnObserver<T, F> {
    evaluator: Arc<dyn ConditionEvaluator<T>>,
    on_update: F,
}

impl<T, F> fmt::Debug for FnObserver<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnObserver").finish_non_exhaustive()
    }
}

impl<T, F> Observer<T> for FnObserver<T, F>
where
    F: Fn(&T, &str) -> Result<(), ObserverError> + Send + Sync,
{
    fn condition_evaluator(&self) -> &dyn ConditionEvaluator<T> {
        self.evaluator.as_ref()
    }

    fn update(&self, metric: &T, context: &str) -> Result<(), ObserverError> {
        (self.on_update)(metric, context)
    }
}

/// Build a shared observer from an evaluator and an update closure.
pub fn observer_fn<T, E, F>(evaluator: E, on_update: F) -> Arc<dyn Observer<T>>
where
    T: 'static,
    E: ConditionEvaluator<T> + 'static,
    F: Fn(&T, &str) -> Result<(), ObserverError> + Send + Sync + 'static,
{
    Arc::new(FnObserver {
        evaluator: Arc::new(evaluator),
        on_update,
    })
}
