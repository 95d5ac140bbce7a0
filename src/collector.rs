//! Metric sources.
//!
//! A collector produces a fresh snapshot on demand. Events call it at most
//! once per evaluation cycle; collectors may block and may be shared between
//! events, so implementations must be reentrant.

use std::fmt;
use std::sync::Arc;

use crate::error::CollectError;

/// Pull-based metric source.
pub trait MetricCollector<T>: Send + Sync {
    /// Produce the current snapshot.
    fn collect(&self) -> Result<T, CollectError>;
}

impl<T, C> MetricCollector<T> for Arc<C>
where
    C: MetricCollector<T> + ?Sized,
{
    fn collect(&self) -> Result<T, CollectError> {
        (**self).collect()
    }
}

/// Collector backed by a closure.
pub struct FnCollector<F> {
    f: F,
}

impl<F> fmt::Debug for FnCollector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCollector").finish_non_exhaustive()
    }
}

impl<T, F> MetricCollector<T> for FnCollector<F>
where
    F: Fn() -> Result<T, CollectError> + Send + Sync,
{
    fn collect(&self) -> Result<T, CollectError> {
        (self.f)()
    }
}

/// Wrap a fallible closure as a shared collector.
pub fn collector_fn<T, F>(f: F) -> Arc<dyn MetricCollector<T>>
where
    T: 'static,
    F: Fn() -> Result<T, CollectError> + Send + Sync + 'static,
{
    Arc::new(FnCollector { f })
}

/// Collector that always yields a clone of the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCollector<T>(pub T);

impl<T> MetricCollector<T> for StaticCollector<T>
where
    T: Clone + Send + Sync,
{
    fn collect(&self) -> Result<T, CollectError> {
        Ok(self.0.clone())
    }
}
