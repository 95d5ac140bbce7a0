//! Condition evaluators.
//!
//! A `ConditionEvaluator` is a pure predicate over a metric snapshot. Events
//! call [`ConditionEvaluator::try_test`] so that an evaluator which cannot
//! decide (for example a comparison against NaN) aborts the cycle instead of
//! silently answering `false`.

/// Threshold comparisons: less-than, greater-or-equal, inclusive range.
pub mod comparison;
/// SQL database health evaluators.
pub mod database;
/// Boolean combinators.
pub mod logic;
/// Request-rate safety evaluator and the rate sources it reads.
pub mod request_rate;
/// Resource usage (CPU / memory) evaluators.
pub mod resource;

use std::fmt;
use std::sync::Arc;

use crate::error::EvaluationError;

pub use comparison::{Between, GreaterThanOrEqual, LessThan};
pub use database::{HealthyDatabase, SqlDatabaseMetrics, UnhealthyDatabase};
pub use logic::{All, And, Any, Not, Or};
pub use request_rate::{RequestLog, RequestRateSafe, RequestRateSource};
pub use resource::{DecreaseResourceUsage, ResourceUsage, CPU_FIELD, MEMORY_FIELD};

/// A pure predicate over a metric value.
pub trait ConditionEvaluator<T>: Send + Sync {
    /// Returns true if `metric` satisfies the condition.
    fn test(&self, metric: &T) -> bool;

    /// Fallible form of [`test`](Self::test).
    ///
    /// Evaluators that can meet undecidable input override this; the default
    /// never fails.
    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        Ok(self.test(metric))
    }
}

impl<T, E> ConditionEvaluator<T> for Arc<E>
where
    E: ConditionEvaluator<T> + ?Sized,
{
    fn test(&self, metric: &T) -> bool {
        (**self).test(metric)
    }

    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        (**self).try_test(metric)
    }
}

impl<T, E> ConditionEvaluator<T> for Box<E>
where
    E: ConditionEvaluator<T> + ?Sized,
{
    fn test(&self, metric: &T) -> bool {
        (**self).test(metric)
    }

    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        (**self).try_test(metric)
    }
}

/// Evaluator that accepts every metric. Used as a neutral gate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlwaysTrue;

impl<T> ConditionEvaluator<T> for AlwaysTrue {
    fn test(&self, _metric: &T) -> bool {
        true
    }
}

/// Evaluator backed by a closure.
#[derive(Clone)]
pub struct FnEvaluator<F> {
    f: F,
}

impl<F> fmt::Debug for FnEvaluator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEvaluator").finish_non_exhaustive()
    }
}

impl<T, F> ConditionEvaluator<T> for FnEvaluator<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn test(&self, metric: &T) -> bool {
        (self.f)(metric)
    }
}

/// Wrap a closure as an evaluator.
pub fn evaluator_fn<T, F>(f: F) -> FnEvaluator<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    FnEvaluator { f }
}

/// Combinator methods for any evaluator.
pub trait ConditionEvaluatorExt<T>: ConditionEvaluator<T> + Sized {
    /// Both `self` and `other` must hold.
    fn and<B: ConditionEvaluator<T>>(self, other: B) -> And<Self, B> {
        And::new(self, other)
    }

    /// Either `self` or `other` must hold.
    fn or<B: ConditionEvaluator<T>>(self, other: B) -> Or<Self, B> {
        Or::new(self, other)
    }

    /// Logical negation of `self`.
    fn not(self) -> Not<Self> {
        Not::new(self)
    }

    /// Erase the concrete type for storage in events and observers.
    fn shared(self) -> Arc<dyn ConditionEvaluator<T>>
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<T, E: ConditionEvaluator<T>> ConditionEvaluatorExt<T> for E {}
