use std::fmt;
use std::sync::Arc;

use crate::error::EvaluationError;

use super::ConditionEvaluator;

/// Both evaluators must hold. Short-circuits on the left operand.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    left: A,
    right: B,
}

impl<A, B> And<A, B> {
    /// Conjunction of `left` and `right`.
    #[must_use]
    pub const fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<T, A, B> ConditionEvaluator<T> for And<A, B>
where
    A: ConditionEvaluator<T>,
    B: ConditionEvaluator<T>,
{
    fn test(&self, metric: &T) -> bool {
        self.left.test(metric) && self.right.test(metric)
    }

    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        Ok(self.left.try_test(metric)? && self.right.try_test(metric)?)
    }
}

/// Either evaluator must hold. Short-circuits on the left operand.
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    left: A,
    right: B,
}

impl<A, B> Or<A, B> {
    /// Disjunction of `left` and `right`.
    #[must_use]
    pub const fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<T, A, B> ConditionEvaluator<T> for Or<A, B>
where
    A: ConditionEvaluator<T>,
    B: ConditionEvaluator<T>,
{
    fn test(&self, metric: &T) -> bool {
        self.left.test(metric) || self.right.test(metric)
    }

    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        Ok(self.left.try_test(metric)? || self.right.try_test(metric)?)
    }
}

/// Negation.
#[derive(Debug, Clone)]
pub struct Not<E> {
    inner: E,
}

impl<E> Not<E> {
    /// Negate `inner`.
    #[must_use]
    pub const fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<T, E: ConditionEvaluator<T>> ConditionEvaluator<T> for Not<E> {
    fn test(&self, metric: &T) -> bool {
        !self.inner.test(metric)
    }

    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        self.inner.try_test(metric).map(|b| !b)
    }
}

/// Every member must hold. An empty set holds vacuously.
pub struct All<T> {
    members: Vec<Arc<dyn ConditionEvaluator<T>>>,
}

impl<T> All<T> {
    /// Conjunction over `members`, evaluated in order.
    #[must_use]
    pub fn new(members: Vec<Arc<dyn ConditionEvaluator<T>>>) -> Self {
        Self { members }
    }

    /// Number of member evaluators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T> fmt::Debug for All<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All").field("members", &self.members.len()).finish()
    }
}

impl<T> ConditionEvaluator<T> for All<T> {
    fn test(&self, metric: &T) -> bool {
        self.members.iter().all(|e| e.test(metric))
    }

    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        for e in &self.members {
            if !e.try_test(metric)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// At least one member must hold. An empty set never holds.
pub struct Any<T> {
    members: Vec<Arc<dyn ConditionEvaluator<T>>>,
}

impl<T> Any<T> {
    /// Disjunction over `members`, evaluated in order.
    #[must_use]
    pub fn new(members: Vec<Arc<dyn ConditionEvaluator<T>>>) -> Self {
        Self { members }
    }

    /// Number of member evaluators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T> fmt::Debug for Any<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Any").field("members", &self.members.len()).finish()
    }
}

impl<T> ConditionEvaluator<T> for Any<T> {
    fn test(&self, metric: &T) -> bool {
        self.members.iter().any(|e| e.test(metric))
    }

    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        for e in &self.members {
            if e.try_test(metric)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
