use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::{EvaluationError, ValidationError, VigilResult};
use crate::threshold::ThresholdProvider;

use super::ConditionEvaluator;

pub(super) fn compare<T: PartialOrd + Debug>(metric: &T, bound: &T) -> Result<Ordering, EvaluationError> {
    metric
        .partial_cmp(bound)
        .ok_or_else(|| EvaluationError::Incomparable {
            bound: format!("{bound:?}"),
        })
}

/// True iff `metric < bound` (strict).
#[derive(Debug, Clone, PartialEq)]
pub struct LessThan<T> {
    bound: T,
}

impl<T> LessThan<T> {
    /// Create an evaluator with a fixed bound.
    #[must_use]
    pub const fn new(bound: T) -> Self {
        Self { bound }
    }

    /// Read the bound once from `provider`.
    #[must_use]
    pub fn from_provider<P: ThresholdProvider<T> + ?Sized>(provider: &P) -> Self {
        Self::new(provider.threshold())
    }

    /// The configured bound.
    pub const fn bound(&self) -> &T {
        &self.bound
    }
}

impl<T> ConditionEvaluator<T> for LessThan<T>
where
    T: PartialOrd + Debug + Send + Sync,
{
    fn test(&self, metric: &T) -> bool {
        metric < &self.bound
    }

    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        compare(metric, &self.bound).map(|o| o == Ordering::Less)
    }
}

/// True iff `metric >= bound`.
#[derive(Debug, Clone, PartialEq)]
pub struct GreaterThanOrEqual<T> {
    bound: T,
}

impl<T> GreaterThanOrEqual<T> {
    /// Create an evaluator with a fixed bound.
    #[must_use]
    pub const fn new(bound: T) -> Self {
        Self { bound }
    }

    /// Read the bound once from `provider`.
    #[must_use]
    pub fn from_provider<P: ThresholdProvider<T> + ?Sized>(provider: &P) -> Self {
        Self::new(provider.threshold())
    }

    /// The configured bound.
    pub const fn bound(&self) -> &T {
        &self.bound
    }
}

impl<T> ConditionEvaluator<T> for GreaterThanOrEqual<T>
where
    T: PartialOrd + Debug + Send + Sync,
{
    fn test(&self, metric: &T) -> bool {
        metric >= &self.bound
    }

    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        compare(metric, &self.bound).map(|o| o != Ordering::Less)
    }
}

/// True iff `lower <= metric <= upper` (both bounds inclusive).
///
/// [`Between::new`] trusts the caller to pass `lower <= upper`;
/// [`Between::try_new`] checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct Between<T> {
    lower: T,
    upper: T,
}

impl<T> Between<T> {
    /// Create a range evaluator without checking bound order.
    #[must_use]
    pub const fn new(lower: T, upper: T) -> Self {
        Self { lower, upper }
    }

    /// Inclusive lower bound.
    pub const fn lower(&self) -> &T {
        &self.lower
    }

    /// Inclusive upper bound.
    pub const fn upper(&self) -> &T {
        &self.upper
    }
}

impl<T: PartialOrd + Debug> Between<T> {
    /// Create a range evaluator, rejecting `lower > upper` and incomparable bounds.
    pub fn try_new(lower: T, upper: T) -> VigilResult<Self> {
        match lower.partial_cmp(&upper) {
            Some(Ordering::Less | Ordering::Equal) => Ok(Self::new(lower, upper)),
            _ => Err(ValidationError::InvertedBounds {
                lower: format!("{lower:?}"),
                upper: format!("{upper:?}"),
            }
            .into()),
        }
    }
}

impl<T> ConditionEvaluator<T> for Between<T>
where
    T: PartialOrd + Debug + Send + Sync,
{
    fn test(&self, metric: &T) -> bool {
        &self.lower <= metric && metric <= &self.upper
    }

    fn try_test(&self, metric: &T) -> Result<bool, EvaluationError> {
        let above_lower = compare(metric, &self.lower)? != Ordering::Less;
        let below_upper = compare(metric, &self.upper)? != Ordering::Greater;
        Ok(above_lower && below_upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::FixedThreshold;

    #[test]
    fn less_than_is_strict() {
        let lt = LessThan::new(50.0);
        assert!(lt.test(&49.9));
        assert!(!lt.test(&50.0));
        assert!(!lt.test(&50.1));
    }

    #[test]
    fn greater_than_or_equal_includes_bound() {
        let ge = GreaterThanOrEqual::new(50);
        assert!(ge.test(&50));
        assert!(ge.test(&51));
        assert!(!ge.test(&49));
    }

    #[test]
    fn between_is_inclusive_on_both_ends() {
        let between = Between::new(10, 20);
        assert!(between.test(&10));
        assert!(between.test(&20));
        assert!(between.test(&15));
        assert!(!between.test(&5));
        assert!(!between.test(&25));
    }

    #[test]
    fn between_try_new_rejects_inverted_bounds() {
        assert!(Between::try_new(10, 20).is_ok());
        assert!(Between::try_new(10, 10).is_ok());
        let err = Between::try_new(20, 10).unwrap_err();
        assert!(err.is_validation());
        assert!(Between::try_new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn nan_metric_is_an_evaluation_error() {
        let lt = LessThan::new(1.0);
        let ge = GreaterThanOrEqual::new(1.0);
        let between = Between::new(0.0, 1.0);

        assert!(!lt.test(&f64::NAN));
        assert!(matches!(lt.try_test(&f64::NAN), Err(EvaluationError::Incomparable { .. })));
        assert!(ge.try_test(&f64::NAN).is_err());
        assert!(between.try_test(&f64::NAN).is_err());
    }

    #[test]
    fn try_test_agrees_with_test_on_ordered_input() {
        let lt = LessThan::new(3);
        let ge = GreaterThanOrEqual::new(3);
        let between = Between::new(2, 4);
        for m in 0..7 {
            assert_eq!(lt.try_test(&m), Ok(lt.test(&m)));
            assert_eq!(ge.try_test(&m), Ok(ge.test(&m)));
            assert_eq!(between.try_test(&m), Ok(between.test(&m)));
        }
    }

    #[test]
    fn bounds_from_provider() {
        let lt = LessThan::from_provider(&FixedThreshold(50.0));
        assert_eq!(lt.bound(), &50.0);
        let ge = GreaterThanOrEqual::from_provider(&|| 7_i64);
        assert_eq!(ge.bound(), &7);
    }
}
