//! Events: a metric source coupled to a set of observers.
//!
//! One call to [`Event::observe`] is one evaluation cycle: the collector is
//! queried exactly once and every subscriber is tested against that same
//! snapshot, in subscription order. An optional event-level gate must also
//! hold for any subscriber to be notified.
//!
//! Subscriptions are guarded by a lock, so observers may be added or removed
//! while a scheduler is running. A cycle works on the subscriber list as it
//! was when the cycle started.

/// Cycle outcome types.
pub mod report;

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::collector::MetricCollector;
use crate::error::{panic_message, CycleError, EvaluationError, ObserverError, ValidationError, VigilResult};
use crate::evaluator::{ConditionEvaluator, GreaterThanOrEqual, LessThan};
use crate::observer::{Observer, SubscriptionId};
use crate::threshold::ThresholdProvider;

pub use report::{CycleReport, ObserverFailure};

/// Name of the preset built by [`Event::increase`].
pub const INCREASE_EVENT: &str = "increase";
/// Name of the preset built by [`Event::decrease`].
pub const DECREASE_EVENT: &str = "decrease";

/// Cooperative cancellation flag for an in-flight cycle.
///
/// Checked before each subscriber is tested; once set, the cycle stops and
/// reports itself as interrupted.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// A fresh, untriggered interrupt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that running cycles stop.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// True once [`trigger`](Self::trigger) has been called.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Type-erased view of an event, as driven by schedulers.
pub trait Observable: Send + Sync {
    /// Event name.
    fn name(&self) -> &str;

    /// Run one evaluation cycle, stopping early if `interrupt` is triggered.
    fn observe_until(&self, interrupt: &Interrupt) -> VigilResult<CycleReport>;

    /// Run one evaluation cycle to completion.
    fn observe(&self) -> VigilResult<CycleReport> {
        self.observe_until(&Interrupt::new())
    }
}

struct Registration<T> {
    id: SubscriptionId,
    observer: Arc<dyn Observer<T>>,
}

impl<T> Clone for Registration<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            observer: Arc::clone(&self.observer),
        }
    }
}

fn same_observer<T, O: Observer<T> + ?Sized>(registered: &Arc<dyn Observer<T>>, candidate: &Arc<O>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(registered).cast::<()>(),
        Arc::as_ptr(candidate).cast::<()>(),
    )
}

/// A metric source, its subscribers, and an optional gate.
pub struct Event<T> {
    name: String,
    collector: Arc<dyn MetricCollector<T>>,
    gate: Option<Arc<dyn ConditionEvaluator<T>>>,
    subscribers: RwLock<Vec<Registration<T>>>,
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("conditional", &self.gate.is_some())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T: 'static> Event<T> {
    /// Create an event with no gate: each observer is tested only against
    /// its own evaluator.
    pub fn new(name: impl Into<String>, collector: Arc<dyn MetricCollector<T>>) -> VigilResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyEventName.into());
        }
        Ok(Self {
            name,
            collector,
            gate: None,
            subscribers: RwLock::new(Vec::new()),
        })
    }

    /// Create an event whose observers are notified only when `gate` also holds.
    pub fn conditional<E>(
        name: impl Into<String>,
        collector: Arc<dyn MetricCollector<T>>,
        gate: E,
    ) -> VigilResult<Self>
    where
        E: ConditionEvaluator<T> + 'static,
    {
        Ok(Self::new(name, collector)?.with_gate(gate))
    }

    /// Replace the event-level gate.
    #[must_use]
    pub fn with_gate<E>(mut self, gate: E) -> Self
    where
        E: ConditionEvaluator<T> + 'static,
    {
        self.gate = Some(Arc::new(gate));
        self
    }

    /// Preset named `"increase"`, gated by `metric >= threshold`.
    ///
    /// The threshold is read once, here.
    pub fn increase<P>(collector: Arc<dyn MetricCollector<T>>, threshold: &P) -> Self
    where
        T: PartialOrd + fmt::Debug + Send + Sync,
        P: ThresholdProvider<T> + ?Sized,
    {
        Self::preset(INCREASE_EVENT, collector, GreaterThanOrEqual::from_provider(threshold))
    }

    /// Preset named `"decrease"`, gated by `metric < threshold`.
    ///
    /// The threshold is read once, here.
    pub fn decrease<P>(collector: Arc<dyn MetricCollector<T>>, threshold: &P) -> Self
    where
        T: PartialOrd + fmt::Debug + Send + Sync,
        P: ThresholdProvider<T> + ?Sized,
    {
        Self::preset(DECREASE_EVENT, collector, LessThan::from_provider(threshold))
    }

    fn preset<E>(name: &str, collector: Arc<dyn MetricCollector<T>>, gate: E) -> Self
    where
        E: ConditionEvaluator<T> + 'static,
    {
        Self {
            name: name.to_string(),
            collector,
            gate: Some(Arc::new(gate)),
            subscribers: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Event<T> {
    /// Event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if the event has an event-level gate.
    #[must_use]
    pub fn is_conditional(&self) -> bool {
        self.gate.is_some()
    }

    /// The event-level gate, if any.
    #[must_use]
    pub fn gate(&self) -> Option<&dyn ConditionEvaluator<T>> {
        self.gate.as_deref()
    }

    /// Context string passed to observers, e.g. `"Handling decrease event"`.
    #[must_use]
    pub fn context(&self) -> String {
        format!("Handling {} event", self.name)
    }

    /// Subscribe an observer. Subscribing the same observer twice yields two
    /// independent registrations.
    pub fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> SubscriptionId {
        let id = SubscriptionId::new();
        let mut guard = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
        guard.push(Registration { id, observer });
        id
    }

    /// Subscribe several observers, in order.
    pub fn subscribe_all<I>(&self, observers: I) -> Vec<SubscriptionId>
    where
        I: IntoIterator<Item = Arc<dyn Observer<T>>>,
    {
        let mut guard = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
        observers
            .into_iter()
            .map(|observer| {
                let id = SubscriptionId::new();
                guard.push(Registration { id, observer });
                id
            })
            .collect()
    }

    /// Remove the earliest registration of `observer`.
    ///
    /// Returns false (and changes nothing) if it is not subscribed.
    pub fn unsubscribe<O: Observer<T> + ?Sized>(&self, observer: &Arc<O>) -> bool {
        let mut guard = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
        match guard.iter().position(|r| same_observer(&r.observer, observer)) {
            Some(idx) => {
                guard.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove one registration per entry of `observers`. Returns how many
    /// registrations were removed.
    pub fn unsubscribe_all(&self, observers: &[Arc<dyn Observer<T>>]) -> usize {
        observers.iter().filter(|o| self.unsubscribe(*o)).count()
    }

    /// Remove the registration with the given id.
    pub fn unsubscribe_id(&self, id: SubscriptionId) -> bool {
        let mut guard = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|r| r.id != id);
        guard.len() < before
    }

    /// Snapshot of the subscribed observers, in subscription order.
    #[must_use]
    pub fn subscribers(&self) -> Vec<Arc<dyn Observer<T>>> {
        self.snapshot().into_iter().map(|r| r.observer).collect()
    }

    /// Number of registrations.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn snapshot(&self) -> Vec<Registration<T>> {
        self.subscribers.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Run one evaluation cycle.
    ///
    /// Collector and evaluator failures abort the cycle and are returned as
    /// errors. Observer failures are isolated and listed in the report.
    pub fn observe(&self) -> VigilResult<CycleReport> {
        self.observe_until(&Interrupt::new())
    }

    /// Run one evaluation cycle, stopping before the next subscriber once
    /// `interrupt` is triggered.
    pub fn observe_until(&self, interrupt: &Interrupt) -> VigilResult<CycleReport> {
        let metric = self.collect()?;
        let subscribers = self.snapshot();
        let mut report = CycleReport::new(&self.name, subscribers.len());

        if let Some(gate) = &self.gate {
            if !self.evaluate(gate.as_ref(), &metric)? {
                report.gated = true;
                report.rejected = subscribers.len();
                tracing::debug!(event = %self.name, "gate rejected snapshot");
                return Ok(report);
            }
        }

        let context = self.context();
        for registration in &subscribers {
            if interrupt.is_triggered() {
                report.interrupted = true;
                break;
            }
            if !self.evaluate(registration.observer.condition_evaluator(), &metric)? {
                report.rejected += 1;
                continue;
            }
            self.deliver(registration, &metric, &context, &mut report);
        }

        tracing::debug!(
            event = %self.name,
            notified = report.notified,
            rejected = report.rejected,
            failed = report.failures.len(),
            interrupted = report.interrupted,
            "cycle complete"
        );
        Ok(report)
    }

    /// Invoke `observer`'s update with `metric` and this event's context,
    /// bypassing every predicate. A panic is returned as an error.
    pub fn notify_observer(&self, observer: &dyn Observer<T>, metric: &T) -> Result<(), ObserverError> {
        invoke(observer, metric, &self.context())
    }

    /// Notify every subscriber unconditionally with a caller-supplied value.
    pub fn notify_observers(&self, metric: &T) -> CycleReport {
        let subscribers = self.snapshot();
        let mut report = CycleReport::new(&self.name, subscribers.len());
        let context = self.context();
        for registration in &subscribers {
            self.deliver(registration, metric, &context, &mut report);
        }
        report
    }

    fn collect(&self) -> Result<T, CycleError> {
        match catch_unwind(AssertUnwindSafe(|| self.collector.collect())) {
            Ok(Ok(metric)) => Ok(metric),
            Ok(Err(e)) => Err(CycleError::Collector {
                event: self.name.clone(),
                message: e.message().to_string(),
            }),
            Err(payload) => Err(CycleError::Panicked {
                event: self.name.clone(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    fn evaluate(&self, evaluator: &dyn ConditionEvaluator<T>, metric: &T) -> Result<bool, CycleError> {
        let outcome = catch_unwind(AssertUnwindSafe(|| evaluator.try_test(metric))).unwrap_or_else(|payload| {
            Err(EvaluationError::Panicked {
                message: panic_message(payload.as_ref()),
            })
        });
        outcome.map_err(|source| CycleError::Evaluator {
            event: self.name.clone(),
            source,
        })
    }

    fn deliver(&self, registration: &Registration<T>, metric: &T, context: &str, report: &mut CycleReport) {
        match invoke(registration.observer.as_ref(), metric, context) {
            Ok(()) => report.notified += 1,
            Err(error) => {
                tracing::warn!(
                    event = %self.name,
                    subscription_id = %registration.id,
                    %error,
                    "observer update failed"
                );
                report.failures.push(ObserverFailure {
                    subscription_id: registration.id,
                    error,
                });
            }
        }
    }
}

fn invoke<T>(observer: &dyn Observer<T>, metric: &T, context: &str) -> Result<(), ObserverError> {
    catch_unwind(AssertUnwindSafe(|| observer.update(metric, context))).unwrap_or_else(|payload| {
        Err(ObserverError::Panicked {
            message: panic_message(payload.as_ref()),
        })
    })
}

impl<T: 'static> Observable for Event<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn observe_until(&self, interrupt: &Interrupt) -> VigilResult<CycleReport> {
        Event::observe_until(self, interrupt)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;
    use std::sync::Mutex;

    use super::*;
    use crate::collector::{collector_fn, StaticCollector};
    use crate::error::CollectError;
    use crate::evaluator::{evaluator_fn, AlwaysTrue, Between};
    use crate::threshold::FixedThreshold;

    struct Recorder<E> {
        evaluator: E,
        seen: Mutex<Vec<(f64, String)>>,
    }

    impl<E> Recorder<E> {
        fn new(evaluator: E) -> Arc<Self> {
            Arc::new(Self {
                evaluator,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn values(&self) -> Vec<f64> {
            self.seen.lock().unwrap().iter().map(|(v, _)| *v).collect()
        }

        fn contexts(&self) -> Vec<String> {
            self.seen.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
        }
    }

    impl<E: ConditionEvaluator<f64>> Observer<f64> for Recorder<E> {
        fn condition_evaluator(&self) -> &dyn ConditionEvaluator<f64> {
            &self.evaluator
        }

        fn update(&self, metric: &f64, context: &str) -> Result<(), ObserverError> {
            self.seen.lock().unwrap().push((*metric, context.to_string()));
            Ok(())
        }
    }

    struct Failing;

    impl Observer<f64> for Failing {
        fn condition_evaluator(&self) -> &dyn ConditionEvaluator<f64> {
            &AlwaysTrue
        }

        fn update(&self, _metric: &f64, _context: &str) -> Result<(), ObserverError> {
            Err(ObserverError::rejected("sink unavailable"))
        }
    }

    struct Panicking;

    impl Observer<f64> for Panicking {
        fn condition_evaluator(&self) -> &dyn ConditionEvaluator<f64> {
            &AlwaysTrue
        }

        fn update(&self, _metric: &f64, _context: &str) -> Result<(), ObserverError> {
            panic!("observer bug")
        }
    }

    fn fixed(value: f64) -> Arc<dyn MetricCollector<f64>> {
        Arc::new(StaticCollector(value))
    }

    fn counting(value: f64) -> (Arc<dyn MetricCollector<f64>>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let collector = collector_fn(move || {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(value)
        });
        (collector, calls)
    }

    #[test]
    fn decrease_below_threshold_notifies_once() {
        let event = Event::decrease(fixed(30.0), &FixedThreshold(50.0));
        let observer = Recorder::new(AlwaysTrue);
        event.subscribe(observer.clone());

        let report = event.observe().unwrap();
        assert_eq!(report.notified, 1);
        assert_eq!(observer.values(), vec![30.0]);
        assert_eq!(observer.contexts(), vec!["Handling decrease event".to_string()]);
    }

    #[test]
    fn decrease_above_threshold_notifies_nobody() {
        let event = Event::decrease(fixed(60.0), &FixedThreshold(50.0));
        let observer = Recorder::new(AlwaysTrue);
        event.subscribe(observer.clone());

        let report = event.observe().unwrap();
        assert!(report.gated);
        assert_eq!(report.notified, 0);
        assert!(observer.values().is_empty());
    }

    #[test]
    fn increase_preset_uses_greater_or_equal() {
        let event = Event::increase(fixed(50.0), &FixedThreshold(50.0));
        assert_eq!(event.name(), INCREASE_EVENT);
        let observer = Recorder::new(AlwaysTrue);
        event.subscribe(observer.clone());
        event.observe().unwrap();
        assert_eq!(observer.values(), vec![50.0]);
    }

    #[test]
    fn collector_queried_once_per_cycle() {
        let (collector, calls) = counting(12.0);
        let event = Event::new("load", collector).unwrap();
        let observers: Vec<_> = (0..4).map(|_| Recorder::new(AlwaysTrue)).collect();
        for o in &observers {
            event.subscribe(o.clone());
        }

        event.observe().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for o in &observers {
            assert_eq!(o.values(), vec![12.0]);
        }

        event.observe().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn plain_event_uses_observer_predicates() {
        let event = Event::new("load", fixed(15.0)).unwrap();
        let inside = Recorder::new(Between::new(10.0, 20.0));
        let outside = Recorder::new(Between::new(30.0, 40.0));
        event.subscribe(inside.clone());
        event.subscribe(outside.clone());

        let report = event.observe().unwrap();
        assert_eq!(report.notified, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(inside.values(), vec![15.0]);
        assert!(outside.values().is_empty());
    }

    #[test]
    fn conditional_requires_gate_and_observer_predicate() {
        for (gate_bound, observer_bound, expected) in [
            (20.0, 20.0, true),
            (20.0, 10.0, false),
            (10.0, 20.0, false),
            (10.0, 10.0, false),
        ] {
            let event =
                Event::conditional("cpu", fixed(15.0), LessThan::new(gate_bound)).unwrap();
            let observer = Recorder::new(LessThan::new(observer_bound));
            event.subscribe(observer.clone());
            event.observe().unwrap();
            assert_eq!(!observer.values().is_empty(), expected, "gate {gate_bound} observer {observer_bound}");
        }
    }

    #[test]
    fn notification_order_follows_subscription_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let event = Event::new("ordered", fixed(1.0)).unwrap();
        for tag in ["a", "b", "c"] {
            let order = Arc::clone(&order);
            event.subscribe(crate::observer::observer_fn(AlwaysTrue, move |_: &f64, _: &str| {
                order.lock().unwrap().push(tag);
                Ok(())
            }));
        }
        event.observe().unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_subscription_notifies_twice_and_unsubscribe_removes_one() {
        let event = Event::new("dup", fixed(1.0)).unwrap();
        let observer = Recorder::new(AlwaysTrue);
        event.subscribe(observer.clone());
        event.subscribe(observer.clone());

        event.observe().unwrap();
        assert_eq!(observer.values().len(), 2);

        assert!(event.unsubscribe(&observer));
        assert_eq!(event.subscriber_count(), 1);
        event.observe().unwrap();
        assert_eq!(observer.values().len(), 3);
    }

    #[test]
    fn unsubscribe_unknown_observer_is_noop() {
        let event = Event::new("noop", fixed(1.0)).unwrap();
        let subscribed = Recorder::new(AlwaysTrue);
        let stranger = Recorder::new(AlwaysTrue);
        event.subscribe(subscribed.clone());

        assert!(!event.unsubscribe(&stranger));
        assert!(!event.unsubscribe_id(SubscriptionId::new()));
        assert_eq!(event.subscriber_count(), 1);
    }

    #[test]
    fn batch_subscribe_and_unsubscribe() {
        let event = Event::new("batch", fixed(1.0)).unwrap();
        let a: Arc<dyn Observer<f64>> = Recorder::new(AlwaysTrue);
        let b: Arc<dyn Observer<f64>> = Recorder::new(AlwaysTrue);
        let ids = event.subscribe_all(vec![a.clone(), b.clone()]);
        assert_eq!(ids.len(), 2);
        assert_eq!(event.subscribers().len(), 2);

        assert!(event.unsubscribe_id(ids[0]));
        assert_eq!(event.unsubscribe_all(&[a, b]), 1);
        assert_eq!(event.subscriber_count(), 0);
    }

    #[test]
    fn failing_observers_do_not_suppress_siblings() {
        let event = Event::new("isolated", fixed(5.0)).unwrap();
        let before = Recorder::new(AlwaysTrue);
        let after = Recorder::new(AlwaysTrue);
        event.subscribe(before.clone());
        let failing_id = event.subscribe(Arc::new(Failing));
        let panicking_id = event.subscribe(Arc::new(Panicking));
        event.subscribe(after.clone());

        let report = event.observe().unwrap();
        assert_eq!(report.notified, 2);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].subscription_id, failing_id);
        assert_eq!(report.failures[1].subscription_id, panicking_id);
        assert!(matches!(report.failures[1].error, ObserverError::Panicked { .. }));
        assert_eq!(before.values(), vec![5.0]);
        assert_eq!(after.values(), vec![5.0]);
    }

    #[test]
    fn collector_failure_aborts_cycle() {
        let event = Event::new(
            "offline",
            collector_fn::<f64, _>(|| Err(CollectError::new("sensor offline"))),
        )
        .unwrap();
        let observer = Recorder::new(AlwaysTrue);
        event.subscribe(observer.clone());

        let err = event.observe().unwrap_err();
        assert!(err.is_cycle());
        assert!(format!("{err}").contains("sensor offline"));
        assert!(observer.values().is_empty());
    }

    #[test]
    fn collector_panic_is_a_cycle_error() {
        let event = Event::new("panics", collector_fn::<f64, _>(|| panic!("driver crashed"))).unwrap();
        let err = event.observe().unwrap_err();
        assert!(format!("{err}").contains("driver crashed"));
    }

    #[test]
    fn evaluator_failure_aborts_cycle() {
        let event = Event::new("nan", fixed(f64::NAN)).unwrap();
        let first = Recorder::new(AlwaysTrue);
        let comparing = Recorder::new(LessThan::new(1.0));
        let last = Recorder::new(AlwaysTrue);
        event.subscribe(first.clone());
        event.subscribe(comparing.clone());
        event.subscribe(last.clone());

        let err = event.observe().unwrap_err();
        assert!(matches!(
            err,
            crate::VigilError::Cycle(CycleError::Evaluator { .. })
        ));
        assert_eq!(first.values().len(), 1);
        assert!(last.values().is_empty());
    }

    #[test]
    fn panicking_evaluator_aborts_cycle() {
        let event = Event::new("bad", fixed(1.0))
            .unwrap()
            .with_gate(evaluator_fn(|_: &f64| panic!("gate bug")));
        let err = event.observe().unwrap_err();
        assert!(format!("{err}").contains("gate bug"));
    }

    #[test]
    fn notify_observers_bypasses_predicates() {
        let event = Event::decrease(fixed(99.0), &FixedThreshold(50.0));
        let picky = Recorder::new(LessThan::new(0.0));
        event.subscribe(picky.clone());
        event.subscribe(Arc::new(Failing));

        let report = event.notify_observers(&123.0);
        assert_eq!(report.notified, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(picky.values(), vec![123.0]);
    }

    #[test]
    fn notify_observer_reports_panics() {
        let event = Event::new("direct", fixed(1.0)).unwrap();
        let err = event.notify_observer(&Panicking, &1.0).unwrap_err();
        assert!(matches!(err, ObserverError::Panicked { .. }));
    }

    #[test]
    fn triggered_interrupt_stops_before_next_subscriber() {
        let event = Event::new("interrupted", fixed(1.0)).unwrap();
        let interrupt = Interrupt::new();
        let trip = interrupt.clone();
        event.subscribe(crate::observer::observer_fn(AlwaysTrue, move |_: &f64, _: &str| {
            trip.trigger();
            Ok(())
        }));
        let never = Recorder::new(AlwaysTrue);
        event.subscribe(never.clone());

        let report = event.observe_until(&interrupt).unwrap();
        assert!(report.interrupted);
        assert_eq!(report.notified, 1);
        assert!(never.values().is_empty());
    }

    #[test]
    fn empty_name_rejected() {
        let err = Event::new("  ", fixed(1.0)).unwrap_err();
        assert!(err.is_validation());
    }
}
