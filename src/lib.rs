//! # Vigil - metric-driven condition evaluation and notification
//!
//! Vigil pulls a metric snapshot from a collector, tests it against
//! predicates, and notifies the observers whose conditions hold. Evaluation
//! runs once on demand or repeatedly at a fixed rate.
//!
//! ## Core Concepts
//!
//! - **MetricCollector**: pull-based source producing one snapshot per cycle
//! - **ConditionEvaluator**: pure predicate over a snapshot
//! - **Observer**: subscriber with its own gating predicate and an update callback
//! - **Event**: a collector, its subscribers, and an optional event-level gate
//! - **Scheduler**: drives cycles once ([`SingleScheduler`]) or at a fixed
//!   rate ([`ContinuousScheduler`])
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use vigil::{
//!     collector_fn, notification_stream, AlwaysTrue, ContinuousScheduler, Event, FixedThreshold,
//!     ObservationScheduler,
//! };
//!
//! # fn main() -> vigil::VigilResult<()> {
//! let cpu = collector_fn(|| Ok(42.0_f64));
//! let event = Arc::new(Event::decrease(cpu, &FixedThreshold(50.0)));
//!
//! let (observer, stream) = notification_stream::<f64, _>(AlwaysTrue, 64);
//! event.subscribe(observer);
//!
//! let scheduler = ContinuousScheduler::with_interval(Duration::from_millis(500))?;
//! scheduler.add_event(event);
//! scheduler.start()?;
//!
//! let first = stream.recv()?;
//! assert_eq!(first.context, "Handling decrease event");
//! scheduler.stop();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collector;
pub mod error;
pub mod evaluator;
pub mod event;
pub mod observer;
pub mod scheduler;
pub mod threshold;

// Re-export primary types at crate root for convenience
pub use collector::{collector_fn, FnCollector, MetricCollector, StaticCollector};
pub use error::{
    CollectError, CycleError, EvaluationError, ObserverError, SchedulerError, StreamError, ValidationError,
    VigilError, VigilResult,
};
pub use evaluator::{
    evaluator_fn, All, AlwaysTrue, And, Any, Between, ConditionEvaluator, ConditionEvaluatorExt, FnEvaluator,
    DecreaseResourceUsage, GreaterThanOrEqual, HealthyDatabase, LessThan, Not, Or, RequestLog,
    RequestRateSafe, RequestRateSource, ResourceUsage, SqlDatabaseMetrics, UnhealthyDatabase,
};
pub use event::{CycleReport, Event, Interrupt, Observable, ObserverFailure};
pub use observer::{
    notification_stream, observer_fn, FnObserver, Notification, NotificationStream, Observer, StreamObserver,
    SubscriptionId,
};
pub use scheduler::{
    ContinuousScheduler, ContinuousSchedulerConfig, MissedTickPolicy, ObservationScheduler, SingleScheduler,
};
pub use threshold::{FixedThreshold, RegistryThreshold, ThresholdProvider, ThresholdRegistry};
