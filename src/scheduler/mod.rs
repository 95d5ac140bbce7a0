//! Scheduling strategies that drive evaluation cycles.
//!
//! A scheduler tick observes every registered event once, in registration
//! order. A failing event aborts the rest of that tick; the scheduler itself
//! stays usable and (for the continuous strategy) keeps firing.

/// Continuous scheduler configuration.
pub mod config;
/// Fixed-rate background scheduler.
pub mod continuous;
/// Synchronous one-shot scheduler.
pub mod single;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{panic_message, CycleError, VigilResult};
use crate::event::{CycleReport, Interrupt, Observable};

pub use config::{ContinuousSchedulerConfig, MissedTickPolicy};
pub use continuous::ContinuousScheduler;
pub use single::SingleScheduler;

/// Common scheduler lifecycle.
pub trait ObservationScheduler: Send + Sync {
    /// Begin observing registered events.
    fn start(&self) -> VigilResult<()>;

    /// Stop observing. Always safe to call, including when already stopped.
    fn stop(&self);

    /// True while a background worker is active.
    fn is_running(&self) -> bool;
}

/// Ordered, lock-protected list of events shared with a worker.
#[derive(Default)]
pub(crate) struct EventList {
    events: RwLock<Vec<Arc<dyn Observable>>>,
}

impl EventList {
    pub(crate) fn add(&self, event: Arc<dyn Observable>) {
        self.events.write().unwrap_or_else(PoisonError::into_inner).push(event);
    }

    pub(crate) fn remove(&self, event: &Arc<dyn Observable>) -> bool {
        let mut guard = self.events.write().unwrap_or_else(PoisonError::into_inner);
        match guard.iter().position(|e| Arc::ptr_eq(e, event)) {
            Some(idx) => {
                guard.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn Observable>> {
        self.events.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.events.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Observe each event once, in order.
///
/// Stops at the first failing event, or before the next event once
/// `interrupt` is triggered. Panics escaping an [`Observable`] are turned
/// into [`CycleError::Panicked`].
pub(crate) fn run_tick(events: &[Arc<dyn Observable>], interrupt: &Interrupt) -> VigilResult<Vec<CycleReport>> {
    let mut reports = Vec::with_capacity(events.len());
    for event in events {
        if interrupt.is_triggered() {
            break;
        }
        let report = catch_unwind(AssertUnwindSafe(|| event.observe_until(interrupt))).unwrap_or_else(|payload| {
            Err(CycleError::Panicked {
                event: event.name().to_string(),
                message: panic_message(payload.as_ref()),
            }
            .into())
        })?;
        reports.push(report);
    }
    Ok(reports)
}
