use std::fmt;
use std::sync::Arc;

use crate::error::VigilResult;
use crate::event::{CycleReport, Interrupt, Observable};

use super::{run_tick, EventList, ObservationScheduler};

/// Observes every registered event exactly once, on the caller's thread.
#[derive(Default)]
pub struct SingleScheduler {
    events: EventList,
}

impl fmt::Debug for SingleScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleScheduler").field("events", &self.events.len()).finish()
    }
}

impl SingleScheduler {
    /// An empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler over `events`, in the given order.
    pub fn with_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Observable>>,
    {
        let scheduler = Self::new();
        for event in events {
            scheduler.add_event(event);
        }
        scheduler
    }

    /// Append an event.
    pub fn add_event(&self, event: Arc<dyn Observable>) {
        self.events.add(event);
    }

    /// Remove the earliest registration of `event`.
    pub fn remove_event(&self, event: &Arc<dyn Observable>) -> bool {
        self.events.remove(event)
    }

    /// Registered events, in order.
    #[must_use]
    pub fn events(&self) -> Vec<Arc<dyn Observable>> {
        self.events.snapshot()
    }

    /// Observe every event once and return the per-event reports.
    ///
    /// The first failing event aborts the run and its error is returned.
    pub fn run_once(&self) -> VigilResult<Vec<CycleReport>> {
        run_tick(&self.events.snapshot(), &Interrupt::new())
    }
}

impl ObservationScheduler for SingleScheduler {
    fn start(&self) -> VigilResult<()> {
        self.run_once().map(|_| ())
    }

    fn stop(&self) {}

    fn is_running(&self) -> bool {
        false
    }
}
