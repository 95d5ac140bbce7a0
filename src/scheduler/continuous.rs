//! Fixed-rate background scheduler.
//!
//! A single named worker thread owns the cadence. Tick `n` is due at
//! `start + n * interval` regardless of how long earlier ticks took; ticks
//! never overlap. Ticks that came due while a slow tick was running are
//! handled per [`MissedTickPolicy`].
//!
//! `stop()` cancels the pending tick at once and interrupts an in-flight one
//! before its next event or subscriber. The worker is then joined, so a later
//! `start()` spawns a fresh one. A worker stopped from inside its own tick
//! cannot be joined; it is kept as retiring and `start()` waits for it to
//! exit before spawning the next one.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

use crossbeam_channel::{at, bounded, select, Receiver, Sender, TryRecvError};

use crate::error::{panic_message, SchedulerError, VigilError, VigilResult};
use crate::event::{Interrupt, Observable};

use super::{run_tick, ContinuousSchedulerConfig, EventList, MissedTickPolicy, ObservationScheduler};

type ErrorHook = Arc<dyn Fn(&VigilError) + Send + Sync>;

#[derive(Debug, Default)]
struct CycleStats {
    completed: AtomicU64,
    failed: AtomicU64,
}

struct Worker {
    interrupt: Interrupt,
    stop_tx: Sender<()>,
    exited: Receiver<()>,
    handle: JoinHandle<()>,
}

/// A stopped worker that may still be finishing its last tick.
///
/// `exited` disconnects when the worker thread drops its sender on exit.
struct Retiring {
    thread: ThreadId,
    exited: Receiver<()>,
}

impl Retiring {
    fn has_exited(&self) -> bool {
        matches!(self.exited.try_recv(), Err(TryRecvError::Disconnected))
    }
}

#[derive(Default)]
struct WorkerSlot {
    active: Option<Worker>,
    retiring: Vec<Retiring>,
}

struct WorkerContext {
    interval: Duration,
    missed_ticks: MissedTickPolicy,
    events: Arc<EventList>,
    stats: Arc<CycleStats>,
    on_error: Option<ErrorHook>,
    interrupt: Interrupt,
    stop_rx: Receiver<()>,
}

/// Runs every registered event at a fixed rate on a background thread.
pub struct ContinuousScheduler {
    cfg: ContinuousSchedulerConfig,
    events: Arc<EventList>,
    stats: Arc<CycleStats>,
    on_error: Option<ErrorHook>,
    worker: Mutex<WorkerSlot>,
}

impl fmt::Debug for ContinuousScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousScheduler")
            .field("cfg", &self.cfg)
            .field("events", &self.events.len())
            .field("running", &self.is_running())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl ContinuousScheduler {
    /// Create a stopped scheduler.
    pub fn new(cfg: ContinuousSchedulerConfig) -> VigilResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            events: Arc::new(EventList::default()),
            stats: Arc::new(CycleStats::default()),
            on_error: None,
            worker: Mutex::new(WorkerSlot::default()),
        })
    }

    /// Create a stopped scheduler with default settings and the given interval.
    pub fn with_interval(interval: Duration) -> VigilResult<Self> {
        Self::new(ContinuousSchedulerConfig::with_interval(interval))
    }

    /// Register a callback that receives every failed tick's error.
    ///
    /// Runs on the worker thread.
    #[must_use]
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&VigilError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ContinuousSchedulerConfig {
        &self.cfg
    }

    /// Append an event. Takes effect from the next tick.
    pub fn add_event(&self, event: Arc<dyn Observable>) {
        self.events.add(event);
    }

    /// Remove the earliest registration of `event`. Takes effect from the
    /// next tick.
    pub fn remove_event(&self, event: &Arc<dyn Observable>) -> bool {
        self.events.remove(event)
    }

    /// Registered events, in order.
    #[must_use]
    pub fn events(&self) -> Vec<Arc<dyn Observable>> {
        self.events.snapshot()
    }

    /// Ticks that observed every event without error.
    #[must_use]
    pub fn cycles_completed(&self) -> u64 {
        self.stats.completed.load(Ordering::Relaxed)
    }

    /// Ticks aborted by a failing event.
    #[must_use]
    pub fn cycles_failed(&self) -> u64 {
        self.stats.failed.load(Ordering::Relaxed)
    }

    fn spawn_worker(&self) -> VigilResult<Worker> {
        let interrupt = Interrupt::new();
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let (exited_tx, exited) = bounded::<()>(0);
        let ctx = WorkerContext {
            interval: self.cfg.interval,
            missed_ticks: self.cfg.missed_ticks,
            events: Arc::clone(&self.events),
            stats: Arc::clone(&self.stats),
            on_error: self.on_error.clone(),
            interrupt: interrupt.clone(),
            stop_rx,
        };

        let handle = thread::Builder::new()
            .name(self.cfg.thread_name.clone())
            .spawn(move || {
                let _exited = exited_tx;
                worker_loop(ctx);
            })
            .map_err(|e| SchedulerError::Spawn { message: e.to_string() })?;

        tracing::info!(
            interval_ms = u64::try_from(self.cfg.interval.as_millis()).unwrap_or(u64::MAX),
            events = self.events.len(),
            "starting continuous event observations"
        );
        Ok(Worker {
            interrupt,
            stop_tx,
            exited,
            handle,
        })
    }
}

impl ObservationScheduler for ContinuousScheduler {
    fn start(&self) -> VigilResult<()> {
        loop {
            let pending: Vec<Receiver<()>> = {
                let mut slot = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
                if slot.active.is_some() {
                    return Err(SchedulerError::AlreadyRunning.into());
                }
                slot.retiring.retain(|r| !r.has_exited());
                if slot.retiring.is_empty() {
                    slot.active = Some(self.spawn_worker()?);
                    return Ok(());
                }
                let current = thread::current().id();
                if slot.retiring.iter().any(|r| r.thread == current) {
                    return Err(SchedulerError::Stopping.into());
                }
                slot.retiring.iter().map(|r| r.exited.clone()).collect()
            };

            // Wait outside the lock: the retiring tick may still call back into
            // this scheduler.
            for exited in pending {
                let _ = exited.recv();
            }
        }
    }

    fn stop(&self) {
        let worker = {
            let mut slot = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(worker) = slot.active.take() else {
                return;
            };
            slot.retiring.push(Retiring {
                thread: worker.handle.thread().id(),
                exited: worker.exited.clone(),
            });
            worker
        };

        worker.interrupt.trigger();
        drop(worker.stop_tx);

        // Joining from inside a tick would wait on ourselves; the worker exits
        // on its own once the current tick unwinds.
        if worker.handle.thread().id() != thread::current().id() && worker.handle.join().is_err() {
            tracing::error!("continuous scheduler worker panicked");
        }
        tracing::info!("stopped continuous event observations");
    }

    fn is_running(&self) -> bool {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner).active.is_some()
    }
}

impl Drop for ContinuousScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop(ctx: WorkerContext) {
    let mut next = Instant::now() + ctx.interval;
    loop {
        let timer = at(next);
        select! {
            recv(ctx.stop_rx) -> _ => break,
            recv(timer) -> _ => {}
        }
        if ctx.interrupt.is_triggered() {
            break;
        }

        run_scheduled_tick(&ctx);

        next += ctx.interval;
        if ctx.missed_ticks == MissedTickPolicy::Skip {
            let now = Instant::now();
            let mut skipped = 0_u64;
            while next <= now {
                next += ctx.interval;
                skipped += 1;
            }
            if skipped > 0 {
                tracing::debug!(skipped, "skipped overdue ticks");
            }
        }
    }
}

fn run_scheduled_tick(ctx: &WorkerContext) {
    let events = ctx.events.snapshot();
    match run_tick(&events, &ctx.interrupt) {
        Ok(reports) => {
            ctx.stats.completed.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(events = reports.len(), "tick complete");
        }
        Err(error) => {
            ctx.stats.failed.fetch_add(1, Ordering::Relaxed);
            tracing::error!(%error, "observation tick failed");
            if let Some(hook) = &ctx.on_error {
                if let Err(payload) = catch_unwind(AssertUnwindSafe(|| hook(&error))) {
                    tracing::error!(message = %panic_message(payload.as_ref()), "error hook panicked");
                }
            }
        }
    }
}
