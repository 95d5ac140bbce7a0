use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ObserverError, StreamError, VigilResult};
use crate::evaluator::ConditionEvaluator;

use super::Observer;

/// A delivered update.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification<T> {
    pub id: Uuid,
    pub context: String,
    pub metric: T,
    pub timestamp: DateTime<Utc>,
}

/// Observer that forwards every accepted update into a bounded channel.
///
/// The notifying cycle never blocks on a slow consumer: when the channel is
/// full the notification is dropped and counted.
pub struct StreamObserver<T> {
    evaluator: Arc<dyn ConditionEvaluator<T>>,
    tx: Sender<Notification<T>>,
    dropped: AtomicU64,
}

impl<T> fmt::Debug for StreamObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamObserver")
            .field("queued", &self.tx.len())
            .field("dropped", &self.dropped())
            .finish_non_exhaustive()
    }
}

impl<T> StreamObserver<T> {
    /// Notifications dropped because the stream buffer was full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<T> Observer<T> for StreamObserver<T>
where
    T: Clone + Send + Sync,
{
    fn condition_evaluator(&self) -> &dyn ConditionEvaluator<T> {
        self.evaluator.as_ref()
    }

    fn update(&self, metric: &T, context: &str) -> Result<(), ObserverError> {
        let notification = Notification {
            id: Uuid::new_v4(),
            context: context.to_string(),
            metric: metric.clone(),
            timestamp: Utc::now(),
        };
        match self.tx.try_send(notification) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(ObserverError::Disconnected),
        }
    }
}

/// Receiving half of a [`StreamObserver`].
#[derive(Debug)]
pub struct NotificationStream<T> {
    rx: Receiver<Notification<T>>,
}

impl<T> NotificationStream<T> {
    /// Receive the next notification (blocking).
    pub fn recv(&self) -> VigilResult<Notification<T>> {
        self.rx.recv().map_err(|_| StreamError::Disconnected.into())
    }

    /// Receive the next notification with a timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> VigilResult<Notification<T>> {
        self.rx.recv_timeout(timeout).map_err(|err| {
            let err = match err {
                RecvTimeoutError::Timeout => StreamError::Timeout {
                    duration_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                },
                RecvTimeoutError::Disconnected => StreamError::Disconnected,
            };
            err.into()
        })
    }

    /// Drain every notification that is already queued.
    pub fn drain(&self) -> Vec<Notification<T>> {
        self.rx.try_iter().collect()
    }

    /// Number of queued notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

/// Create an observer gated by `evaluator` and the stream it feeds.
///
/// Dropping the stream disconnects the observer; later updates fail with
/// [`ObserverError::Disconnected`].
pub fn notification_stream<T, E>(
    evaluator: E,
    capacity: usize,
) -> (Arc<StreamObserver<T>>, NotificationStream<T>)
where
    E: ConditionEvaluator<T> + 'static,
{
    let (tx, rx) = bounded(capacity.max(1));
    let observer = StreamObserver {
        evaluator: Arc::new(evaluator),
        tx,
        dropped: AtomicU64::new(0),
    };
    (Arc::new(observer), NotificationStream { rx })
}
