//! Error types for Vigil.
//!
//! All errors are strongly typed using thiserror so callers can match on the
//! failing stage of an evaluation cycle.

use thiserror::Error;

/// Validation errors raised while building events, evaluators and schedulers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Scheduler interval must be greater than zero")]
    InvalidInterval,

    #[error("Invalid range: lower bound {lower} is greater than upper bound {upper}")]
    InvertedBounds {
        lower: String,
        upper: String,
    },

    #[error("Event name cannot be empty")]
    EmptyEventName,

    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Failure raised by a metric collector while producing a snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CollectError {
    message: String,
}

impl CollectError {
    /// Creates a collector error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The collector-provided message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure raised by an evaluator that cannot decide on a metric.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("metric is not comparable with bound {bound}")]
    Incomparable {
        bound: String,
    },

    #[error("evaluator panicked: {message}")]
    Panicked {
        message: String,
    },
}

/// Failure raised by an observer while handling an update.
///
/// Observer failures never abort a cycle; they are collected in the
/// cycle report instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObserverError {
    #[error("observer rejected update: {message}")]
    Rejected {
        message: String,
    },

    #[error("observer panicked: {message}")]
    Panicked {
        message: String,
    },

    #[error("observer stream disconnected")]
    Disconnected,
}

impl ObserverError {
    /// Creates a rejection error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Errors that abort a single evaluation cycle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CycleError {
    #[error("collector for event '{event}' failed: {message}")]
    Collector {
        event: String,
        message: String,
    },

    #[error("evaluator for event '{event}' failed: {source}")]
    Evaluator {
        event: String,
        source: EvaluationError,
    },

    #[error("cycle for event '{event}' panicked: {message}")]
    Panicked {
        event: String,
        message: String,
    },
}

impl CycleError {
    /// Name of the event whose cycle failed.
    #[must_use]
    pub fn event(&self) -> &str {
        match self {
            Self::Collector { event, .. }
            | Self::Evaluator { event, .. }
            | Self::Panicked { event, .. } => event,
        }
    }
}

/// Scheduler state-machine errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Scheduler is already running")]
    AlreadyRunning,

    #[error("Scheduler worker is still stopping; start it from another thread")]
    Stopping,

    #[error("Failed to spawn scheduler worker: {message}")]
    Spawn {
        message: String,
    },
}

/// Errors receiving from a notification stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("Receive timed out after {duration_ms}ms")]
    Timeout {
        duration_ms: u64,
    },

    #[error("Notification stream disconnected")]
    Disconnected,
}

/// Top-level error type for Vigil.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VigilError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cycle error: {0}")]
    Cycle(#[from] CycleError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl VigilError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this error aborted an evaluation cycle.
    #[must_use]
    pub const fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle(_))
    }

    /// Returns true if this is a scheduler misuse or spawn error.
    #[must_use]
    pub const fn is_scheduler(&self) -> bool {
        matches!(self, Self::Scheduler(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns true if retrying the failed operation on a later cycle can succeed.
    ///
    /// Collector failures are usually transient; evaluator faults and
    /// misconfiguration are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Cycle(e) => matches!(e, CycleError::Collector { .. } | CycleError::Panicked { .. }),
            Self::Stream(e) => matches!(e, StreamError::Timeout { .. }),
            Self::Validation(_) | Self::Scheduler(_) | Self::Internal { .. } => false,
        }
    }
}

/// Result type alias for Vigil operations.
pub type VigilResult<T> = Result<T, VigilError>;

/// Renders a caught panic payload as text.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_inverted_bounds() {
        let err = ValidationError::InvertedBounds {
            lower: "20".to_string(),
            upper: "10".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("20"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_cycle_error_carries_event_name() {
        let err = CycleError::Collector {
            event: "cpu".to_string(),
            message: "sensor offline".to_string(),
        };
        assert_eq!(err.event(), "cpu");
        let msg = format!("{err}");
        assert!(msg.contains("sensor offline"));
    }

    #[test]
    fn test_vigil_error_from_cycle() {
        let err: VigilError = CycleError::Collector {
            event: "e".to_string(),
            message: "down".to_string(),
        }
        .into();
        assert!(err.is_cycle());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_evaluator_failure_not_retryable() {
        let err: VigilError = CycleError::Evaluator {
            event: "e".to_string(),
            source: EvaluationError::Incomparable {
                bound: "50.0".to_string(),
            },
        }
        .into();
        assert!(err.is_cycle());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_scheduler_error() {
        let err: VigilError = SchedulerError::AlreadyRunning.into();
        assert!(err.is_scheduler());
        assert!(!err.is_retryable());
        assert!(format!("{err}").contains("already running"));

        let err: VigilError = SchedulerError::Stopping.into();
        assert!(err.is_scheduler());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_stream_timeout_is_retryable() {
        let err: VigilError = StreamError::Timeout { duration_ms: 250 }.into();
        assert!(err.is_retryable());
        assert!(format!("{err}").contains("250ms"));
        let err: VigilError = StreamError::Disconnected.into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_internal_error() {
        let err = VigilError::internal("unexpected state");
        assert!(err.is_internal());
        assert!(format!("{err}").contains("unexpected state"));
    }

    #[test]
    fn test_panic_message_variants() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }
}
