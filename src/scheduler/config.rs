use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VigilResult};

/// What the continuous scheduler does with ticks that came due while a slow
/// cycle was still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissedTickPolicy {
    /// Run overdue ticks back-to-back until caught up.
    #[default]
    Burst,
    /// Drop overdue ticks and resume at the next future slot of the cadence.
    Skip,
}

/// Settings for [`ContinuousScheduler`](super::ContinuousScheduler).
///
/// Deserializes from JSON such as `{"interval_ms": 250, "missed_ticks": "skip"}`;
/// absent fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuousSchedulerConfig {
    /// Period between scheduled ticks.
    #[serde(rename = "interval_ms", with = "millis")]
    pub interval: Duration,
    /// Catch-up behavior for overdue ticks.
    pub missed_ticks: MissedTickPolicy,
    /// Name given to the worker thread.
    pub thread_name: String,
}

impl Default for ContinuousSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            missed_ticks: MissedTickPolicy::Burst,
            thread_name: "vigil-scheduler".to_string(),
        }
    }
}

impl ContinuousSchedulerConfig {
    /// Default settings with the given interval.
    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> VigilResult<Self> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ValidationError::InvalidConfig {
            reason: format!("invalid scheduler config: {e}"),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the worker cannot run with.
    pub fn validate(&self) -> VigilResult<()> {
        if self.interval.is_zero() {
            return Err(ValidationError::InvalidInterval.into());
        }
        if self.thread_name.contains('\0') {
            return Err(ValidationError::InvalidConfig {
                reason: "thread name contains a NUL byte".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
