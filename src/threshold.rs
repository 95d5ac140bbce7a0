//! Threshold providers.
//!
//! A `ThresholdProvider` supplies the bound an evaluator compares against.
//! Keeping the bound behind a provider lets it be computed at call time, for
//! example from a `ThresholdRegistry` that operators update while schedulers
//! are running.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{ValidationError, VigilResult};

/// Supplies a comparison bound.
pub trait ThresholdProvider<T>: Send + Sync {
    /// Returns the current threshold.
    fn threshold(&self) -> T;
}

impl<T, F> ThresholdProvider<T> for F
where
    F: Fn() -> T + Send + Sync,
{
    fn threshold(&self) -> T {
        self()
    }
}

/// A provider that always returns the same bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedThreshold<T>(pub T);

impl<T> ThresholdProvider<T> for FixedThreshold<T>
where
    T: Clone + Send + Sync,
{
    fn threshold(&self) -> T {
        self.0.clone()
    }
}

/// Named thresholds that can be changed at runtime.
///
/// Providers handed out by [`ThresholdRegistry::provider`] read the table on
/// every call, so an update is picked up by the next evaluation.
#[derive(Debug, Default, Clone)]
pub struct ThresholdRegistry {
    values: Arc<RwLock<HashMap<String, f64>>>,
}

impl ThresholdRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load thresholds from a flat JSON object, e.g. `{"cpu": 75.0, "memory": 80.0}`.
    pub fn from_json_str(json: &str) -> VigilResult<Self> {
        let values: HashMap<String, f64> = serde_json::from_str(json).map_err(|e| {
            ValidationError::InvalidConfig {
                reason: format!("invalid threshold table: {e}"),
            }
        })?;
        Ok(Self {
            values: Arc::new(RwLock::new(values)),
        })
    }

    /// Set (or replace) a named threshold.
    pub fn set(&self, name: impl Into<String>, value: f64) {
        let mut guard = self.values.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(name.into(), value);
    }

    /// Remove a named threshold. Returns the previous value if present.
    pub fn remove(&self, name: &str) -> Option<f64> {
        let mut guard = self.values.write().unwrap_or_else(PoisonError::into_inner);
        guard.remove(name)
    }

    /// Current value of a named threshold.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        let guard = self.values.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(name).copied()
    }

    /// A provider that reads `name` on every call, falling back to `fallback`
    /// while the name is unset.
    #[must_use]
    pub fn provider(&self, name: impl Into<String>, fallback: f64) -> RegistryThreshold {
        RegistryThreshold {
            registry: self.clone(),
            name: name.into(),
            fallback,
        }
    }
}

/// Provider backed by a [`ThresholdRegistry`] entry.
#[derive(Debug, Clone)]
pub struct RegistryThreshold {
    registry: ThresholdRegistry,
    name: String,
    fallback: f64,
}

impl RegistryThreshold {
    /// Registry key this provider reads.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ThresholdProvider<f64> for RegistryThreshold {
    fn threshold(&self) -> f64 {
        self.registry.get(&self.name).unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_a_provider() {
        let provider = || 42_u32;
        assert_eq!(provider.threshold(), 42);
    }

    #[test]
    fn fixed_threshold_returns_bound() {
        assert_eq!(FixedThreshold(50.0).threshold(), 50.0);
    }

    #[test]
    fn registry_provider_reads_at_call_time() {
        let registry = ThresholdRegistry::new();
        let cpu = registry.provider("cpu", 90.0);
        assert_eq!(cpu.threshold(), 90.0);

        registry.set("cpu", 60.0);
        assert_eq!(cpu.threshold(), 60.0);

        assert_eq!(registry.remove("cpu"), Some(60.0));
        assert_eq!(cpu.threshold(), 90.0);
    }

    #[test]
    fn registry_loads_from_json() {
        let registry = ThresholdRegistry::from_json_str(r#"{"cpu": 75.0, "memory": 80}"#).unwrap();
        assert_eq!(registry.get("cpu"), Some(75.0));
        assert_eq!(registry.get("memory"), Some(80.0));
        assert_eq!(registry.get("disk"), None);
    }

    #[test]
    fn registry_rejects_malformed_json() {
        let err = ThresholdRegistry::from_json_str(r#"{"cpu": "high"}"#).unwrap_err();
        assert!(err.is_validation());
    }
}
