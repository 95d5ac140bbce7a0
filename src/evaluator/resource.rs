use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::EvaluationError;
use crate::threshold::ThresholdProvider;

use super::comparison::compare;
use super::ConditionEvaluator;

/// Key of the CPU usage field in a [`ResourceUsage`] snapshot.
pub const CPU_FIELD: &str = "cpu";
/// Key of the memory usage field in a [`ResourceUsage`] snapshot.
pub const MEMORY_FIELD: &str = "memory";

/// Resource usage snapshot keyed by field name (`cpu`, `memory`, ...).
pub type ResourceUsage = HashMap<String, f64>;

/// Holds when resource pressure has dropped.
///
/// Both the CPU and memory fields must be present, and at least one of them
/// must be at or below its threshold. Thresholds are read on every test.
pub struct DecreaseResourceUsage {
    cpu_threshold: Arc<dyn ThresholdProvider<f64>>,
    memory_threshold: Arc<dyn ThresholdProvider<f64>>,
}

impl DecreaseResourceUsage {
    /// Thresholds are percentages, compared inclusively.
    #[must_use]
    pub fn new(
        cpu_threshold: Arc<dyn ThresholdProvider<f64>>,
        memory_threshold: Arc<dyn ThresholdProvider<f64>>,
    ) -> Self {
        Self {
            cpu_threshold,
            memory_threshold,
        }
    }
}

impl fmt::Debug for DecreaseResourceUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecreaseResourceUsage")
            .field("cpu_threshold", &self.cpu_threshold.threshold())
            .field("memory_threshold", &self.memory_threshold.threshold())
            .finish()
    }
}

impl ConditionEvaluator<ResourceUsage> for DecreaseResourceUsage {
    fn test(&self, metric: &ResourceUsage) -> bool {
        let (Some(cpu), Some(memory)) = (metric.get(CPU_FIELD), metric.get(MEMORY_FIELD)) else {
            return false;
        };
        *cpu <= self.cpu_threshold.threshold() || *memory <= self.memory_threshold.threshold()
    }

    fn try_test(&self, metric: &ResourceUsage) -> Result<bool, EvaluationError> {
        let (Some(cpu), Some(memory)) = (metric.get(CPU_FIELD), metric.get(MEMORY_FIELD)) else {
            return Ok(false);
        };
        Ok(compare(cpu, &self.cpu_threshold.threshold())?.is_le()
            || compare(memory, &self.memory_threshold.threshold())?.is_le())
    }
}
