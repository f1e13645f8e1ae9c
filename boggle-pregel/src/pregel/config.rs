//! Pregel runtime configuration
//!
//! Configuration for the superstep engine: the round bound, how many vertex
//! computations may run at once, and per-superstep tracing.

use serde::{Deserialize, Serialize};

use super::error::PregelError;

/// Pregel runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PregelConfig {
    /// Maximum supersteps before forced termination
    pub max_supersteps: usize,

    /// Maximum concurrent vertex computations
    pub parallelism: usize,

    /// Emit a debug event for every superstep
    pub tracing_enabled: bool,
}

impl Default for PregelConfig {
    fn default() -> Self {
        Self {
            max_supersteps: 100,
            parallelism: num_cpus::get(),
            tracing_enabled: true,
        }
    }
}

impl PregelConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum supersteps
    pub fn with_max_supersteps(mut self, max: usize) -> Self {
        self.max_supersteps = max;
        self
    }

    /// Set parallelism level
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    /// Enable or disable tracing
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.tracing_enabled = enabled;
        self
    }

    /// Reject configurations the runtime cannot honor
    pub fn validate(&self) -> Result<(), PregelError> {
        if self.max_supersteps == 0 {
            return Err(PregelError::config_error(
                "max_supersteps must be a positive integer",
            ));
        }
        if self.parallelism == 0 {
            return Err(PregelError::config_error("parallelism must be at least 1"));
        }
        Ok(())
    }
}
