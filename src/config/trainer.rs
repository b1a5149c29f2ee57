//! Training pool configuration module.
//!
//! This module defines how many workers ingest passages and how the pool
//! behaves when it is stopped.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Training pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of worker threads ingesting passages
    pub worker_threads: usize,

    /// Name given to worker threads (visible in logs and debuggers)
    pub thread_name: String,

    /// How long shutdown waits for queued passages, in milliseconds
    pub shutdown_timeout_ms: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get(),
            thread_name: "mdk-trainer".to_string(),
            shutdown_timeout_ms: 5_000,
        }
    }
}

impl Validate for TrainerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.worker_threads == 0 {
            return Err(ConfigError::ValidationError(
                "worker_threads must be greater than 0".to_string(),
            ));
        }

        if self.thread_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "thread_name cannot be empty".to_string(),
            ));
        }

        if self.shutdown_timeout_ms == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "trainer.shutdown_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
