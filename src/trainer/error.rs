//! Error types for the training worker pool.

use std::time::Duration;

/// Errors that can occur in the training worker pool.
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    /// The tokio runtime backing the pool could not be started.
    #[error("Failed to start training runtime: {0}")]
    RuntimeBuild(#[source] std::io::Error),

    /// Training jobs were still running when the shutdown deadline passed.
    #[error("{pending} training job(s) still running after {timeout:?}")]
    ShutdownTimeout {
        /// Jobs that had not finished.
        pending: usize,
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// A training job panicked on a worker.
    #[error("Training job panicked: {0}")]
    JobPanicked(String),
}
