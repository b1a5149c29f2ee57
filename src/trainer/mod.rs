//! Training worker pool.
//!
//! Training is fire-and-forget: callers hand over a closure and return at once.
//! The pool runs those closures on a tokio runtime, either one it owns or one
//! the embedding application already has. Jobs run in no particular order and
//! every submitted job runs exactly once unless the runtime is shut down first.
//!
//! The pool keeps a count of jobs in flight so that callers who need a quiescent
//! point (tests, batch loaders, the interactive `wait` command) can block on it.
//! A job that panics is caught, reported through the [`ErrorReporter`], and
//! counted as finished; it does not take a worker down with it.

mod error;
mod tracker;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};
use tracing::{debug, info};

pub use error::TrainerError;
use tracker::InFlight;

use crate::config::trainer::TrainerConfig;
use crate::error::{report_error, AutocompleteError, ErrorContext, ErrorReporter};

/// Result type for training pool operations.
pub type TrainerResult<T> = Result<T, TrainerError>;

enum Executor {
    /// A runtime created for, and shut down with, the pool.
    Owned(OwnedRuntime),

    /// A runtime owned elsewhere. Jobs go to its blocking pool so that training
    /// never stalls the host's async workers.
    Attached(Handle),
}

/// A runtime the pool built itself.
///
/// Jobs go through `handle`; `runtime` is only kept for shutdown. Stopping from
/// inside an async context never blocks, since tokio forbids it there.
struct OwnedRuntime {
    handle: Handle,
    runtime: Option<Runtime>,
}

impl OwnedRuntime {
    fn new(runtime: Runtime) -> Self {
        Self {
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
        }
    }

    /// Stops the runtime, giving running jobs up to `timeout` outside async code.
    fn stop(&mut self, timeout: Duration) {
        if let Some(runtime) = self.runtime.take() {
            if Handle::try_current().is_ok() {
                runtime.shutdown_background();
            } else {
                runtime.shutdown_timeout(timeout);
            }
        }
    }
}

impl Drop for OwnedRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            if Handle::try_current().is_ok() {
                runtime.shutdown_background();
            }
        }
    }
}

/// Runs training jobs on background workers.
pub struct TrainingPool {
    executor: Executor,
    in_flight: Arc<InFlight>,
    reporter: Option<Arc<dyn ErrorReporter>>,
    shutdown_timeout: Duration,
}

impl TrainingPool {
    /// Starts a pool for `config`.
    ///
    /// Called from within a tokio runtime, the pool attaches to that runtime
    /// (see [`attached`](Self::attached)) and `worker_threads` is not used.
    /// Otherwise it starts its own multi-threaded runtime.
    ///
    /// # Arguments
    ///
    /// * `config` - Worker count, thread naming and shutdown deadline.
    ///
    /// # Returns
    ///
    /// * `Ok(TrainingPool)` - The running pool.
    /// * `Err(TrainerError::RuntimeBuild)` - If the runtime could not be started.
    pub fn new(config: &TrainerConfig) -> TrainerResult<Self> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(Self::attached(handle, config));
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .thread_name(config.thread_name.clone())
            .build()
            .map_err(TrainerError::RuntimeBuild)?;

        info!(
            workers = config.worker_threads,
            thread_name = %config.thread_name,
            "Training pool started"
        );

        Ok(Self::from_executor(Executor::Owned(OwnedRuntime::new(runtime)), config))
    }

    /// Creates a pool that submits jobs to an existing tokio runtime.
    pub fn attached(handle: Handle, config: &TrainerConfig) -> Self {
        debug!("Training pool attached to existing runtime");
        Self::from_executor(Executor::Attached(handle), config)
    }

    fn from_executor(executor: Executor, config: &TrainerConfig) -> Self {
        Self {
            executor,
            in_flight: Arc::new(InFlight::default()),
            reporter: None,
            shutdown_timeout: Duration::from_millis(config.shutdown_timeout_ms),
        }
    }

    /// Routes panics from jobs to `reporter` instead of the global reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Schedules `job` to run on a worker and returns immediately.
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let guard = self.in_flight.begin();
        let reporter = self.reporter.clone();

        let run = move || {
            let _guard = guard;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
                let context = ErrorContext::new(
                    AutocompleteError::Trainer(TrainerError::JobPanicked(panic_message(&*payload))),
                    "trainer",
                );
                match reporter {
                    Some(reporter) => reporter.report(context),
                    None => report_error(context),
                }
            }
        };

        match &self.executor {
            Executor::Owned(owned) => {
                owned.handle.spawn(async move { run() });
            }
            Executor::Attached(handle) => {
                handle.spawn_blocking(run);
            }
        }
    }

    /// Jobs submitted but not yet finished.
    pub fn pending(&self) -> usize {
        self.in_flight.pending()
    }

    /// Blocks until every submitted job has finished.
    ///
    /// Must not be called from inside a job; the job would wait on itself.
    pub fn wait_idle(&self) {
        self.in_flight.wait_idle();
    }

    /// Blocks until every submitted job has finished or `timeout` elapses.
    ///
    /// Returns `true` if the pool went idle in time.
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        self.in_flight.wait_idle_for(timeout)
    }

    /// Waits for outstanding jobs, then stops the pool.
    ///
    /// An owned runtime is shut down; an attached one is left running. Inside an
    /// async context an owned runtime is released in the background instead of
    /// being waited on.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - All jobs finished before the configured deadline.
    /// * `Err(TrainerError::ShutdownTimeout)` - Jobs were still running; the pool
    ///   is stopped regardless.
    pub fn shutdown(self) -> TrainerResult<()> {
        let drained = self.in_flight.wait_idle_for(self.shutdown_timeout);
        let pending = self.in_flight.pending();

        if let Executor::Owned(mut owned) = self.executor {
            owned.stop(self.shutdown_timeout);
        }
        info!(pending, "Training pool stopped");

        if drained {
            Ok(())
        } else {
            Err(TrainerError::ShutdownTimeout {
                pending,
                timeout: self.shutdown_timeout,
            })
        }
    }
}

impl fmt::Debug for TrainingPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let executor = match self.executor {
            Executor::Owned(_) => "owned",
            Executor::Attached(_) => "attached",
        };
        f.debug_struct("TrainingPool")
            .field("executor", &executor)
            .field("pending", &self.pending())
            .field("shutdown_timeout", &self.shutdown_timeout)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
