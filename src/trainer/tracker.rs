//! In-flight job accounting for the training pool.
//!
//! Submitting a job takes a [`JobGuard`]; dropping the guard marks the job as
//! finished, whether it ran to completion, panicked, or was discarded by a
//! runtime that shut down before reaching it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// Counts submitted jobs that have not finished yet.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    count: Mutex<usize>,
    idle: Condvar,
}

impl InFlight {
    /// Registers a new job and returns the guard that will retire it.
    pub(crate) fn begin(self: &Arc<Self>) -> JobGuard {
        *self.count.lock() += 1;
        JobGuard {
            tracker: Arc::clone(self),
        }
    }

    fn finish(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.idle.notify_all();
        }
    }

    /// Jobs submitted but not yet finished.
    pub(crate) fn pending(&self) -> usize {
        *self.count.lock()
    }

    /// Blocks until no job is pending.
    pub(crate) fn wait_idle(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.idle.wait(&mut count);
        }
    }

    /// Blocks until no job is pending or `timeout` elapses.
    ///
    /// Returns `true` if the pool went idle in time.
    pub(crate) fn wait_idle_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut count = self.count.lock();
        while *count > 0 {
            if self.idle.wait_until(&mut count, deadline).timed_out() {
                return *count == 0;
            }
        }
        true
    }
}

/// Retires one job from its [`InFlight`] tracker when dropped.
#[derive(Debug)]
pub(crate) struct JobGuard {
    tracker: Arc<InFlight>,
}

impl Drop for JobGuard {
    fn drop(&mut self) {
        self.tracker.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_guard_retires_job() {
        let tracker = Arc::new(InFlight::default());
        let first = tracker.begin();
        let second = tracker.begin();
        assert_eq!(tracker.pending(), 2);

        drop(first);
        assert_eq!(tracker.pending(), 1);
        drop(second);
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn test_wait_idle_for_times_out() {
        let tracker = Arc::new(InFlight::default());
        let _guard = tracker.begin();
        assert!(!tracker.wait_idle_for(Duration::from_millis(20)));
    }

    #[test]
    fn test_wait_idle_wakes_on_last_guard() {
        let tracker = Arc::new(InFlight::default());
        let guards: Vec<JobGuard> = (0..4).map(|_| tracker.begin()).collect();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            drop(guards);
        });

        tracker.wait_idle();
        assert_eq!(tracker.pending(), 0);
        handle.join().unwrap();
    }
}
