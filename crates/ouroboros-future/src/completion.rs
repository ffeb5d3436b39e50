//! Single-assignment outcome slot with a one-shot completion signal.
//!
//! The outcome lives in a [`OnceCell`], so it can be written exactly once and
//! read without locking afterwards. Waiters park on a [`Condvar`]; the
//! mutex it pairs with guards no data and only orders "check the cell" against
//! "broadcast", which rules out missed wakeups.

use std::time::{Duration, Instant};

use once_cell::sync::OnceCell;
use parking_lot::{Condvar, Mutex};

use crate::error::FutureError;

/// Shared completion cell
pub(crate) struct Completion<T> {
    outcome: OnceCell<Result<T, FutureError>>,
    lock: Mutex<()>,
    signal: Condvar,
}

impl<T> Completion<T> {
    /// Create a pending cell
    pub(crate) fn new() -> Self {
        Self {
            outcome: OnceCell::new(),
            lock: Mutex::new(()),
            signal: Condvar::new(),
        }
    }

    /// Store the outcome and wake every waiter.
    ///
    /// Returns false, leaving the stored outcome untouched, if the cell was
    /// already completed.
    pub(crate) fn complete(&self, outcome: Result<T, FutureError>) -> bool {
        if self.outcome.set(outcome).is_err() {
            return false;
        }
        // Taking the lock means no waiter sits between its empty check and
        // its park while we broadcast.
        let _guard = self.lock.lock();
        self.signal.notify_all();
        true
    }

    /// Outcome if already completed
    pub(crate) fn peek(&self) -> Option<&Result<T, FutureError>> {
        self.outcome.get()
    }

    pub(crate) fn is_completed(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Block until completed
    pub(crate) fn wait(&self) -> &Result<T, FutureError> {
        if let Some(outcome) = self.outcome.get() {
            return outcome;
        }

        let mut guard = self.lock.lock();
        loop {
            if let Some(outcome) = self.outcome.get() {
                return outcome;
            }
            self.signal.wait(&mut guard);
        }
    }

    /// Block until completed or `timeout` elapses; `None` on timeout
    pub(crate) fn wait_timeout(&self, timeout: Duration) -> Option<&Result<T, FutureError>> {
        if let Some(outcome) = self.outcome.get() {
            return Some(outcome);
        }

        // An unrepresentable deadline is as good as no deadline.
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => return Some(self.wait()),
        };

        let mut guard = self.lock.lock();
        loop {
            if let Some(outcome) = self.outcome.get() {
                return Some(outcome);
            }
            if self.signal.wait_until(&mut guard, deadline).timed_out() {
                return self.outcome.get();
            }
        }
    }
}
