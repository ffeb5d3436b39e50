//! Tokio bridge for awaiting futures from async code
//!
//! Waiting on a [`Future`] blocks the calling thread, which must not happen on
//! a Tokio worker. These methods move the wait onto Tokio's blocking pool.
//! Dropping the returned async value stops waiting but, as everywhere else,
//! never cancels the computation.

use std::time::Duration;

use tokio::task::{self, JoinError};

use crate::error::{FutureError, Result};
use crate::future::Future;

impl<T> Future<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Await the outcome without blocking the async runtime.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn get_async(&self) -> Result<T> {
        if let Some(outcome) = self.try_get() {
            return outcome;
        }

        let future = self.clone();
        match task::spawn_blocking(move || future.get()).await {
            Ok(outcome) => outcome,
            Err(err) => Err(join_error(err)),
        }
    }

    /// Await the outcome for at most `timeout`; `None` means still pending.
    pub async fn get_with_timeout_async(&self, timeout: Duration) -> Option<Result<T>> {
        if let Some(outcome) = self.try_get() {
            return Some(outcome);
        }

        let future = self.clone();
        match task::spawn_blocking(move || future.get_with_timeout(timeout)).await {
            Ok(outcome) => outcome,
            Err(err) => Some(Err(join_error(err))),
        }
    }
}

/// Only a panicking wait counts as a panic; a wait cancelled by runtime
/// shutdown is reported as a computation error.
fn join_error(err: JoinError) -> FutureError {
    if err.is_panic() {
        FutureError::Panicked(format!("Blocking wait failed: {}", err))
    } else {
        FutureError::Computation(format!("Blocking wait cancelled: {}", err))
    }
}
