//! Future: a handle to the eventual outcome of a background computation

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use tracing::{debug, trace, warn};

use crate::completion::Completion;
use crate::config::FutureConfig;
use crate::error::{FutureError, Result};
use crate::safety::catch_panic;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Configuration used by [`Future::new`], loaded once from the environment
static DEFAULT_CONFIG: Lazy<Arc<FutureConfig>> = Lazy::new(|| {
    let config = FutureConfig::from_env().unwrap_or_else(|err| {
        warn!(error = %err, "Invalid future configuration in environment, using defaults");
        FutureConfig::default()
    });
    Arc::new(config)
});

/// Lifecycle state of a future
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FutureState {
    /// The computation is still running
    Pending,
    /// The outcome has been written and will never change
    Completed,
}

struct Inner<T> {
    id: u64,
    config: Arc<FutureConfig>,
    completion: Completion<T>,
}

/// A single-assignment handle to the result of a computation running on its
/// own background thread.
///
/// Constructing a future starts the computation immediately. The computation
/// runs exactly once; its outcome is cached and every retrieval, from any
/// thread, observes the same outcome. Handles are cheap to clone and all
/// clones share the same cell.
///
/// There is no cancellation. Giving up on a bounded wait, or dropping every
/// handle, leaves the computation running to completion.
///
/// # Example
/// ```rust
/// use ouroboros_future::Future;
///
/// let user_id = Future::new(|| Ok(123));
/// let name = user_id.map(|id| format!("User{}", id));
///
/// assert_eq!(name.get(), Ok("User123".to_string()));
/// ```
pub struct Future<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Future<T>
where
    T: Send + Sync + 'static,
{
    /// Start `compute` on a background thread.
    ///
    /// A panic inside `compute` completes the future with
    /// [`FutureError::Panicked`].
    pub fn new<F>(compute: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        Self::spawn(default_config(), compute)
    }

    /// Start `compute` on a background thread built from `config`
    pub fn with_config<F>(config: &FutureConfig, compute: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        Self::spawn(Arc::new(config.clone()), compute)
    }

    /// A future that completes with `value` without doing any work
    pub fn successful(value: T) -> Self {
        Self::new(move || Ok(value))
    }

    /// A future that completes with `error` without doing any work
    pub fn failed(error: impl Into<FutureError>) -> Self {
        let error = error.into();
        Self::new(move || Err(error))
    }

    pub(crate) fn spawn<F>(config: Arc<FutureConfig>, compute: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let inner = Arc::new(Inner {
            id,
            config,
            completion: Completion::new(),
        });

        let task = Arc::clone(&inner);
        let spawned = inner.config.thread_builder(id).spawn(move || {
            let outcome = catch_panic(compute);
            match &outcome {
                Ok(_) => debug!(future_id = task.id, ok = true, "Computation completed"),
                Err(FutureError::Panicked(msg)) => {
                    warn!(future_id = task.id, panic = %msg, "Computation panicked")
                }
                Err(err) => debug!(future_id = task.id, ok = false, error = %err, "Computation completed"),
            }
            task.completion.complete(outcome);
        });

        // The thread handle is dropped; the computation runs detached.
        if let Err(err) = spawned {
            warn!(future_id = id, error = %err, "Failed to spawn computation thread");
            inner
                .completion
                .complete(Err(FutureError::Spawn(err.to_string())));
        }

        Self { inner }
    }

    /// Configuration this future's thread was built from
    pub(crate) fn config(&self) -> Arc<FutureConfig> {
        Arc::clone(&self.inner.config)
    }
}

/// Shared configuration used by [`Future::new`]
pub(crate) fn default_config() -> Arc<FutureConfig> {
    Arc::clone(&DEFAULT_CONFIG)
}

impl<T> Future<T> {
    /// Process-unique id of this future
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn state(&self) -> FutureState {
        if self.inner.completion.is_completed() {
            FutureState::Completed
        } else {
            FutureState::Pending
        }
    }

    pub fn is_completed(&self) -> bool {
        self.inner.completion.is_completed()
    }
}

impl<T: Clone> Future<T> {
    /// Block until the computation completes and return its outcome.
    ///
    /// Returns immediately once completed. Every call, from any thread,
    /// returns a clone of the same outcome.
    pub fn get(&self) -> Result<T> {
        self.inner.completion.wait().clone()
    }

    /// Wait for the outcome for at most `timeout`.
    ///
    /// Returns `None` if the deadline passes first. That is "not known yet",
    /// not a failure: the computation keeps running and a later call can
    /// still observe its real outcome.
    ///
    /// # Example
    /// ```rust
    /// use ouroboros_future::Future;
    /// use std::time::Duration;
    ///
    /// let slow = Future::new(|| {
    ///     std::thread::sleep(Duration::from_millis(200));
    ///     Ok("done")
    /// });
    ///
    /// assert_eq!(slow.get_with_timeout(Duration::from_millis(10)), None);
    /// assert_eq!(slow.get(), Ok("done"));
    /// ```
    pub fn get_with_timeout(&self, timeout: Duration) -> Option<Result<T>> {
        let outcome = self.inner.completion.wait_timeout(timeout).cloned();
        if outcome.is_none() {
            trace!(future_id = self.inner.id, timeout = ?timeout, "Wait timed out");
        }
        outcome
    }

    /// Outcome if already completed, without blocking
    pub fn try_get(&self) -> Option<Result<T>> {
        self.inner.completion.peek().cloned()
    }
}

impl<T> Clone for Future<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Future<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Future")
            .field("id", &self.inner.id)
            .field("state", &self.state())
            .finish()
    }
}
