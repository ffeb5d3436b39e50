//! Background thread configuration.
//!
//! # Example
//! ```rust
//! use ouroboros_future::{Future, FutureConfig};
//!
//! let config = FutureConfig::default()
//!     .with_thread_name_prefix("fetch")
//!     .with_stack_size(256 * 1024);
//!
//! let future = Future::with_config(&config, || Ok(42));
//! assert_eq!(future.get(), Ok(42));
//! ```

use std::thread;

use crate::error::FutureError;

/// Default prefix for background thread names
pub const DEFAULT_THREAD_NAME_PREFIX: &str = "ouroboros-future";

/// Smallest stack size accepted from the environment (64KB)
pub const MIN_STACK_SIZE: usize = 64 * 1024;

/// Configuration for the thread that runs a future's computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FutureConfig {
    /// Thread name prefix; the future id is appended (default: ouroboros-future)
    pub thread_name_prefix: String,

    /// Stack size in bytes (default: platform default)
    pub stack_size: Option<usize>,
}

impl Default for FutureConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
            stack_size: None,
        }
    }
}

impl FutureConfig {
    /// Create configuration from environment variables.
    ///
    /// - `OUROBOROS_FUTURE_THREAD_PREFIX` -> thread name prefix
    /// - `OUROBOROS_FUTURE_STACK_SIZE` -> stack size in bytes
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, FutureError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from any key lookup using the environment variable names
    pub fn from_lookup<L>(lookup: L) -> Result<Self, FutureError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let thread_name_prefix = lookup("OUROBOROS_FUTURE_THREAD_PREFIX")
            .unwrap_or_else(|| DEFAULT_THREAD_NAME_PREFIX.to_string());

        if thread_name_prefix.is_empty() {
            return Err(FutureError::Configuration(
                "OUROBOROS_FUTURE_THREAD_PREFIX must not be empty".to_string(),
            ));
        }

        if thread_name_prefix.contains('\0') {
            return Err(FutureError::Configuration(
                "OUROBOROS_FUTURE_THREAD_PREFIX must not contain NUL bytes".to_string(),
            ));
        }

        let stack_size = match lookup("OUROBOROS_FUTURE_STACK_SIZE") {
            Some(raw) => Some(parse_stack_size(&raw)?),
            None => None,
        };

        Ok(Self {
            thread_name_prefix,
            stack_size,
        })
    }

    /// Set the thread name prefix
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the stack size in bytes
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Thread builder for the future with the given id.
    ///
    /// NUL bytes are dropped from the name; `Builder::spawn` panics on them.
    pub(crate) fn thread_builder(&self, id: u64) -> thread::Builder {
        let prefix = self.thread_name_prefix.replace('\0', "");
        let builder = thread::Builder::new().name(format!("{}-{}", prefix, id));
        match self.stack_size {
            Some(size) => builder.stack_size(size),
            None => builder,
        }
    }
}

fn parse_stack_size(raw: &str) -> Result<usize, FutureError> {
    let size: usize = raw.trim().parse().map_err(|_| {
        FutureError::Configuration(format!(
            "Invalid OUROBOROS_FUTURE_STACK_SIZE: '{}' is not a byte count",
            raw
        ))
    })?;

    if size < MIN_STACK_SIZE {
        return Err(FutureError::Configuration(format!(
            "Invalid OUROBOROS_FUTURE_STACK_SIZE: {} is below the minimum of {} bytes",
            size, MIN_STACK_SIZE
        )));
    }

    Ok(size)
}
