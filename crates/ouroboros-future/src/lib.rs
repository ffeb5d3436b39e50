//! Thread-backed futures for ouroboros
//!
//! A [`Future`] is a single-assignment cell holding the eventual outcome of a
//! computation that runs on its own background thread. Futures compose with a
//! small set of combinators so callers never synchronize by hand.
//!
//! # Features
//! - At-most-once completion, cached for every reader
//! - Blocking and bounded retrieval (`get`, `get_with_timeout`)
//! - Error short-circuiting `map`, `flat_map` and ordered [`sequence`]
//! - Panics inside computations become [`FutureError::Panicked`]
//! - Tokio bridge for awaiting from async code
//!
//! There is no cancellation. A computation always runs to completion, even
//! after every observer has stopped waiting.
//!
//! # Example
//! ```rust
//! use ouroboros_future::{sequence, Future, FutureError};
//! use std::time::Duration;
//!
//! let items: Vec<_> = (1..=3)
//!     .map(|id| Future::new(move || Ok(format!("Processed item {}", id))))
//!     .collect();
//!
//! let all = sequence(items);
//! match all.get_with_timeout(Duration::from_secs(2)) {
//!     Some(Ok(results)) => assert_eq!(results.len(), 3),
//!     Some(Err(err)) => panic!("processing failed: {}", err),
//!     None => panic!("still processing"),
//! }
//!
//! let missing: Future<String> = Future::failed(FutureError::computation("user 999 not found"));
//! assert!(missing.get().is_err());
//! ```

pub mod combinators;
mod completion;
pub mod config;
pub mod error;
pub mod future;
mod runtime;
mod safety;

pub use combinators::sequence;
pub use config::FutureConfig;
pub use error::{FutureError, Result};
pub use future::{Future, FutureState};
