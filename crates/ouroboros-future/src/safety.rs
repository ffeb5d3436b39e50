//! Panic boundary for background computations.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::FutureError;

/// Run a computation, converting a panic into [`FutureError::Panicked`].
///
/// Every computation and transform runs behind this boundary. A panic that
/// escaped would kill the background thread before it completes the cell,
/// leaving every waiter blocked forever.
pub(crate) fn catch_panic<T, F>(f: F) -> Result<T, FutureError>
where
    F: FnOnce() -> Result<T, FutureError>,
{
    // The cell is only written after `f` returns, so no shared state is
    // observed half-updated if it unwinds.
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(FutureError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
