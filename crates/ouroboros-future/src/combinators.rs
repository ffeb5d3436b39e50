//! Combinators that build dependent futures
//!
//! Each combinator returns a new [`Future`] whose own background thread waits
//! on its upstream future(s). An upstream error is passed through unchanged
//! and no downstream transform runs after it.

use tracing::trace;

use crate::error::Result;
use crate::future::{default_config, Future};

impl<T> Future<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Transform the value once it is available.
    ///
    /// If this future fails, `transform` is never called and the error is
    /// passed through. A panic inside `transform` completes the returned
    /// future with [`FutureError::Panicked`](crate::FutureError::Panicked).
    pub fn map<U, F>(&self, transform: F) -> Future<U>
    where
        U: Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let upstream = self.clone();
        Future::spawn(self.config(), move || upstream.get().map(transform))
    }

    /// Chain a dependent future built from the value once it is available.
    ///
    /// The returned future adopts the outcome of the future that `transform`
    /// produces. If this future fails, `transform` is never called.
    ///
    /// # Example
    /// ```rust
    /// use ouroboros_future::Future;
    ///
    /// let user_id = Future::new(|| Ok(123));
    /// let email = user_id
    ///     .flat_map(|id| Future::new(move || Ok(format!("User{}", id))))
    ///     .flat_map(|name| Future::new(move || Ok(format!("{}@example.com", name))));
    ///
    /// assert_eq!(email.get(), Ok("User123@example.com".to_string()));
    /// ```
    pub fn flat_map<U, F>(&self, transform: F) -> Future<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Future<U> + Send + 'static,
    {
        let upstream = self.clone();
        Future::spawn(self.config(), move || {
            let value = upstream.get()?;
            transform(value).get()
        })
    }
}

/// Join many futures into one future of their values, in input order.
///
/// Inputs are awaited one after another in list order. The first error met
/// in that order becomes the outcome and the collected values are dropped;
/// a later input failing sooner does not win. Inputs are never cancelled,
/// they were already running before this call and keep running.
///
/// An empty input completes with an empty vector.
///
/// # Example
/// ```rust
/// use ouroboros_future::{sequence, Future};
///
/// let all = sequence(vec![Future::successful(1), Future::successful(2), Future::successful(3)]);
/// assert_eq!(all.get(), Ok(vec![1, 2, 3]));
/// ```
pub fn sequence<T, I>(futures: I) -> Future<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
    I: IntoIterator<Item = Future<T>>,
{
    let futures: Vec<Future<T>> = futures.into_iter().collect();
    let config = futures
        .first()
        .map(|future| future.config())
        .unwrap_or_else(default_config);

    Future::spawn(config, move || collect_in_order(&futures))
}

fn collect_in_order<T: Clone>(futures: &[Future<T>]) -> Result<Vec<T>> {
    let mut results = Vec::with_capacity(futures.len());
    for (index, future) in futures.iter().enumerate() {
        match future.get() {
            Ok(value) => results.push(value),
            Err(err) => {
                trace!(
                    index,
                    future_id = future.id(),
                    error = %err,
                    "Sequence short-circuited"
                );
                return Err(err);
            }
        }
    }
    Ok(results)
}
