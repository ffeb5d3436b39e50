//! Integration tests for the future contract: completion, bounded retrieval,
//! combinator short-circuiting and concurrent readers.

use ouroboros_future::{sequence, Future, FutureError, FutureState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

/// Helper to create a future that sleeps before yielding `value`
fn after<T: Send + Sync + 'static>(delay: Duration, value: T) -> Future<T> {
    Future::new(move || {
        thread::sleep(delay);
        Ok(value)
    })
}

#[test]
fn test_successful_yields_value() {
    let _ = tracing_subscriber::fmt::try_init();

    for v in [0, 1, -7, i64::MAX] {
        assert_eq!(Future::successful(v).get(), Ok(v));
    }
}

#[test]
fn test_failed_yields_error() {
    for msg in ["an error occurred", "timeout upstream", ""] {
        let err = FutureError::computation(msg);
        assert_eq!(Future::<u32>::failed(err.clone()).get(), Err(err));
    }
}

#[test]
fn test_map_on_failed_never_invokes_transform() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let err = FutureError::computation("boom");
    let mapped = Future::<i32>::failed(err.clone()).map(move |x| {
        counter.fetch_add(1, Ordering::SeqCst);
        x + 1
    });

    assert_eq!(mapped.get(), Err(err));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_flat_map_matches_direct_application() {
    let g = |v: i32| -> Future<String> { Future::new(move || Ok(format!("Fetched {} items", v))) };

    for v in [0, 5, 10] {
        let chained = Future::successful(v).flat_map(g);
        assert_eq!(chained.get(), g(v).get());
    }
}

#[test]
fn test_sequence_all_successful() {
    let all = sequence(vec![
        Future::successful(1),
        Future::successful(2),
        Future::successful(3),
    ]);
    assert_eq!(all.get(), Ok(vec![1, 2, 3]));
}

#[test]
fn test_sequence_with_failure() {
    let err = FutureError::computation("future 2 failed");
    let all = sequence(vec![
        Future::successful(1),
        Future::failed(err.clone()),
        Future::successful(3),
    ]);
    assert_eq!(all.get(), Err(err));
}

#[test]
fn test_timeout_not_reached() {
    let fast = after(Duration::from_millis(500), "Fast result");
    assert_eq!(
        fast.get_with_timeout(Duration::from_secs(2)),
        Some(Ok("Fast result"))
    );
}

#[test]
fn test_timeout_reached_without_cancellation() {
    let slow = after(Duration::from_secs(3), "Slow result");

    let start = Instant::now();
    assert_eq!(slow.get_with_timeout(Duration::from_secs(1)), None);
    assert!(start.elapsed() >= Duration::from_secs(1));
    assert_eq!(slow.state(), FutureState::Pending);

    // The computation kept running after the observer gave up
    assert_eq!(slow.get(), Ok("Slow result"));
    assert_eq!(slow.state(), FutureState::Completed);
}

#[test]
fn test_compute_runs_once_with_concurrent_readers() {
    const READERS: usize = 10;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let future = Future::new(move || {
        thread::sleep(Duration::from_millis(100));
        Ok(counter.fetch_add(1, Ordering::SeqCst) + 100)
    });

    let mut handles = vec![];
    for _ in 0..READERS {
        let future = future.clone();
        handles.push(thread::spawn(move || (future.get(), future.get())));
    }

    for handle in handles {
        let (first, second) = handle.join().unwrap();
        assert_eq!(first, Ok(100));
        assert_eq!(second, Ok(100));
    }

    // Readers arriving after completion see the same cached value
    assert_eq!(future.get(), Ok(100));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_blocked_readers_all_wake_with_identical_result() {
    const READERS: usize = 10;

    let (release, gate) = std::sync::mpsc::channel::<()>();
    let future = Future::new(move || {
        gate.recv().map_err(|e| FutureError::computation(e.to_string()))?;
        Ok(vec![String::from("alpha"), String::from("beta")])
    });

    let ready = Arc::new(Barrier::new(READERS + 1));
    let mut handles = vec![];
    for _ in 0..READERS {
        let future = future.clone();
        let ready = Arc::clone(&ready);
        handles.push(thread::spawn(move || {
            ready.wait();
            future.get()
        }));
    }

    ready.wait();
    thread::sleep(Duration::from_millis(50));
    assert!(!future.is_completed());
    release.send(()).unwrap();

    let expected = Ok(vec![String::from("alpha"), String::from("beta")]);
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_panicking_computation_never_deadlocks() {
    let future: Future<u8> = Future::new(|| panic!("compute faulted"));
    let outcome = future.get_with_timeout(Duration::from_secs(5));

    assert_eq!(
        outcome,
        Some(Err(FutureError::Panicked("compute faulted".to_string())))
    );
}

#[test]
fn test_dependent_chain() {
    #[derive(Debug, Clone, PartialEq)]
    struct User {
        id: u32,
        name: String,
    }

    fn fetch_user(id: u32) -> Future<User> {
        Future::new(move || {
            thread::sleep(Duration::from_millis(20));
            if id == 999 {
                return Err(FutureError::computation(format!("user {} not found", id)));
            }
            Ok(User {
                id,
                name: format!("User{}", id),
            })
        })
    }

    let greeting = fetch_user(42).map(|u| format!("Hello, {}! (ID: {})", u.name, u.id));
    assert_eq!(greeting.get(), Ok("Hello, User42! (ID: 42)".to_string()));

    let missing = Future::successful(999).flat_map(fetch_user);
    assert_eq!(
        missing.get(),
        Err(FutureError::computation("user 999 not found"))
    );
}
