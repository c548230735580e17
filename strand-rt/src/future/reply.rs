//! Blocking one-shot future.

// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
use parking_lot::{Condvar, Mutex};

// Layer 3: Internal module imports
// (none)

/// A one-shot settable value with blocking retrieval.
///
/// The cell moves through exactly two states: unset, then set. The first
/// [`satisfy`](ReplyFuture::satisfy) wins; later calls are silently ignored,
/// which is what makes a late `reply` after an `ask` timeout harmless.
///
/// Cloning the future is cheap and every clone refers to the same cell, so
/// the side that produces the value and the side that waits for it can each
/// hold their own handle. All blocked waiters are woken by the satisfying
/// call and each receives a clone of the value.
///
/// # Example
/// ```rust
/// use std::thread;
/// use strand_rt::ReplyFuture;
///
/// let future: ReplyFuture<u32> = ReplyFuture::new();
/// let producer = future.clone();
///
/// thread::spawn(move || producer.satisfy(42));
/// assert_eq!(future.wait(), 42);
/// ```
pub struct ReplyFuture<T> {
    cell: Arc<Cell<T>>,
}

struct Cell<T> {
    value: Mutex<Option<T>>,
    ready: Condvar,
}

impl<T> ReplyFuture<T> {
    /// Create an unset future.
    pub fn new() -> Self {
        Self {
            cell: Arc::new(Cell {
                value: Mutex::new(None),
                ready: Condvar::new(),
            }),
        }
    }

    /// Set the value and wake all waiters.
    ///
    /// The cell is single-assignment: if a value is already present this
    /// call does nothing.
    pub fn satisfy(&self, value: T) {
        let mut slot = self.cell.value.lock();
        if slot.is_none() {
            *slot = Some(value);
            drop(slot);
            self.cell.ready.notify_all();
        }
    }

    /// Whether the value has been set.
    pub fn is_satisfied(&self) -> bool {
        self.cell.value.lock().is_some()
    }
}

impl<T: Clone> ReplyFuture<T> {
    /// Block until the value is set, then return it.
    ///
    /// Blocks indefinitely; use [`wait_timeout`](ReplyFuture::wait_timeout)
    /// when the producer is not guaranteed to reply.
    pub fn wait(&self) -> T {
        let mut slot = self.cell.value.lock();
        loop {
            if let Some(value) = slot.as_ref() {
                return value.clone();
            }
            self.cell.ready.wait(&mut slot);
        }
    }

    /// Wait up to `timeout` for the value.
    ///
    /// Returns `None` if the timeout elapses first. A timed-out waiter does
    /// not disturb the cell: a later `satisfy` still succeeds and other
    /// waiters still observe the value.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.cell.value.lock();
        loop {
            if let Some(value) = slot.as_ref() {
                return Some(value.clone());
            }
            if self.cell.ready.wait_until(&mut slot, deadline).timed_out() {
                return slot.as_ref().cloned();
            }
        }
    }

    /// Return the value if it is already set, without blocking.
    pub fn try_get(&self) -> Option<T> {
        self.cell.value.lock().as_ref().cloned()
    }
}

impl<T> Clone for ReplyFuture<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> Default for ReplyFuture<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ReplyFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyFuture")
            .field("satisfied", &self.is_satisfied())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_satisfy_then_wait() {
        let future = ReplyFuture::new();
        future.satisfy(7u32);

        assert!(future.is_satisfied());
        assert_eq!(future.wait(), 7);
    }

    #[test]
    fn test_wait_blocks_until_satisfied() {
        let future: ReplyFuture<&'static str> = ReplyFuture::new();
        let producer = future.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.satisfy("done");
        });

        assert_eq!(future.wait(), "done");
        handle.join().unwrap();
    }

    #[test]
    fn test_second_satisfy_ignored() {
        let future = ReplyFuture::new();
        future.satisfy(1u32);
        future.satisfy(2u32);

        assert_eq!(future.wait(), 1);
    }

    #[test]
    fn test_wait_timeout_absent() {
        let future: ReplyFuture<u32> = ReplyFuture::new();

        let started = Instant::now();
        assert_eq!(future.wait_timeout(Duration::from_millis(30)), None);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_wait_timeout_present() {
        let future = ReplyFuture::new();
        let producer = future.clone();

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            producer.satisfy(9u32);
        });

        assert_eq!(future.wait_timeout(Duration::from_secs(5)), Some(9));
    }

    #[test]
    fn test_satisfy_after_timeout_is_silent() {
        let future: ReplyFuture<u32> = ReplyFuture::new();

        assert_eq!(future.wait_timeout(Duration::from_millis(5)), None);
        future.satisfy(3);

        assert_eq!(future.try_get(), Some(3));
    }

    #[test]
    fn test_try_get_unset() {
        let future: ReplyFuture<u32> = ReplyFuture::new();
        assert_eq!(future.try_get(), None);
        assert!(!future.is_satisfied());
    }

    #[test]
    fn test_all_waiters_receive_value() {
        let future: ReplyFuture<u64> = ReplyFuture::new();

        let waiters: Vec<_> = (0..8)
            .map(|_| {
                let f = future.clone();
                thread::spawn(move || f.wait())
            })
            .collect();

        thread::sleep(Duration::from_millis(10));
        future.satisfy(11);

        for waiter in waiters {
            assert_eq!(waiter.join().unwrap(), 11);
        }
    }
}
