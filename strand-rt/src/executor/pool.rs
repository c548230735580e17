//! Default OS-thread worker pool.

// Layer 1: Standard library imports
use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// Layer 2: Third-party crate imports
use parking_lot::{Condvar, Mutex};
use tracing::{debug, error, trace, warn};

// Layer 3: Internal module imports
use super::config::ExecutorConfig;
use super::error::ExecutorError;

/// A unit of work submitted to a pool.
pub type Work = Box<dyn FnOnce() + Send + 'static>;

/// The pool seam behind an [`Executor`](super::Executor).
///
/// The default implementation is [`ThreadPool`]; a custom implementation can
/// be installed through [`Executor::set_pool_factory`]
/// (super::Executor::set_pool_factory), which is also how tests take control
/// of scheduling (queue the work, release it when the test says so).
pub trait WorkerPool: Send + Sync + 'static {
    /// Schedule one unit of work for asynchronous execution.
    fn submit(&self, work: Work) -> Result<(), ExecutorError>;

    /// Stop accepting work and let workers exit once the queue is drained.
    fn shutdown(&self);
}

/// Bounded pool of named OS worker threads.
///
/// Workers are spawned on demand: a submit that finds no idle worker grows
/// the pool up to `max_threads`. Workers beyond `core_threads` exit after
/// sitting idle for `idle_timeout`; core workers stay for the life of the
/// pool. The work queue is unbounded.
///
/// A panic escaping a work unit is caught at the worker boundary and logged;
/// the worker then moves on to the next unit.
pub struct ThreadPool {
    shared: Arc<Shared>,
}

struct Shared {
    core_threads: usize,
    max_threads: usize,
    idle_timeout: Duration,
    state: Mutex<PoolState>,
    work_available: Condvar,
}

struct PoolState {
    queue: VecDeque<Work>,
    workers: usize,
    idle: usize,
    next_worker: u64,
    shutdown: bool,
}

impl ThreadPool {
    /// Create an empty pool with the given sizing options.
    ///
    /// No threads are spawned until work arrives.
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                core_threads: config.core_threads,
                max_threads: config.max_threads,
                idle_timeout: config.idle_timeout,
                state: Mutex::new(PoolState {
                    queue: VecDeque::new(),
                    workers: 0,
                    idle: 0,
                    next_worker: 0,
                    shutdown: false,
                }),
                work_available: Condvar::new(),
            }),
        }
    }

    /// Current worker count, for diagnostics.
    pub fn worker_count(&self) -> usize {
        self.shared.state.lock().workers
    }

    /// Number of queued, not yet started work units.
    pub fn queued(&self) -> usize {
        self.shared.state.lock().queue.len()
    }
}

impl WorkerPool for ThreadPool {
    fn submit(&self, work: Work) -> Result<(), ExecutorError> {
        let mut state = self.shared.state.lock();
        if state.shutdown {
            warn!("work submitted to a pool that is shut down");
            return Err(ExecutorError::ShutDown);
        }
        state.queue.push_back(work);

        if state.idle > 0 {
            drop(state);
            self.shared.work_available.notify_one();
            return Ok(());
        }
        if state.workers < self.shared.max_threads {
            return Shared::spawn_worker(&self.shared, &mut state);
        }
        // All workers busy at the ceiling; one of them will pop the queue.
        Ok(())
    }

    fn shutdown(&self) {
        {
            let mut state = self.shared.state.lock();
            if state.shutdown {
                return;
            }
            state.shutdown = true;
            debug!(workers = state.workers, queued = state.queue.len(), "pool shutting down");
        }
        self.shared.work_available.notify_all();
    }
}

impl Shared {
    fn spawn_worker(shared: &Arc<Shared>, state: &mut PoolState) -> Result<(), ExecutorError> {
        let id = state.next_worker;
        state.next_worker += 1;

        let worker_shared = Arc::clone(shared);
        let spawned = thread::Builder::new()
            .name(format!("strand-worker-{id}"))
            .spawn(move || Shared::worker_loop(&worker_shared));

        match spawned {
            Ok(_) => {
                state.workers += 1;
                trace!(worker = id, total = state.workers, "spawned pool worker");
                Ok(())
            }
            Err(error) if state.workers == 0 => {
                error!(%error, "could not spawn the first pool worker");
                Err(ExecutorError::WorkerSpawn(error))
            }
            Err(error) => {
                // The work stays queued; a busy worker will reach it.
                error!(%error, "could not grow the pool");
                Ok(())
            }
        }
    }

    fn worker_loop(shared: &Arc<Shared>) {
        loop {
            let work = {
                let mut state = shared.state.lock();
                loop {
                    if let Some(work) = state.queue.pop_front() {
                        break work;
                    }
                    if state.shutdown {
                        state.workers -= 1;
                        trace!("pool worker exiting on shutdown");
                        return;
                    }
                    state.idle += 1;
                    let timed_out = shared
                        .work_available
                        .wait_for(&mut state, shared.idle_timeout)
                        .timed_out();
                    state.idle -= 1;
                    if timed_out
                        && state.queue.is_empty()
                        && state.workers > shared.core_threads
                    {
                        state.workers -= 1;
                        trace!(total = state.workers, "idle pool worker reclaimed");
                        return;
                    }
                }
            };

            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(work)) {
                error!(
                    panic = panic_message(payload.as_ref()),
                    "work unit panicked; worker continues"
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("opaque panic payload")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::future::ReplyFuture;

    fn small_pool() -> ThreadPool {
        let config = ExecutorConfig::builder()
            .with_core_threads(2)
            .with_max_threads(4)
            .with_idle_timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        ThreadPool::new(&config)
    }

    #[test]
    fn test_runs_submitted_work() {
        let pool = small_pool();
        let done: ReplyFuture<u32> = ReplyFuture::new();
        let signal = done.clone();

        pool.submit(Box::new(move || signal.satisfy(1))).unwrap();

        assert_eq!(done.wait_timeout(Duration::from_secs(5)), Some(1));
        pool.shutdown();
    }

    #[test]
    fn test_runs_many_units() {
        let pool = small_pool();
        let counter = Arc::new(AtomicUsize::new(0));
        let done: ReplyFuture<()> = ReplyFuture::new();

        for _ in 0..100 {
            let counter = Arc::clone(&counter);
            let done = done.clone();
            pool.submit(Box::new(move || {
                if counter.fetch_add(1, Ordering::SeqCst) + 1 == 100 {
                    done.satisfy(());
                }
            }))
            .unwrap();
        }

        assert!(done.wait_timeout(Duration::from_secs(5)).is_some());
        assert_eq!(counter.load(Ordering::SeqCst), 100);
        pool.shutdown();
    }

    #[test]
    fn test_panic_does_not_kill_worker() {
        let pool = small_pool();
        let done: ReplyFuture<&'static str> = ReplyFuture::new();
        let signal = done.clone();

        pool.submit(Box::new(|| panic!("boom"))).unwrap();
        pool.submit(Box::new(move || signal.satisfy("alive"))).unwrap();

        assert_eq!(done.wait_timeout(Duration::from_secs(5)), Some("alive"));
        pool.shutdown();
    }

    #[test]
    fn test_submit_after_shutdown_errors() {
        let pool = small_pool();
        pool.shutdown();

        let result = pool.submit(Box::new(|| {}));
        assert!(matches!(result, Err(ExecutorError::ShutDown)));
    }

    #[test]
    fn test_queued_work_survives_shutdown() {
        // Single worker so the second unit is still queued at shutdown.
        let config = ExecutorConfig::builder()
            .with_core_threads(1)
            .with_max_threads(1)
            .build()
            .unwrap();
        let pool = ThreadPool::new(&config);
        let done: ReplyFuture<()> = ReplyFuture::new();
        let signal = done.clone();
        let gate: ReplyFuture<()> = ReplyFuture::new();
        let gate_inner = gate.clone();

        // Occupy the worker, then queue a second unit behind it and shut down.
        pool.submit(Box::new(move || {
            gate_inner.wait();
        }))
        .unwrap();
        pool.submit(Box::new(move || signal.satisfy(()))).unwrap();
        pool.shutdown();
        gate.satisfy(());

        assert!(done.wait_timeout(Duration::from_secs(5)).is_some());
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn Any + Send> = Box::new("literal");
        assert_eq!(panic_message(boxed.as_ref()), "literal");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");

        let boxed: Box<dyn Any + Send> = Box::new(17u8);
        assert_eq!(panic_message(boxed.as_ref()), "opaque panic payload");
    }
}
