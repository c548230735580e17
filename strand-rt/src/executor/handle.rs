//! Executor handle: lazy pool lifecycle and runtime configuration.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tracing::debug;

// Layer 3: Internal module imports
use super::config::ExecutorConfig;
use super::error::ExecutorError;
use super::pool::{ThreadPool, Work, WorkerPool};

/// Constructor override for the pool behind an [`Executor`].
pub type PoolFactory = Box<dyn Fn(&ExecutorConfig) -> Arc<dyn WorkerPool> + Send + Sync>;

static GLOBAL_EXECUTOR: OnceLock<Executor> = OnceLock::new();

/// Handle to a bounded worker pool with a lazy lifecycle.
///
/// The pool behind the handle is created on first
/// [`execute`](Executor::execute) and torn down by
/// [`shutdown`](Executor::shutdown); a later `execute` re-creates it with the
/// configuration current at that moment. Cloning the handle is cheap and all
/// clones share the same pool.
///
/// Most programs use the process-wide default returned by
/// [`Executor::global`]; tests and embedders that want isolation construct
/// their own and hand it to
/// [`ActorBuilder::executor`](crate::ActorBuilder::executor).
///
/// # Examples
///
/// ```rust
/// use strand_rt::Executor;
///
/// let executor = Executor::new();
/// executor.execute(|| println!("on a pool worker")).unwrap();
/// executor.shutdown();
/// ```
#[derive(Clone)]
pub struct Executor {
    inner: Arc<ExecutorInner>,
}

struct ExecutorInner {
    core_threads: AtomicUsize,
    max_threads: AtomicUsize,
    idle_timeout_ms: AtomicU64,
    run_on_caller: AtomicBool,
    factory: Mutex<Option<PoolFactory>>,
    pool: Mutex<Option<Arc<dyn WorkerPool>>>,
}

impl Executor {
    /// Create an executor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create an executor from an explicit configuration.
    pub fn with_config(config: ExecutorConfig) -> Self {
        Self {
            inner: Arc::new(ExecutorInner {
                core_threads: AtomicUsize::new(config.core_threads),
                max_threads: AtomicUsize::new(config.max_threads),
                idle_timeout_ms: AtomicU64::new(config.idle_timeout.as_millis() as u64),
                run_on_caller: AtomicBool::new(config.run_on_caller),
                factory: Mutex::new(None),
                pool: Mutex::new(None),
            }),
        }
    }

    /// The process-wide default executor.
    ///
    /// Lazily initialized on first use. Actors spawned without an explicit
    /// executor use this one.
    pub fn global() -> &'static Executor {
        GLOBAL_EXECUTOR.get_or_init(Executor::new)
    }

    /// Schedule `work` for asynchronous execution and return immediately.
    ///
    /// Initializes the pool under a lock if it does not exist yet. With
    /// `run_on_caller` set the pool is bypassed and `work` runs on the
    /// calling thread before this method returns.
    pub fn execute<F>(&self, work: F) -> Result<(), ExecutorError>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.runs_on_caller() {
            work();
            return Ok(());
        }
        self.current_pool().submit(Box::new(work) as Work)
    }

    /// Gracefully terminate workers and reset to the uninitialized state.
    ///
    /// Queued work still runs. A subsequent [`execute`](Executor::execute)
    /// re-creates the pool, re-reading the configuration.
    pub fn shutdown(&self) {
        if let Some(pool) = self.inner.pool.lock().take() {
            debug!("executor shutting down its pool");
            pool.shutdown();
        }
    }

    /// Snapshot of the configuration as it would apply to the next pool.
    pub fn config(&self) -> ExecutorConfig {
        ExecutorConfig {
            core_threads: self.inner.core_threads.load(Ordering::Relaxed),
            max_threads: self.inner.max_threads.load(Ordering::Relaxed),
            idle_timeout: Duration::from_millis(self.inner.idle_timeout_ms.load(Ordering::Relaxed)),
            run_on_caller: self.runs_on_caller(),
        }
    }

    /// Set the minimum worker count (takes effect at next pool creation).
    pub fn set_core_threads(&self, count: usize) {
        self.inner.core_threads.store(count, Ordering::Relaxed);
    }

    /// Set the worker ceiling (takes effect at next pool creation).
    pub fn set_max_threads(&self, count: usize) {
        self.inner.max_threads.store(count, Ordering::Relaxed);
    }

    /// Set the idle reclamation timeout (takes effect at next pool creation).
    pub fn set_idle_timeout(&self, timeout: Duration) {
        self.inner
            .idle_timeout_ms
            .store(timeout.as_millis() as u64, Ordering::Relaxed);
    }

    /// Toggle inline execution on the caller's thread.
    ///
    /// Unlike the sizing options this takes effect immediately: it is read
    /// on every submit, not at pool creation.
    pub fn set_run_on_caller(&self, inline: bool) {
        self.inner.run_on_caller.store(inline, Ordering::Relaxed);
    }

    /// Whether submitted work currently runs inline on the caller.
    pub fn runs_on_caller(&self) -> bool {
        self.inner.run_on_caller.load(Ordering::Relaxed)
    }

    /// Replace the pool constructor entirely.
    ///
    /// The factory is consulted at the next pool creation; call
    /// [`shutdown`](Executor::shutdown) first to retire a live pool. Tests
    /// use this seam to substitute a pool they can pause and release.
    pub fn set_pool_factory<F>(&self, factory: F)
    where
        F: Fn(&ExecutorConfig) -> Arc<dyn WorkerPool> + Send + Sync + 'static,
    {
        *self.inner.factory.lock() = Some(Box::new(factory));
    }

    fn current_pool(&self) -> Arc<dyn WorkerPool> {
        let mut slot = self.inner.pool.lock();
        match slot.as_ref() {
            Some(pool) => Arc::clone(pool),
            None => {
                let config = self.config();
                let pool = match self.inner.factory.lock().as_ref() {
                    Some(factory) => factory(&config),
                    None => Arc::new(ThreadPool::new(&config)),
                };
                debug!(
                    core_threads = config.core_threads,
                    max_threads = config.max_threads,
                    "executor pool created"
                );
                *slot = Some(Arc::clone(&pool));
                pool
            }
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config())
            .field("initialized", &self.inner.pool.lock().is_some())
            .finish()
    }
}
