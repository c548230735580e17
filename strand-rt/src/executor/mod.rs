//! Bounded worker pool that runs actor drains.
//!
//! # Components
//!
//! - [`Executor`] - Lazily initialized, explicitly shut down pool handle;
//!   one process-wide default instance, replaceable per actor.
//! - [`ExecutorConfig`] - Pool sizing and behavior options, re-read whenever
//!   the pool is (re)created.
//! - [`WorkerPool`] / [`ThreadPool`] - The pool seam and its default
//!   OS-thread implementation.
//! - [`ExecutorError`] - Scheduling failures.
//!
//! # Design Philosophy
//!
//! - **Dependency injection**: actors hold an [`Executor`] handle; the
//!   process-wide [`Executor::global`] is only the default.
//! - **Isolation**: a panicking work unit is caught and logged at the worker
//!   boundary; it never takes the worker down with it.
//! - **Inline mode**: with `run_on_caller` set, work runs on the submitting
//!   thread instead of the pool, which makes interleavings deterministic in
//!   tests and small tools.

pub mod config;
pub mod error;
pub mod handle;
pub mod pool;

pub use config::{
    ExecutorConfig, ExecutorConfigBuilder, DEFAULT_CORE_THREADS, DEFAULT_IDLE_TIMEOUT,
    DEFAULT_MAX_THREADS,
};
pub use error::ExecutorError;
pub use handle::{Executor, PoolFactory};
pub use pool::{ThreadPool, Work, WorkerPool};
