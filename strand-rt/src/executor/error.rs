//! Executor error types.

// Layer 1: Standard library imports
use std::io;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Errors surfaced when scheduling work on an [`Executor`](super::Executor).
///
/// Scheduling is designed to be close to infallible: the queue is unbounded
/// and workers are recycled. The two remaining failure modes are the OS
/// refusing to spawn a worker thread and a submit racing with `shutdown`.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The OS could not spawn a worker thread and no live worker exists to
    /// pick the work up.
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] io::Error),

    /// The pool was shut down between lookup and submit.
    #[error("executor pool is shut down")]
    ShutDown,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = ExecutorError::ShutDown;
        assert_eq!(error.to_string(), "executor pool is shut down");

        let error: ExecutorError = io::Error::other("no threads left").into();
        assert!(error.to_string().contains("no threads left"));
    }
}
