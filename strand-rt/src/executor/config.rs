//! Executor configuration with sensible defaults.

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
// (none)

// Layer 3: Internal
// (none)

/// Default minimum worker count kept alive by the pool.
pub const DEFAULT_CORE_THREADS: usize = 16;

/// Default burst ceiling on worker count (25x the default core size).
pub const DEFAULT_MAX_THREADS: usize = DEFAULT_CORE_THREADS * 25;

/// Default idle time after which workers beyond the core count exit.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Pool sizing and behavior options.
///
/// An [`Executor`](super::Executor) keeps these options mutable at runtime;
/// they are re-read the next time a pool is created (that is, on first use
/// and after every [`shutdown`](super::Executor::shutdown)). Changing them
/// while a pool exists has no effect on that pool.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use strand_rt::executor::{ExecutorConfig, DEFAULT_CORE_THREADS};
///
/// let config = ExecutorConfig::default();
/// assert_eq!(config.core_threads, DEFAULT_CORE_THREADS);
///
/// let config = ExecutorConfig::builder()
///     .with_core_threads(4)
///     .with_max_threads(32)
///     .with_idle_timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
/// assert_eq!(config.core_threads, 4);
/// ```
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Minimum worker count; core workers never exit on idle.
    pub core_threads: usize,

    /// Burst ceiling on worker count.
    pub max_threads: usize,

    /// Idle time after which workers beyond `core_threads` exit.
    pub idle_timeout: Duration,

    /// Run submitted work inline on the caller's thread instead of the pool.
    pub run_on_caller: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            core_threads: DEFAULT_CORE_THREADS,
            max_threads: DEFAULT_MAX_THREADS,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            run_on_caller: false,
        }
    }
}

impl ExecutorConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExecutorConfigBuilder {
        ExecutorConfigBuilder::default()
    }

    /// Validate configuration values.
    ///
    /// Returns `Err` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.core_threads == 0 {
            return Err("core_threads must be > 0".to_string());
        }

        if self.max_threads < self.core_threads {
            return Err("max_threads must be >= core_threads".to_string());
        }

        Ok(())
    }
}

/// Builder for [`ExecutorConfig`] with a fluent API.
#[derive(Debug, Default)]
pub struct ExecutorConfigBuilder {
    config: ExecutorConfig,
}

impl ExecutorConfigBuilder {
    /// Set the minimum worker count.
    pub fn with_core_threads(mut self, count: usize) -> Self {
        self.config.core_threads = count;
        self
    }

    /// Set the burst ceiling on worker count.
    pub fn with_max_threads(mut self, count: usize) -> Self {
        self.config.max_threads = count;
        self
    }

    /// Set the idle time after which surplus workers exit.
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    /// Run submitted work inline on the caller's thread.
    pub fn with_run_on_caller(mut self, inline: bool) -> Self {
        self.config.run_on_caller = inline;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<ExecutorConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.core_threads, 16);
        assert_eq!(config.max_threads, 400);
        assert_eq!(config.idle_timeout, Duration::from_secs(60));
        assert!(!config.run_on_caller);
    }

    #[test]
    fn test_default_validates() {
        assert!(ExecutorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_core_threads_rejected() {
        let result = ExecutorConfig::builder().with_core_threads(0).build();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("core_threads"));
    }

    #[test]
    fn test_max_below_core_rejected() {
        let result = ExecutorConfig::builder()
            .with_core_threads(8)
            .with_max_threads(4)
            .build();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("max_threads"));
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let config = ExecutorConfig::builder()
            .with_core_threads(2)
            .with_max_threads(8)
            .with_idle_timeout(Duration::from_millis(250))
            .with_run_on_caller(true)
            .build()
            .unwrap();

        assert_eq!(config.core_threads, 2);
        assert_eq!(config.max_threads, 8);
        assert_eq!(config.idle_timeout, Duration::from_millis(250));
        assert!(config.run_on_caller);
    }
}
