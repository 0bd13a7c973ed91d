//! Configuration for a parallel shuffle run.

use std::time::Duration;

/// Number of workers used when none is configured.
pub const DEFAULT_WORKERS: usize = 4;

/// Configuration for parallel batch execution.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads to spawn (fewer run if the batch is small).
    pub num_workers: usize,
    /// Run seed; worker seeds are derived from it. Drawn fresh when unset.
    pub base_seed: Option<u64>,
    /// Deadline for the whole run; unfinished ranges are abandoned.
    pub timeout: Option<Duration>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: DEFAULT_WORKERS,
            base_seed: None,
            timeout: None,
        }
    }
}

impl ParallelConfig {
    /// Set the number of workers (at least one).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Set the run seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    /// Set the run seed from an Option.
    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.base_seed = seed;
        self
    }

    /// Set the run deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the run deadline from an Option.
    pub fn with_timeout_option(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
