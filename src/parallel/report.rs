//! Run states, per-worker statistics and failure reporting

use crate::error::ShuffleError;
use crate::parallel::partition::WorkRange;
use std::fmt;
use std::time::Duration;

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Unpartitioned,
    Partitioned,
    Dispatched,
    AwaitingCompletion,
    /// Every worker committed its range
    Complete,
    /// At least one range was never committed
    PartiallyFailed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Complete | RunState::PartiallyFailed)
    }
}

/// Why a worker did not commit its range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The worker thread panicked; carries the panic message when it was a string
    Panicked(String),
    /// The run deadline passed before the worker finished
    TimedOut,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Panicked(msg) => write!(f, "worker panicked: {}", msg),
            FailureCause::TimedOut => write!(f, "timed out"),
        }
    }
}

/// A range whose slots were left unprocessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFailure {
    pub worker_id: usize,
    pub range: WorkRange,
    pub cause: FailureCause,
}

impl fmt::Display for RangeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker {} {}: {}", self.worker_id, self.range, self.cause)
    }
}

/// Statistics for one worker that committed its range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerStatistics {
    pub worker_id: usize,
    pub range: WorkRange,
    /// Slots committed (including malformed ones)
    pub processed: usize,
    /// Slots whose permutation was rejected
    pub malformed: usize,
    pub elapsed_time: Duration,
}

/// Aggregated statistics for a run
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    pub workers_spawned: usize,
    pub slots_total: usize,
    pub slots_processed: usize,
    pub slots_malformed: usize,
    pub elapsed_time: Duration,
}

impl RunStatistics {
    /// Fraction of slots processed (0.0 to 1.0)
    pub fn completion_rate(&self) -> f64 {
        if self.slots_total == 0 {
            0.0
        } else {
            self.slots_processed as f64 / self.slots_total as f64
        }
    }
}

/// Outcome of a run once every worker has terminated.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub state: RunState,
    /// Seed every worker seed of this run was derived from
    pub run_seed: u64,
    pub workers: Vec<WorkerStatistics>,
    pub failures: Vec<RangeFailure>,
    pub statistics: RunStatistics,
}

impl RunReport {
    pub(crate) fn new(
        run_seed: u64,
        slots_total: usize,
        workers_spawned: usize,
        mut workers: Vec<WorkerStatistics>,
        mut failures: Vec<RangeFailure>,
        elapsed_time: Duration,
    ) -> Self {
        workers.sort_by_key(|w| w.worker_id);
        failures.sort_by_key(|f| f.worker_id);

        let statistics = RunStatistics {
            workers_spawned,
            slots_total,
            slots_processed: workers.iter().map(|w| w.processed).sum(),
            slots_malformed: workers.iter().map(|w| w.malformed).sum(),
            elapsed_time,
        };
        let state = if failures.is_empty() {
            RunState::Complete
        } else {
            RunState::PartiallyFailed
        };

        Self {
            state,
            run_seed,
            workers,
            failures,
            statistics,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == RunState::Complete
    }

    /// Turn a partially failed run into a `WorkerFailure` error.
    pub fn ensure_complete(&self) -> Result<(), ShuffleError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(ShuffleError::WorkerFailure(self.failures.clone()))
        }
    }
}
