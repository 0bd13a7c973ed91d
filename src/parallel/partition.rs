//! Contiguous range partitioning of a batch across workers.

use crate::error::ShuffleError;
use std::fmt;

/// Half-open slot range `[start, end)` assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkRange {
    pub start: usize,
    pub end: usize,
}

impl WorkRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

impl fmt::Display for WorkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Split `total_items` into at most `worker_count` contiguous ranges.
///
/// Every range except possibly the last holds `ceil(total_items / worker_count)`
/// items. Ranges that would start at or past `total_items` are not emitted,
/// so fewer ranges than workers come back when items are scarce.
pub fn partition(total_items: usize, worker_count: usize) -> Result<Vec<WorkRange>, ShuffleError> {
    if total_items == 0 {
        return Err(ShuffleError::EmptyBatch);
    }
    if worker_count == 0 {
        return Err(ShuffleError::Configuration(
            "worker count must be at least 1".to_string(),
        ));
    }

    let chunk_size = total_items.div_ceil(worker_count);
    let ranges = (0..worker_count)
        .map(|i| i * chunk_size)
        .take_while(|&start| start < total_items)
        .map(|start| WorkRange::new(start, (start + chunk_size).min(total_items)))
        .collect();

    Ok(ranges)
}
