//! Error taxonomy for a shuffle run.

use crate::parallel::report::RangeFailure;
use crate::permutation::PermutationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort or fail a run.
#[derive(Error, Debug)]
pub enum ShuffleError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to load {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("input contains no words")]
    EmptyBatch,

    #[error("failed to spawn worker {worker_id}: {source}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("{} worker(s) did not finish their range: {}", .0.len(), describe_failures(.0))]
    WorkerFailure(Vec<RangeFailure>),

    #[error("malformed permutation for record {record}: {source}")]
    MalformedPermutation {
        /// 1-based position of the record in the input.
        record: usize,
        #[source]
        source: PermutationError,
    },

    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

impl ShuffleError {
    pub fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ShuffleError::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ShuffleError::Write {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn describe_failures(failures: &[RangeFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
