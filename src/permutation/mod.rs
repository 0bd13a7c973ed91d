//! Character permutation of words and its inverse
//!
//! - `engine`: Fisher–Yates shuffle of a word's characters, recording the
//!   permutation, and reassembly of the original from a permutation
//! - `seed`: per-worker seed derivation and RNG construction

pub mod engine;
pub mod seed;

pub use engine::{generate, invert};
pub use seed::{derive_worker_seed, fresh_run_seed, worker_rng};

use thiserror::Error;

/// Reasons a permutation cannot be inverted against a word
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    #[error("permutation has {actual} entries but the word has {expected} characters")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("index {index} at position {position} is out of range for length {len}")]
    OutOfRange {
        position: usize,
        index: usize,
        len: usize,
    },

    #[error("index {index} appears more than once")]
    Duplicate { index: usize },
}
