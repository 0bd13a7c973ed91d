//! The shared work model: slots and the batch arena that holds them
//!
//! A [`WorkBatch`] is filled once by the loader, split into disjoint
//! [`RangeView`]s for the workers, and read back by the writer once every
//! worker has returned.

pub mod slot;
pub mod store;

pub use slot::{SlotOutcome, SlotStatus, WordSlot};
pub use store::{RangeView, WorkBatch};

use std::fmt;

/// Maximum characters in a single word (and entries in its permutation).
pub const MAX_WORD_LEN: usize = 255;

/// Maximum number of slots in one batch.
pub const MAX_BATCH_SLOTS: usize = 1000;

/// Direction of the transformation applied to every slot of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Shuffle plain words and record the permutation
    Encrypt,
    /// Restore words from a shuffled word and its permutation
    Decrypt,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Encrypt => write!(f, "encrypt"),
            Mode::Decrypt => write!(f, "decrypt"),
        }
    }
}
