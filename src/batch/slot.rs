//! A single unit of work and its outcome

use crate::permutation::PermutationError;

/// Processing state of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotStatus {
    /// Not yet processed (or its worker never committed)
    #[default]
    Pending,
    /// `result` holds the transformed word
    Done,
    /// The stored permutation could not be inverted
    Malformed(PermutationError),
}

/// What a worker computed for one slot, staged until its range commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    Encrypted {
        result: String,
        permutation: Vec<usize>,
    },
    Decrypted {
        result: String,
    },
    Malformed(PermutationError),
}

/// One word, its permutation and its result.
///
/// `original` is fixed at construction. Workers can only change the slot by
/// applying a [`SlotOutcome`], which never touches `original`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordSlot {
    original: String,
    permutation: Vec<usize>,
    result: String,
    status: SlotStatus,
}

impl WordSlot {
    /// A slot holding a plain word to shuffle.
    pub fn plain(word: impl Into<String>) -> Self {
        Self {
            original: word.into(),
            ..Default::default()
        }
    }

    /// A slot holding a shuffled word and the permutation to undo it.
    pub fn shuffled(word: impl Into<String>, permutation: Vec<usize>) -> Self {
        Self {
            original: word.into(),
            permutation,
            ..Default::default()
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// The transformed word; empty until the slot is `Done`.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn status(&self) -> &SlotStatus {
        &self.status
    }

    pub fn is_done(&self) -> bool {
        self.status == SlotStatus::Done
    }

    pub(crate) fn apply(&mut self, outcome: SlotOutcome) {
        match outcome {
            SlotOutcome::Encrypted {
                result,
                permutation,
            } => {
                self.result = result;
                self.permutation = permutation;
                self.status = SlotStatus::Done;
            }
            SlotOutcome::Decrypted { result } => {
                self.result = result;
                self.status = SlotStatus::Done;
            }
            SlotOutcome::Malformed(err) => {
                self.result.clear();
                self.status = SlotStatus::Malformed(err);
            }
        }
    }
}
