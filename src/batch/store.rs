//! Fixed-capacity batch arena and the disjoint views handed to workers

use crate::batch::{MAX_BATCH_SLOTS, Mode, SlotOutcome, SlotStatus, WordSlot};
use crate::error::ShuffleError;
use crate::parallel::partition::WorkRange;
use crate::permutation::PermutationError;

/// Ordered, fixed-capacity collection of word slots for one run.
///
/// Slot order is input order and is never rearranged; workers only ever see
/// the slots of their own range through a [`RangeView`].
#[derive(Debug, Clone)]
pub struct WorkBatch {
    mode: Mode,
    capacity: usize,
    slots: Vec<WordSlot>,
}

impl WorkBatch {
    pub fn new(mode: Mode) -> Self {
        Self::with_capacity(mode, MAX_BATCH_SLOTS)
    }

    pub fn with_capacity(mode: Mode, capacity: usize) -> Self {
        Self {
            mode,
            capacity,
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Append a slot, handing it back if the batch is already at capacity.
    pub fn try_push(&mut self, slot: WordSlot) -> Result<(), WordSlot> {
        if self.is_full() {
            return Err(slot);
        }
        self.slots.push(slot);
        Ok(())
    }

    pub fn slots(&self) -> &[WordSlot] {
        &self.slots
    }

    /// Slots whose permutation was rejected, as `(index, reason)`.
    pub fn malformed(&self) -> impl Iterator<Item = (usize, &PermutationError)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot.status() {
                SlotStatus::Malformed(err) => Some((i, err)),
                _ => None,
            })
    }

    /// Fail with the first malformed record, if any.
    pub fn ensure_well_formed(&self) -> Result<(), ShuffleError> {
        match self.malformed().next() {
            Some((index, err)) => Err(ShuffleError::MalformedPermutation {
                record: index + 1,
                source: err.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Split the populated slots into one mutable view per range.
    ///
    /// # Panics
    /// If the ranges are unordered, overlap, or extend past `len()`. The
    /// partitioner never produces such ranges.
    pub fn split_ranges_mut(&mut self, ranges: &[WorkRange]) -> Vec<RangeView<'_>> {
        let mut views = Vec::with_capacity(ranges.len());
        let mut rest: &mut [WordSlot] = &mut self.slots;
        let mut offset = 0;

        for &range in ranges {
            assert!(
                range.start >= offset && range.end <= offset + rest.len(),
                "range {} overlaps a previous range or exceeds the batch",
                range
            );
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(range.start - offset);
            let (head, tail) = tail.split_at_mut(range.len());
            views.push(RangeView { range, slots: head });
            rest = tail;
            offset = range.end;
        }

        views
    }
}

/// Exclusive access to the slots of one range.
///
/// Workers read inputs through [`RangeView::slots`] and write only by
/// committing a full set of outcomes at once.
#[derive(Debug)]
pub struct RangeView<'a> {
    range: WorkRange,
    slots: &'a mut [WordSlot],
}

impl RangeView<'_> {
    pub fn range(&self) -> WorkRange {
        self.range
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[WordSlot] {
        self.slots
    }

    /// Apply one outcome per slot, in slot order.
    pub fn commit(self, outcomes: Vec<SlotOutcome>) {
        debug_assert_eq!(outcomes.len(), self.slots.len());
        for (slot, outcome) in self.slots.iter_mut().zip(outcomes) {
            slot.apply(outcome);
        }
    }
}
