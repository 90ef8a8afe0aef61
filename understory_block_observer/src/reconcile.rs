// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Merging newly loaded ranges into a block partition.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::partition::Partition;
use crate::{Block, LoadRangeError};

/// An inclusive range of items confirmed as loaded by a loader.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadRange {
    /// First loaded index (inclusive).
    pub start: usize,
    /// Last loaded index (inclusive).
    pub end: usize,
}

impl LoadRange {
    /// Creates a load range covering `start..=end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Checks that the range is ordered and fits a collection of `size` items.
    pub fn validate(&self, size: usize) -> Result<(), LoadRangeError> {
        if size == 0 {
            return Err(LoadRangeError::EmptyCollection);
        }
        if self.start > self.end {
            return Err(LoadRangeError::Inverted {
                start: self.start,
                end: self.end,
            });
        }
        if self.end >= size {
            return Err(LoadRangeError::OutOfBounds {
                end: self.end,
                size,
            });
        }
        Ok(())
    }
}

impl From<RangeInclusive<usize>> for LoadRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        let (start, end) = range.into_inner();
        Self { start, end }
    }
}

/// A load range together with the layout parameters it is reconciled under.
///
/// Callers must uphold `start <= end < size`; [`LoadEvent::validate`] checks
/// this. [`reconcile`] only checks it in debug builds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoadEvent {
    /// First loaded index (inclusive).
    pub start: usize,
    /// Last loaded index (inclusive).
    pub end: usize,
    /// Number of items before and after an unloaded block that also count as
    /// part of it for layout and triggering.
    pub buffer: usize,
    /// Number of items in the collection.
    pub size: usize,
}

impl LoadEvent {
    /// Creates an event for `range` in a collection of `size` items.
    #[must_use]
    pub const fn new(range: LoadRange, buffer: usize, size: usize) -> Self {
        Self {
            start: range.start,
            end: range.end,
            buffer,
            size,
        }
    }

    /// The loaded range without layout parameters.
    #[must_use]
    pub const fn range(&self) -> LoadRange {
        LoadRange::new(self.start, self.end)
    }

    /// Checks the event's preconditions.
    pub fn validate(&self) -> Result<(), LoadRangeError> {
        self.range().validate(self.size)
    }

    /// The buffer region the loaded core occupies once merged.
    ///
    /// The buffer is taken from the inside of the loaded range, never past its
    /// midpoint, so the neighbouring unloaded blocks grow towards it. At the
    /// collection edges the loaded region keeps the edge.
    ///
    /// ```rust
    /// use understory_block_observer::{LoadEvent, LoadRange};
    ///
    /// let event = LoadEvent::new(LoadRange::new(40, 59), 5, 100);
    /// assert_eq!(event.loaded_buffer(), 45..=54);
    ///
    /// // A buffer wider than half the range stops at the midpoint.
    /// let narrow = LoadEvent::new(LoadRange::new(40, 43), 5, 100);
    /// assert_eq!(narrow.loaded_buffer(), 41..=41);
    ///
    /// // Touching an edge keeps that edge.
    /// let edge = LoadEvent::new(LoadRange::new(0, 20), 5, 100);
    /// assert_eq!(edge.loaded_buffer(), 0..=15);
    /// ```
    #[must_use]
    pub fn loaded_buffer(&self) -> RangeInclusive<usize> {
        let middle = self.start + (self.end - self.start) / 2;
        let buffer_start = if self.start == 0 {
            0
        } else {
            self.start.saturating_add(self.buffer).min(middle)
        };
        let buffer_end = if self.end == self.size - 1 {
            self.size - 1
        } else {
            self.end.saturating_sub(self.buffer).max(middle)
        };
        buffer_start..=buffer_end
    }
}

/// Reconciles a newly loaded range into a block partition.
///
/// Returns a new list; `blocks` is left untouched. Blocks whose buffer does not
/// touch the loaded buffer region are carried over. Each block that does is
/// split into the part before `event.start` (keeping its status), the loaded
/// core, and the part after `event.end` (keeping its status). Neighbours with
/// the same status are merged as they are appended, so the result never holds
/// two adjacent blocks with the same status.
///
/// An empty `blocks` list yields an empty result.
///
/// ```rust
/// use understory_block_observer::{Block, LoadEvent, LoadRange, reconcile};
///
/// let blocks = [Block::unloaded(100)];
/// let next = reconcile(&blocks, &LoadEvent::new(LoadRange::new(40, 59), 0, 100));
///
/// assert_eq!(next.len(), 3);
/// assert_eq!(next[1].span(), 40..=59);
/// assert!(next[1].is_loaded());
/// assert_eq!(next[1].percentage_height(), 20.0);
/// ```
///
/// # Panics (debug only)
///
/// Panics in debug builds if `event` violates `start <= end < size`. Release
/// builds do not check, and the result for such input is unspecified.
#[must_use]
pub fn reconcile(blocks: &[Block], event: &LoadEvent) -> Vec<Block> {
    if blocks.is_empty() {
        return Vec::new();
    }
    debug_assert!(
        event.validate().is_ok(),
        "invalid load event {event:?} for reconcile"
    );

    let loaded_buffer = event.loaded_buffer();
    let (loaded_buffer_start, loaded_buffer_end) = (*loaded_buffer.start(), *loaded_buffer.end());
    let mut partition = Partition::with_capacity(event.size, blocks.len() + 2);

    for block in blocks {
        if block.buffer_is_disjoint_from(&loaded_buffer) {
            partition.push(block.span(), block.buffer(), block.is_loaded());
            continue;
        }

        if block.start() < event.start {
            partition.push(
                block.start()..=event.start - 1,
                block.buffer_start()..=loaded_buffer_start - 1,
                block.is_loaded(),
            );
        }

        partition.push(event.start..=event.end, loaded_buffer.clone(), true);

        if block.end() > event.end {
            partition.push(
                event.end + 1..=block.end(),
                loaded_buffer_end + 1..=block.buffer_end(),
                block.is_loaded(),
            );
        }
    }

    partition.into_blocks()
}

#[cfg(test)]
mod tests {
    use super::{LoadEvent, LoadRange, reconcile};
    use crate::{Block, LoadRangeError};

    fn event(start: usize, end: usize, buffer: usize) -> LoadEvent {
        LoadEvent::new(LoadRange::new(start, end), buffer, 100)
    }

    #[test]
    fn empty_input_is_a_no_op() {
        assert!(reconcile(&[], &event(0, 9, 0)).is_empty());
    }

    #[test]
    fn loaded_buffer_without_padding_is_the_range() {
        assert_eq!(event(40, 59, 0).loaded_buffer(), 40..=59);
        assert_eq!(event(45, 45, 0).loaded_buffer(), 45..=45);
    }

    #[test]
    fn loaded_buffer_clamps_to_both_edges() {
        assert_eq!(event(0, 99, 10).loaded_buffer(), 0..=99);
        assert_eq!(event(80, 99, 10).loaded_buffer(), 89..=99);
    }

    #[test]
    fn loaded_buffer_end_does_not_underflow() {
        // `end - buffer` would go below zero; the midpoint wins.
        assert_eq!(event(1, 3, 10).loaded_buffer(), 2..=2);
    }

    #[test]
    fn loaded_buffer_start_does_not_overflow() {
        // `start + buffer` would wrap; both sides stop at the midpoint.
        assert_eq!(event(40, 59, usize::MAX).loaded_buffer(), 49..=49);
        assert_eq!(event(1, 98, usize::MAX).loaded_buffer(), 49..=49);
    }

    #[test]
    fn huge_buffer_reconciles_like_a_half_range_buffer() {
        let blocks = [Block::unloaded(100)];
        assert_eq!(
            reconcile(&blocks, &event(40, 59, usize::MAX)),
            reconcile(&blocks, &event(40, 59, 10)),
        );
    }

    #[test]
    fn unaffected_blocks_are_carried_over() {
        let blocks = [
            Block::new(0..=29, 0..=34, false, 100),
            Block::new(30..=49, 35..=44, true, 100),
            Block::new(50..=99, 45..=99, false, 100),
        ];
        let next = reconcile(&blocks, &event(80, 89, 0));
        assert_eq!(&next[..2], &blocks[..2]);
        assert_eq!(next.len(), 5);
    }

    #[test]
    fn validate_rejects_bad_events() {
        assert_eq!(
            event(10, 5, 0).validate(),
            Err(LoadRangeError::Inverted { start: 10, end: 5 })
        );
        assert_eq!(
            event(10, 100, 0).validate(),
            Err(LoadRangeError::OutOfBounds {
                end: 100,
                size: 100
            })
        );
        assert_eq!(
            LoadEvent::new(LoadRange::new(0, 0), 0, 0).validate(),
            Err(LoadRangeError::EmptyCollection)
        );
        assert_eq!(event(0, 99, 3).validate(), Ok(()));
    }

    #[test]
    fn load_range_from_inclusive_range() {
        assert_eq!(LoadRange::from(3..=7), LoadRange::new(3, 7));
    }
}
