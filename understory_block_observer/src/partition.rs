// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building and checking block partitions.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::{Block, PartitionError};

/// Append-only block list that keeps neighbouring statuses distinct.
///
/// Pushing a block with the same status as the last one extends the last
/// block instead; its weight is recomputed from the extended buffer.
#[derive(Debug)]
pub(crate) struct Partition {
    blocks: Vec<Block>,
    size: usize,
}

impl Partition {
    pub(crate) fn with_capacity(size: usize, capacity: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(capacity),
            size,
        }
    }

    pub(crate) fn push(
        &mut self,
        span: RangeInclusive<usize>,
        buffer: RangeInclusive<usize>,
        loaded: bool,
    ) {
        if let Some(last) = self.blocks.last_mut()
            && last.is_loaded() == loaded
        {
            *last = Block::new(
                last.start()..=*span.end(),
                last.buffer_start()..=*buffer.end(),
                loaded,
                self.size,
            );
            return;
        }
        self.blocks.push(Block::new(span, buffer, loaded, self.size));
    }

    pub(crate) fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

/// Checks that `blocks` is a maximal partition of `[0, size)`.
///
/// The buffers must be contiguous, start at `0`, end at `size - 1`, and no two
/// neighbouring blocks may share a loaded status. An empty list is only valid
/// for an empty collection.
///
/// ```rust
/// use understory_block_observer::{Block, PartitionError, check_partition};
///
/// let blocks = [
///     Block::new(0..=39, 0..=39, false, 100),
///     Block::new(40..=99, 40..=99, true, 100),
/// ];
/// assert_eq!(check_partition(&blocks, 100), Ok(()));
///
/// let gap = [Block::new(0..=39, 0..=39, false, 100)];
/// assert_eq!(
///     check_partition(&gap, 100),
///     Err(PartitionError::Incomplete { covered: 40, size: 100 }),
/// );
/// ```
pub fn check_partition(blocks: &[Block], size: usize) -> Result<(), PartitionError> {
    if blocks.is_empty() {
        return if size == 0 {
            Ok(())
        } else {
            Err(PartitionError::Empty)
        };
    }

    let mut expected = 0;
    let mut previous: Option<bool> = None;
    for (index, block) in blocks.iter().enumerate() {
        if block.buffer_start() > block.buffer_end() {
            return Err(PartitionError::InvertedBuffer { index });
        }
        if block.buffer_start() != expected {
            return Err(PartitionError::Gap {
                index,
                expected,
                found: block.buffer_start(),
            });
        }
        if previous == Some(block.is_loaded()) {
            return Err(PartitionError::SameStatusNeighbours { index });
        }
        previous = Some(block.is_loaded());
        expected = block.buffer_end() + 1;
    }

    if expected != size {
        return Err(PartitionError::Incomplete {
            covered: expected,
            size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Partition, check_partition};
    use crate::{Block, PartitionError};

    #[test]
    fn push_merges_same_status_neighbours() {
        let mut partition = Partition::with_capacity(100, 4);
        partition.push(0..=19, 0..=19, false);
        partition.push(20..=39, 20..=39, true);
        partition.push(40..=59, 40..=59, true);
        partition.push(60..=99, 60..=99, false);

        let blocks = partition.into_blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].span(), 20..=59);
        assert_eq!(blocks[1].buffer(), 20..=59);
        assert_eq!(blocks[1].percentage_height(), 40.0);
    }

    #[test]
    fn repeated_identical_pushes_collapse() {
        let mut partition = Partition::with_capacity(100, 2);
        partition.push(40..=59, 45..=54, true);
        partition.push(40..=59, 45..=54, true);

        let blocks = partition.into_blocks();
        assert_eq!(blocks, [Block::new(40..=59, 45..=54, true, 100)]);
    }

    #[test]
    fn check_partition_reports_problems_in_order() {
        assert_eq!(check_partition(&[], 0), Ok(()));
        assert_eq!(check_partition(&[], 10), Err(PartitionError::Empty));

        let gap = [
            Block::new(0..=4, 0..=4, false, 10),
            Block::new(5..=9, 6..=9, true, 10),
        ];
        assert_eq!(
            check_partition(&gap, 10),
            Err(PartitionError::Gap {
                index: 1,
                expected: 5,
                found: 6,
            })
        );

        let same = [
            Block::new(0..=4, 0..=4, true, 10),
            Block::new(5..=9, 5..=9, true, 10),
        ];
        assert_eq!(
            check_partition(&same, 10),
            Err(PartitionError::SameStatusNeighbours { index: 1 })
        );

        let inverted = [
            Block::new(0..=4, 0..=5, false, 10),
            Block::new(5..=9, 6..=5, true, 10),
        ];
        assert_eq!(
            check_partition(&inverted, 10),
            Err(PartitionError::InvertedBuffer { index: 1 })
        );
    }
}
