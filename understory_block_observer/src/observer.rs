// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A controller owning the current block snapshot of one collection.

use alloc::vec;
use alloc::vec::Vec;

use crate::{Block, Intersection, LoadEvent, LoadRange, LoadRangeError, reconcile};

/// Resolves an [`Intersection`] into the range of items that is now loaded.
///
/// Returning `None` means "no update": nothing was loaded, for instance
/// because the fetch failed or is still in flight. The observer leaves its
/// blocks untouched, and the block will trigger again the next time it
/// becomes visible.
///
/// Any `FnMut(Intersection) -> Option<LoadRange>` closure is a loader.
pub trait BlockLoader {
    /// Loads items around `params.index` and reports what was loaded.
    fn load(&mut self, params: Intersection) -> Option<LoadRange>;
}

impl<F> BlockLoader for F
where
    F: FnMut(Intersection) -> Option<LoadRange>,
{
    fn load(&mut self, params: Intersection) -> Option<LoadRange> {
        self(params)
    }
}

/// Tracks which blocks of a collection of `size` items have been loaded.
///
/// `BlockObserver` holds a single snapshot of blocks, starting with one
/// unloaded block over the whole collection. Each applied [`LoadRange`]
/// replaces the snapshot with the result of [`reconcile`]; the previous
/// snapshot is never mutated in place.
///
/// Host frameworks are expected to:
///
/// - Lay out one region per block from [`BlockObserver::blocks`], sized by
///   [`Block::percentage_height`].
/// - Watch the regions of [`BlockObserver::unloaded_blocks`] for visibility.
/// - When one becomes visible, fetch around the triggering index and feed the
///   confirmed range back via [`BlockObserver::apply`] (or let
///   [`BlockObserver::handle_intersection`] drive a [`BlockLoader`]).
/// - Stop observing entirely once [`BlockObserver::is_fully_loaded`] is `true`.
#[derive(Clone, Debug)]
pub struct BlockObserver {
    size: usize,
    buffer: usize,
    blocks: Vec<Block>,
    revision: u64,
}

impl BlockObserver {
    /// Creates an observer for `size` items with no buffer.
    ///
    /// An empty collection has no blocks, and every load is ignored until the
    /// observer is [reset](Self::reset) to a non-zero size.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            buffer: 0,
            blocks: initial_blocks(size),
            revision: 0,
        }
    }

    /// Sets the buffer size, builder style.
    ///
    /// See [`BlockObserver::set_buffer`].
    #[must_use]
    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    /// Number of items in the collection.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of items before and after an unloaded block that also trigger it.
    #[must_use]
    pub fn buffer(&self) -> usize {
        self.buffer
    }

    /// Sets the buffer size used for subsequent loads.
    ///
    /// Existing blocks keep the buffers they were built with.
    pub fn set_buffer(&mut self, buffer: usize) {
        self.buffer = buffer;
    }

    /// Returns the current snapshot, ordered by index.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the blocks that still need loading.
    pub fn unloaded_blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter().filter(|block| !block.is_loaded())
    }

    /// Returns `true` once a single loaded block covers the collection.
    #[must_use]
    pub fn is_fully_loaded(&self) -> bool {
        matches!(self.blocks.as_slice(), [block] if block.is_loaded())
    }

    /// Returns the block whose span contains `index`.
    #[must_use]
    pub fn block_at(&self, index: usize) -> Option<&Block> {
        let position = self.blocks.partition_point(|block| block.end() < index);
        self.blocks.get(position).filter(|block| block.contains(index))
    }

    /// Returns `true` if the item at `index` has been loaded.
    #[must_use]
    pub fn is_loaded(&self, index: usize) -> bool {
        self.block_at(index).is_some_and(Block::is_loaded)
    }

    /// Returns the current revision counter.
    ///
    /// The revision is bumped whenever the snapshot changes. Loads that leave
    /// the blocks as they were do not bump it.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Marks `range` as loaded and returns whether the snapshot changed.
    ///
    /// `range` must satisfy `start <= end < size`; use
    /// [`BlockObserver::try_apply`] when that is not known.
    pub fn apply(&mut self, range: LoadRange) -> bool {
        if self.blocks.is_empty() {
            tracing::trace!(?range, "ignoring load for an empty collection");
            return false;
        }

        let event = LoadEvent::new(range, self.buffer, self.size);
        let next = reconcile(&self.blocks, &event);
        if next == self.blocks {
            tracing::trace!(?range, "load range was already reflected in the blocks");
            return false;
        }

        self.blocks = next;
        self.revision += 1;
        tracing::debug!(
            start = range.start,
            end = range.end,
            blocks = self.blocks.len(),
            revision = self.revision,
            "applied load range"
        );
        true
    }

    /// Applies a loader's answer; `None` leaves the snapshot unchanged.
    pub fn apply_result(&mut self, result: Option<LoadRange>) -> bool {
        match result {
            Some(range) => self.apply(range),
            None => {
                tracing::trace!("loader returned no range");
                false
            }
        }
    }

    /// Validates `range` against the collection, then applies it.
    pub fn try_apply(&mut self, range: LoadRange) -> Result<bool, LoadRangeError> {
        range.validate(self.size)?;
        Ok(self.apply(range))
    }

    /// Asks `loader` to resolve `params` and applies the resulting range.
    ///
    /// Returns whether the snapshot changed.
    pub fn handle_intersection<L>(&mut self, params: Intersection, loader: &mut L) -> bool
    where
        L: BlockLoader + ?Sized,
    {
        let result = loader.load(params);
        self.apply_result(result)
    }

    /// Starts over with a single unloaded block for `size` items.
    pub fn reset(&mut self, size: usize) {
        let blocks = initial_blocks(size);
        if self.size == size && self.blocks == blocks {
            return;
        }
        self.size = size;
        self.blocks = blocks;
        self.revision += 1;
    }
}

fn initial_blocks(size: usize) -> Vec<Block> {
    if size == 0 {
        Vec::new()
    } else {
        vec![Block::unloaded(size)]
    }
}
