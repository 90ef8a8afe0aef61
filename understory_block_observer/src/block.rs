// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blocks: tagged, weighted index intervals.

use core::ops::RangeInclusive;

/// A contiguous run of items that are either all loaded or all unloaded.
///
/// A block has two inclusive ranges:
///
/// - its **span** (`start..=end`): the items it actually describes, and
/// - its **buffer** (`buffer_start..=buffer_end`): the region it occupies when
///   laid out. Loaded blocks give part of their edges to neighbouring unloaded
///   blocks so that loading is triggered a little before unloaded items become
///   visible.
///
/// The buffers of a block list built by [`reconcile`](crate::reconcile) from
/// the initial unloaded block partition `[0, size)`. Reloading items that are
/// already loaded with a non-zero buffer can shrink a loaded span and mark
/// some of its items unloaded again.
///
/// The display weight ([`Block::percentage_height`]) is derived from the
/// buffer length and is recomputed every time a block is built.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    start: usize,
    end: usize,
    buffer_start: usize,
    buffer_end: usize,
    loaded: bool,
    percentage_height: f64,
}

impl Block {
    /// Creates a block for a collection of `size` items.
    ///
    /// `span` and `buffer` are inclusive. The percentage height is computed
    /// from `buffer` and `size`.
    #[must_use]
    pub fn new(
        span: RangeInclusive<usize>,
        buffer: RangeInclusive<usize>,
        loaded: bool,
        size: usize,
    ) -> Self {
        let (start, end) = span.into_inner();
        let (buffer_start, buffer_end) = buffer.into_inner();
        Self {
            start,
            end,
            buffer_start,
            buffer_end,
            loaded,
            percentage_height: percentage_of(buffer_end + 1 - buffer_start, size),
        }
    }

    /// Creates the single unloaded block covering a whole collection.
    ///
    /// `size` must be non-zero.
    #[must_use]
    pub fn unloaded(size: usize) -> Self {
        debug_assert!(size > 0, "an empty collection has no blocks");
        Self::new(0..=size - 1, 0..=size - 1, false, size)
    }

    /// First item index (inclusive).
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last item index (inclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// First index of the buffered layout region (inclusive).
    #[must_use]
    pub fn buffer_start(&self) -> usize {
        self.buffer_start
    }

    /// Last index of the buffered layout region (inclusive).
    #[must_use]
    pub fn buffer_end(&self) -> usize {
        self.buffer_end
    }

    /// Returns `true` if every item in the span has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Share of the total layout extent this block occupies, in percent.
    #[must_use]
    pub fn percentage_height(&self) -> f64 {
        self.percentage_height
    }

    /// The item span as an inclusive range.
    #[must_use]
    pub fn span(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// The buffered layout region as an inclusive range.
    #[must_use]
    pub fn buffer(&self) -> RangeInclusive<usize> {
        self.buffer_start..=self.buffer_end
    }

    /// Number of items in the span.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Number of indices in the buffered layout region.
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.buffer_end + 1 - self.buffer_start
    }

    /// Returns `true` if `index` lies within the span.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.span().contains(&index)
    }

    /// Returns `true` if the buffered region does not touch `range`.
    pub(crate) fn buffer_is_disjoint_from(&self, range: &RangeInclusive<usize>) -> bool {
        self.buffer_end < *range.start() || self.buffer_start > *range.end()
    }
}

fn percentage_of(extent: usize, size: usize) -> f64 {
    (extent as f64 / size as f64) * 100.0
}
