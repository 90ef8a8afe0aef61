// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping a visible unloaded block to the item that triggered it.

use crate::Block;

/// An unloaded block came into view.
///
/// Hosts build this from their visibility machinery (for example with
/// [`Block::intersection_at`]) and hand it to a [`BlockLoader`](crate::BlockLoader).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    /// The unloaded item that triggered the intersection.
    pub index: usize,
    /// First index of the intersected block (inclusive).
    pub start: usize,
    /// Last index of the intersected block (inclusive).
    pub end: usize,
}

impl Block {
    /// Maps a position within this block's rendered extent to an item.
    ///
    /// `fraction` is how far into the block the visible region's centre lies,
    /// from `0.0` (leading edge) to `1.0` (trailing edge); values outside that
    /// range and NaN are clamped. The position is taken across the buffered
    /// region, since that is what the block occupies on screen, and the
    /// resulting index is clamped into the block's own span.
    ///
    /// ```rust
    /// use understory_block_observer::Block;
    ///
    /// // Unloaded items 60..=99, laid out over 55..=99.
    /// let block = Block::new(60..=99, 55..=99, false, 100);
    ///
    /// assert_eq!(block.intersection_at(0.5).index, 77);
    /// // The leading buffer belongs to a loaded neighbour's items.
    /// assert_eq!(block.intersection_at(0.0).index, 60);
    /// assert_eq!(block.intersection_at(1.0).index, 99);
    /// ```
    #[must_use]
    pub fn intersection_at(&self, fraction: f64) -> Intersection {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        #[expect(
            clippy::cast_possible_truncation,
            reason = "The product is non-negative and at most the buffer length"
        )]
        let offset = (fraction * self.buffer_len() as f64).floor() as usize;
        let index = self
            .start()
            .max((self.buffer_start() + offset).min(self.end()));

        Intersection {
            index,
            start: self.start(),
            end: self.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Block;

    #[test]
    fn intersection_reports_block_bounds() {
        let block = Block::new(0..=39, 0..=44, false, 100);
        let hit = block.intersection_at(0.25);
        assert_eq!(hit.start, 0);
        assert_eq!(hit.end, 39);
        assert_eq!(hit.index, 11);
    }

    #[test]
    fn trailing_buffer_clamps_to_last_item() {
        // Items 0..=39 laid out over 0..=44: the last stretch is buffer.
        let block = Block::new(0..=39, 0..=44, false, 100);
        assert_eq!(block.intersection_at(0.95).index, 39);
    }

    #[test]
    fn out_of_range_fractions_are_clamped() {
        let block = Block::new(10..=19, 10..=19, false, 20);
        assert_eq!(block.intersection_at(-3.0).index, 10);
        assert_eq!(block.intersection_at(7.0).index, 19);
        assert_eq!(block.intersection_at(f64::NAN).index, 10);
    }
}
