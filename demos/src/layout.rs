// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side layout: stacking blocks by weight and finding visible triggers.

use core::ops::Range;

use understory_block_observer::{Block, Intersection};

/// Returns the extent occupied by each block when stacked over `content_extent`.
pub fn block_extents(blocks: &[Block], content_extent: f64) -> Vec<Range<f64>> {
    let mut top = 0.0;
    blocks
        .iter()
        .map(|block| {
            let bottom = top + block.percentage_height() / 100.0 * content_extent;
            let extent = top..bottom;
            top = bottom;
            extent
        })
        .collect()
}

/// Returns an intersection for every unloaded block overlapping `viewport`.
///
/// The triggering index is taken at the centre of the visible part of each
/// block.
pub fn visible_triggers(
    blocks: &[Block],
    content_extent: f64,
    viewport: Range<f64>,
) -> Vec<Intersection> {
    blocks
        .iter()
        .zip(block_extents(blocks, content_extent))
        .filter(|(block, extent)| {
            !block.is_loaded() && extent.start < viewport.end && extent.end > viewport.start
        })
        .map(|(block, extent)| {
            let visible_start = extent.start.max(viewport.start);
            let visible_end = extent.end.min(viewport.end);
            let centre = (visible_start + visible_end) * 0.5;
            block.intersection_at((centre - extent.start) / (extent.end - extent.start))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{block_extents, visible_triggers};
    use understory_block_observer::{BlockObserver, LoadRange};

    #[test]
    fn extents_stack_to_the_content_extent() {
        let mut observer = BlockObserver::new(100);
        observer.apply(LoadRange::new(40, 59));

        let extents = block_extents(observer.blocks(), 1000.0);
        assert_eq!(extents.len(), 3);
        assert!((extents[0].end - 400.0).abs() < 1e-9);
        assert!((extents[2].end - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn only_unloaded_blocks_in_view_trigger() {
        let mut observer = BlockObserver::new(100);
        observer.apply(LoadRange::new(40, 59));

        // Viewport entirely inside the loaded block.
        assert!(visible_triggers(observer.blocks(), 1000.0, 420.0..580.0).is_empty());

        // Viewport straddling the loaded block and the trailing unloaded block.
        let triggers = visible_triggers(observer.blocks(), 1000.0, 500.0..700.0);
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].start, 60);
        assert_eq!(triggers[0].index, 65);
    }
}
