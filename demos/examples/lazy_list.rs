// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrolls through a lazily loaded list backed by a flaky paged API.
//!
//! Run with `RUST_LOG=debug` to see every load the observer applies.

use tracing_subscriber::EnvFilter;
use understory_block_observer::BlockObserver;
use understory_demos::layout::visible_triggers;
use understory_demos::mock_api::MockApi;

const SIZE: usize = 1_000;
const ITEM_EXTENT: f64 = 24.0;
const VIEWPORT_EXTENT: f64 = 480.0;
const PAGE_SIZE: usize = 50;
const BUFFER: usize = 10;

fn main() -> Result<(), serde_json::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut observer = BlockObserver::new(SIZE).with_buffer(BUFFER);
    let mut api = MockApi::new(SIZE, PAGE_SIZE).failing_every(7);
    let content_extent = SIZE as f64 * ITEM_EXTENT;

    // Scroll down half a viewport at a time, then back up until everything
    // has loaded; failed requests are retried on the next pass.
    let mut passes = 0;
    while !observer.is_fully_loaded() && passes < 10 {
        passes += 1;
        let mut scroll = 0.0;
        while scroll < content_extent {
            let viewport = scroll..scroll + VIEWPORT_EXTENT;
            for trigger in visible_triggers(observer.blocks(), content_extent, viewport) {
                observer.handle_intersection(trigger, &mut api);
            }
            scroll += VIEWPORT_EXTENT / 2.0;
        }
        tracing::info!(
            pass = passes,
            blocks = observer.blocks().len(),
            unloaded = observer.unloaded_blocks().count(),
            "finished scroll pass"
        );
    }

    println!(
        "loaded {} of {SIZE} items in {} requests over {passes} passes (revision {})",
        api.items().len(),
        api.calls(),
        observer.revision(),
    );
    println!("{}", serde_json::to_string_pretty(observer.blocks())?);
    Ok(())
}
