// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory paged item source standing in for a network API.

use std::collections::BTreeMap;

use understory_block_observer::{BlockLoader, Intersection, LoadRange};

/// Serves pages of generated items and can be told to fail periodically.
#[derive(Debug)]
pub struct MockApi {
    size: usize,
    page_size: usize,
    fail_every: Option<usize>,
    calls: usize,
    items: BTreeMap<usize, String>,
}

impl MockApi {
    /// Creates an API over `size` items served in pages of `page_size`.
    #[must_use]
    pub fn new(size: usize, page_size: usize) -> Self {
        Self {
            size,
            page_size: page_size.max(1),
            fail_every: None,
            calls: 0,
            items: BTreeMap::new(),
        }
    }

    /// Makes every `n`th request fail.
    #[must_use]
    pub fn failing_every(mut self, n: usize) -> Self {
        self.fail_every = (n > 0).then_some(n);
        self
    }

    /// Items fetched so far, by index.
    #[must_use]
    pub fn items(&self) -> &BTreeMap<usize, String> {
        &self.items
    }

    /// Number of requests made, including failed ones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Fetches the page containing `index` and returns the range it covered.
    pub fn fetch_page(&mut self, index: usize) -> Option<LoadRange> {
        self.calls += 1;
        if self.fail_every.is_some_and(|n| self.calls % n == 0) {
            tracing::warn!(index, call = self.calls, "mock request failed");
            return None;
        }

        let start = index / self.page_size * self.page_size;
        let end = (start + self.page_size - 1).min(self.size - 1);
        for i in start..=end {
            self.items
                .entry(i)
                .or_insert_with(|| format!("Item #{} - {}", i + 1, content_for(i)));
        }
        tracing::info!(start, end, "mock request served");
        Some(LoadRange::new(start, end))
    }
}

impl BlockLoader for MockApi {
    fn load(&mut self, params: Intersection) -> Option<LoadRange> {
        self.fetch_page(params.index)
    }
}

fn content_for(index: usize) -> String {
    match index % 5 {
        0 => "This is a short description for this item.".into(),
        1 => "This item contains medium-length content with some details about what it represents."
            .into(),
        2 => "A detailed description with multiple sentences. This provides more context about \
              what this particular item is about. It's quite verbose."
            .into(),
        3 => format!("Priority item with ID: {}", index * 1000 + 123),
        _ => format!(
            "Status: {}",
            if index % 2 == 0 { "Active" } else { "Inactive" }
        ),
    }
}
