// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_block_observer --heading-base-level=0

//! Understory Block Observer: incremental load tracking for index strips.
//!
//! This crate tracks which contiguous ranges ("blocks") of a large collection
//! indexed `0..size` have been loaded, so that a host can trigger loading of
//! the unloaded ones as they approach visibility. It is renderer-agnostic and
//! shares no state with any particular UI stack.
//!
//! The core concepts are:
//!
//! - [`Block`]: an inclusive index span tagged loaded/unloaded, together with
//!   a buffered layout region and a derived percentage height.
//! - [`reconcile`]: a pure function that merges a newly loaded range into a
//!   block list, splitting blocks at the range boundaries and merging
//!   neighbours that end up with the same status.
//! - [`BlockObserver`]: a small controller owning the current snapshot for one
//!   collection, with a buffer setting, a revision counter, and helpers for
//!   driving a [`BlockLoader`].
//!
//! This crate deliberately does **not** know about viewports, scrolling, or
//! fetching. Host frameworks are responsible for:
//!
//! - Laying out one region per block, sized by [`Block::percentage_height`].
//! - Detecting when an unloaded region becomes visible, and turning that into
//!   an [`Intersection`] (for example with [`Block::intersection_at`]).
//! - Fetching items and reporting the confirmed [`LoadRange`] back.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_block_observer::{BlockObserver, LoadRange};
//!
//! // 100 items; unloaded blocks reach 5 items into loaded neighbours.
//! let mut observer = BlockObserver::new(100).with_buffer(5);
//!
//! // The host fetched items 40..=59.
//! observer.apply(LoadRange::new(40, 59));
//!
//! let blocks = observer.blocks();
//! assert_eq!(blocks.len(), 3);
//! assert_eq!(blocks[0].span(), 0..=39);
//! assert_eq!(blocks[0].buffer(), 0..=44);
//! assert!(blocks[1].is_loaded());
//! assert_eq!(blocks[1].percentage_height(), 10.0);
//!
//! // Hosts would now place loading triggers over the unloaded blocks.
//! assert_eq!(observer.unloaded_blocks().count(), 2);
//! ```
//!
//! ## Buffers
//!
//! With a non-zero buffer, each loaded block lends up to `buffer` items on
//! each side to its unloaded neighbours, but never more than half of itself.
//! The unloaded regions are therefore laid out slightly larger than their
//! item spans and become visible, and trigger loading, a little early. At the
//! edges of the collection no buffer is taken, since there is nothing beyond
//! them to load.
//!
//! Buffers assume each load covers items that were not loaded yet. Reloading
//! part of a loaded block with a non-zero buffer can rebuild the unloaded
//! neighbour that borrowed from it, starting right after the new load, so
//! loaded items between the two are reported as unloaded again. Hosts that
//! may report the same items twice should check [`BlockObserver::is_loaded`]
//! first, or use a zero buffer.
//!
//! All indices are inclusive. Blocks are never mutated in place: every load
//! produces a fresh list, so snapshots can be kept and compared freely.
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod block;
mod error;
mod intersection;
mod observer;
mod partition;
mod reconcile;

pub use block::Block;
pub use error::{LoadRangeError, PartitionError};
pub use intersection::Intersection;
pub use observer::{BlockLoader, BlockObserver};
pub use partition::check_partition;
pub use reconcile::{LoadEvent, LoadRange, reconcile};
