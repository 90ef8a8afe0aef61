// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for callers that validate inputs before reconciling.

use core::fmt;

/// A load range that does not fit the collection it is applied to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadRangeError {
    /// The collection has no items, so nothing can be loaded.
    EmptyCollection,
    /// `start` is greater than `end`.
    Inverted {
        /// First index of the range.
        start: usize,
        /// Last index of the range.
        end: usize,
    },
    /// `end` lies past the last item of the collection.
    OutOfBounds {
        /// Last index of the range.
        end: usize,
        /// Number of items in the collection.
        size: usize,
    },
}

impl fmt::Display for LoadRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCollection => f.write_str("cannot load a range of an empty collection"),
            Self::Inverted { start, end } => {
                write!(f, "load range {start}..={end} is inverted")
            }
            Self::OutOfBounds { end, size } => {
                write!(f, "load range ends at {end} but the collection has {size} items")
            }
        }
    }
}

impl core::error::Error for LoadRangeError {}

/// A block list that is not a valid partition of `[0, size)`.
///
/// Returned by [`check_partition`](crate::check_partition).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PartitionError {
    /// The list is empty but the collection is not.
    Empty,
    /// A block's buffer range is inverted.
    InvertedBuffer {
        /// Position of the offending block in the list.
        index: usize,
    },
    /// A block's buffer does not start right after the previous one.
    Gap {
        /// Position of the offending block in the list.
        index: usize,
        /// The buffer start that would have been contiguous.
        expected: usize,
        /// The buffer start that was found.
        found: usize,
    },
    /// Two neighbouring blocks share the same loaded status.
    SameStatusNeighbours {
        /// Position of the second block of the pair.
        index: usize,
    },
    /// The buffers stop short of, or run past, the end of the collection.
    Incomplete {
        /// Number of indices covered by the buffers.
        covered: usize,
        /// Number of items in the collection.
        size: usize,
    },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("block list is empty"),
            Self::InvertedBuffer { index } => {
                write!(f, "block {index} has an inverted buffer range")
            }
            Self::Gap {
                index,
                expected,
                found,
            } => write!(
                f,
                "block {index} buffer starts at {found}, expected {expected}"
            ),
            Self::SameStatusNeighbours { index } => write!(
                f,
                "blocks {} and {index} share the same loaded status",
                index.saturating_sub(1)
            ),
            Self::Incomplete { covered, size } => {
                write!(f, "buffers cover {covered} of {size} indices")
            }
        }
    }
}

impl core::error::Error for PartitionError {}
