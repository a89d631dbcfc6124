//! Count vectors and offset tables for partitioned flat sequences.
//!
//! A `Layout` records how one flat sequence divides among the ranks of a
//! fixed pool: `counts[i]` items per rank, starting at `offsets[i]`. The
//! offset table is the prefix sum of the counts, so region boundaries
//! are consistent by construction and regions never overlap.

use crate::types::{Error, Rank, Result};
use std::ops::Range;

/// Partitioning of a flat sequence across a fixed pool of ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    counts: Vec<usize>,
    offsets: Vec<usize>,
    total: usize,
}

impl Layout {
    /// Build a layout from per-rank counts, deriving offsets by prefix sum.
    pub fn from_counts(counts: Vec<usize>) -> Layout {
        let mut offsets = Vec::with_capacity(counts.len());
        let mut next = 0usize;
        for &count in &counts {
            offsets.push(next);
            next += count;
        }
        Layout {
            counts,
            offsets,
            total: next,
        }
    }

    /// Plan a near-equal split of `total` items across `pool` ranks.
    ///
    /// Every rank receives `total / pool` items and the first
    /// `total % pool` ranks receive one extra, so no two shares differ
    /// by more than one and lower ranks carry the surplus.
    pub fn balanced(total: usize, pool: usize) -> Result<Layout> {
        if pool == 0 {
            return Err(Error::EmptyPool);
        }
        let base = total / pool;
        let remainder = total % pool;
        let counts = (0..pool)
            .map(|rank| if rank < remainder { base + 1 } else { base })
            .collect();
        Ok(Layout::from_counts(counts))
    }

    /// Number of ranks this layout spans.
    pub fn pool(&self) -> usize {
        self.counts.len()
    }

    /// Total number of items across all ranks.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Items assigned to `rank`.
    pub fn count(&self, rank: Rank) -> usize {
        self.counts[rank]
    }

    /// Starting position of `rank`'s region in the flat sequence.
    pub fn offset(&self, rank: Rank) -> usize {
        self.offsets[rank]
    }

    /// `rank`'s region of the flat sequence.
    pub fn range(&self, rank: Rank) -> Range<usize> {
        let start = self.offsets[rank];
        start..start + self.counts[rank]
    }

    /// Per-rank counts in rank order.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Per-rank starting positions in rank order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Split a flat value vector into one owned region per rank.
    ///
    /// The vector length must match the layout total; partial coverage
    /// is rejected rather than truncated.
    pub fn split<T>(&self, mut values: Vec<T>) -> Result<Vec<Vec<T>>> {
        if values.len() != self.total {
            return Err(Error::ShapeMismatch {
                expected: self.total,
                actual: values.len(),
            });
        }
        // Peel regions off the tail so each split is one allocation.
        let mut parts = Vec::with_capacity(self.counts.len());
        for &count in self.counts.iter().rev() {
            parts.push(values.split_off(values.len() - count));
        }
        parts.reverse();
        Ok(parts)
    }
}
