//! Collective transfers over the fabric.
//!
//! Fixed-size collectives move one count per rank (count gather, share
//! scatter); variable-length collectives move whole value regions placed
//! by a `Layout`'s offset table. The hub completes each gather for every
//! rank before anything downstream can use the result, and every payload
//! length is validated against the governing layout before data is
//! placed. Mismatches abort the round; nothing is ever truncated or
//! padded.

use crate::fabric::{Assign, Hub, Link, Report};
use crate::layout::Layout;
use crate::types::{Error, Rank, Result};

/// A flat sequence paired with the layout that partitions it.
#[derive(Debug, Clone)]
pub struct Gathered<T> {
    values: Vec<T>,
    layout: Layout,
}

impl<T> Gathered<T> {
    /// All values in rank-major order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The layout governing the values.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The region contributed by `rank`.
    pub fn slice(&self, rank: Rank) -> &[T] {
        &self.values[self.layout.range(rank)]
    }

    /// Take the values, dropping the layout pairing.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T, U> Hub<T, U> {
    /// Receive every rank's batch length, in rank order.
    pub fn gather_counts(&self) -> Result<Vec<usize>> {
        let mut counts = Vec::with_capacity(self.pool());
        for rank in 0..self.pool() {
            match self.recv_from(rank)? {
                Report::Count(count) => counts.push(count),
                other => {
                    return Err(Error::OutOfPhase {
                        rank,
                        expected: "count",
                        got: other.label(),
                    })
                }
            }
        }
        Ok(counts)
    }

    /// Receive every rank's batch and place it at the rank's region.
    ///
    /// Each batch must match the length the rank previously reported;
    /// a disagreement is fatal for the whole round.
    pub fn gather_batches(&self, layout: &Layout) -> Result<Gathered<T>> {
        self.check_pool(layout)?;
        let mut values = Vec::with_capacity(layout.total());
        for rank in 0..self.pool() {
            let batch = match self.recv_from(rank)? {
                Report::Batch(batch) => batch,
                other => {
                    return Err(Error::OutOfPhase {
                        rank,
                        expected: "batch",
                        got: other.label(),
                    })
                }
            };
            if batch.len() != layout.count(rank) {
                return Err(Error::ShapeMismatch {
                    expected: layout.count(rank),
                    actual: batch.len(),
                });
            }
            debug_assert_eq!(values.len(), layout.offset(rank));
            values.extend(batch);
        }
        Ok(Gathered {
            values,
            layout: layout.clone(),
        })
    }

    /// Hand every rank its item count under `layout`.
    pub fn scatter_shares(&self, layout: &Layout) -> Result<()> {
        self.check_pool(layout)?;
        for rank in 0..self.pool() {
            self.send_to(rank, Assign::Share(layout.count(rank)))?;
        }
        Ok(())
    }

    /// Split `values` by `layout` and deliver each region to its rank.
    pub fn scatter_values(&self, values: Vec<T>, layout: &Layout) -> Result<()> {
        self.check_pool(layout)?;
        for (rank, part) in layout.split(values)?.into_iter().enumerate() {
            self.send_to(rank, Assign::Slice(part))?;
        }
        Ok(())
    }

    /// Receive every rank's computed results, placed by `layout`.
    pub fn gather_results(&self, layout: &Layout) -> Result<Gathered<U>> {
        self.check_pool(layout)?;
        let mut values = Vec::with_capacity(layout.total());
        for rank in 0..self.pool() {
            let results = match self.recv_from(rank)? {
                Report::Results(results) => results,
                other => {
                    return Err(Error::OutOfPhase {
                        rank,
                        expected: "results",
                        got: other.label(),
                    })
                }
            };
            if results.len() != layout.count(rank) {
                return Err(Error::ShapeMismatch {
                    expected: layout.count(rank),
                    actual: results.len(),
                });
            }
            values.extend(results);
        }
        Ok(Gathered {
            values,
            layout: layout.clone(),
        })
    }

    /// Split final results by `layout` and deliver each region home.
    pub fn scatter_finals(&self, values: Vec<U>, layout: &Layout) -> Result<()> {
        self.check_pool(layout)?;
        for (rank, part) in layout.split(values)?.into_iter().enumerate() {
            self.send_to(rank, Assign::Final(part))?;
        }
        Ok(())
    }

    fn check_pool(&self, layout: &Layout) -> Result<()> {
        if layout.pool() != self.pool() {
            return Err(Error::RankMismatch {
                expected: self.pool(),
                actual: layout.pool(),
            });
        }
        Ok(())
    }
}

impl<T, U> Link<T, U> {
    /// Report this rank's private batch length to the hub.
    pub fn report_count(&self, count: usize) -> Result<()> {
        self.send(Report::Count(count))
    }

    /// Send this rank's private batch for consolidation.
    pub fn send_batch(&self, batch: Vec<T>) -> Result<()> {
        self.send(Report::Batch(batch))
    }

    /// Receive the item count assigned to this rank.
    pub fn recv_share(&self) -> Result<usize> {
        match self.recv()? {
            Assign::Share(count) => Ok(count),
            other => Err(Error::OutOfPhase {
                rank: self.rank(),
                expected: "share",
                got: other.label(),
            }),
        }
    }

    /// Receive this rank's region of the consolidated sequence.
    pub fn recv_slice(&self) -> Result<Vec<T>> {
        match self.recv()? {
            Assign::Slice(slice) => Ok(slice),
            other => Err(Error::OutOfPhase {
                rank: self.rank(),
                expected: "slice",
                got: other.label(),
            }),
        }
    }

    /// Send this rank's computed results to the hub.
    pub fn send_results(&self, results: Vec<U>) -> Result<()> {
        self.send(Report::Results(results))
    }

    /// Receive results for the items this rank originally contributed.
    pub fn recv_final(&self) -> Result<Vec<U>> {
        match self.recv()? {
            Assign::Final(results) => Ok(results),
            other => Err(Error::OutOfPhase {
                rank: self.rank(),
                expected: "final",
                got: other.label(),
            }),
        }
    }
}
