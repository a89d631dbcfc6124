use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::thread;
use thiserror::Error;

/// Worker identity within the pool, in `[0, pool)`.
pub type Rank = usize;

/// Configuration for a round with generated workloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Number of workers in the pool.
    pub pool: usize,
    /// Upper bound (exclusive) on generated batch lengths.
    pub max_batch: usize,
    /// Upper bound (inclusive) on generated item values, in degrees.
    pub max_degrees: i32,
    /// Seed for reproducible workloads; `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        let pool = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(4);
        Self {
            pool,
            max_batch: 10,
            max_degrees: 180,
            seed: None,
        }
    }
}

/// What one worker ends the round holding.
#[derive(Debug, Clone)]
pub struct RankReport<T, U> {
    /// The worker's identity within the pool.
    pub rank: Rank,
    /// The private batch the worker contributed.
    pub batch: Vec<T>,
    /// Computed results, aligned position for position with `batch`.
    pub results: Vec<U>,
}

/// Count bookkeeping recorded by the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Items each worker contributed, in rank order.
    pub counts: Vec<usize>,
    /// Items each worker computed after rebalancing, in rank order.
    pub balanced: Vec<usize>,
    /// Total items moved through the round.
    pub total: usize,
}

/// Everything a completed round produced.
#[derive(Debug, Clone)]
pub struct RoundOutput<T, U> {
    /// Per-worker reports in rank order.
    pub reports: Vec<RankReport<T, U>>,
    /// Count bookkeeping for the round.
    pub summary: RoundSummary,
}

/// rebatch error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A pool of zero workers cannot host a round.
    #[error("Worker pool is empty")]
    EmptyPool,

    /// A payload or value vector did not cover the expected item count.
    #[error("Shape mismatch: expected {expected} items, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A layout was built for a different pool width.
    #[error("Rank count mismatch: expected {expected} ranks, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// A worker's channel endpoint disappeared before the round finished.
    #[error("Rank {rank} left the round before completion")]
    RankLost { rank: usize },

    /// The coordinator's endpoints disappeared before the round finished.
    #[error("Coordinator left the round before completion")]
    CoordinatorLost,

    /// A message arrived outside its phase in the round protocol.
    #[error("Rank {rank} out of phase: expected {expected}, got {got}")]
    OutOfPhase {
        rank: usize,
        expected: &'static str,
        got: &'static str,
    },
}

/// Result alias for rebatch operations.
pub type Result<T> = std::result::Result<T, Error>;
