//! rebatch: balanced redistribute-compute-return rounds over a fixed worker pool.
//!
//! A pool of workers each starts with a private, variably sized batch of
//! numeric items. One round consolidates every batch into a single flat
//! sequence, splits that sequence into near-equal shares, applies a
//! per-item transform where each share landed, and routes every computed
//! result back to the worker and position that contributed the original
//! item. Exact offset bookkeeping makes the trip lossless even though
//! the two partitionings of the sequence differ.

mod collective;
mod fabric;
mod layout;
mod round;
mod transform;
mod types;
mod workload;

pub use collective::Gathered;
pub use fabric::{connect, Hub, Link};
pub use layout::Layout;
pub use round::{run_generated, run_round};
pub use transform::{identity, sin_degrees};
pub use types::{Error, Rank, RankReport, Result, RoundConfig, RoundOutput, RoundSummary};
pub use workload::generate_batch;
