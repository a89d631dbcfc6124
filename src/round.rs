//! One redistribute-compute-return round over a fixed pool.
//!
//! Every rank walks the same phases: report its batch length, send its
//! batch for consolidation, receive a rebalanced share, compute, send
//! results back, and receive the results for its own contributions.
//! Rank 0 additionally holds the hub and drives the coordinator phases
//! between those steps, so the two roles are two distinct function
//! bodies rather than one body branching on rank.

use crate::fabric::{self, Hub, Link};
use crate::layout::Layout;
use crate::types::{Error, RankReport, Result, RoundConfig, RoundOutput, RoundSummary};
use crate::workload;
use std::thread;

/// Run one full round: consolidate, rebalance, compute, reconcile.
///
/// `batches` holds one private batch per rank; its length fixes the pool
/// size. Each worker runs on its own thread, and rank 0's thread doubles
/// as the coordinator. The round is atomic: any failure aborts the whole
/// round with the first causal error, and no partial output is returned.
pub fn run_round<T, U, F>(mut batches: Vec<Vec<T>>, transform: F) -> Result<RoundOutput<T, U>>
where
    T: Clone + Send,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    let pool = batches.len();
    let (hub, mut links) = fabric::connect::<T, U>(pool)?;
    let lead_link = links.remove(0);
    let lead_batch = batches.remove(0);
    let transform = &transform;

    // Join every handle before the scope closes so a panicked worker
    // becomes an error instead of propagating.
    let (lead, others) = thread::scope(|scope| {
        let coordinator =
            scope.spawn(move || coordinator_round(hub, lead_link, lead_batch, transform));
        let members: Vec<_> = links
            .into_iter()
            .zip(batches)
            .map(|(link, batch)| scope.spawn(move || member_round(link, batch, transform)))
            .collect();

        let lead = coordinator.join();
        let others: Vec<_> = members.into_iter().map(|handle| handle.join()).collect();
        (lead, others)
    });

    // The coordinator saw any member failure first, so its error is the
    // causal one; member-side errors are echoes of the hub going away.
    let (lead_report, summary) = lead.unwrap_or(Err(Error::RankLost { rank: 0 }))?;
    let mut reports = Vec::with_capacity(pool);
    reports.push(lead_report);
    for (offset, joined) in others.into_iter().enumerate() {
        reports.push(joined.unwrap_or(Err(Error::RankLost { rank: offset + 1 }))?);
    }

    log::info!(
        "round complete: {} items redistributed across {} workers",
        summary.total,
        pool
    );
    Ok(RoundOutput { reports, summary })
}

/// Run one round over batches generated from `config`.
pub fn run_generated<U, F>(config: &RoundConfig, transform: F) -> Result<RoundOutput<i32, U>>
where
    U: Send,
    F: Fn(&i32) -> U + Sync,
{
    let batches = (0..config.pool)
        .map(|rank| workload::generate_batch(config, rank))
        .collect();
    run_round(batches, transform)
}

fn coordinator_round<T, U, F>(
    hub: Hub<T, U>,
    link: Link<T, U>,
    batch: Vec<T>,
    transform: &F,
) -> Result<(RankReport<T, U>, RoundSummary)>
where
    T: Clone,
    F: Fn(&T) -> U,
{
    // Every rank reports its private batch length.
    link.report_count(batch.len())?;
    let original = Layout::from_counts(hub.gather_counts()?);
    log::debug!(
        "gathered counts {:?}, {} items total",
        original.counts(),
        original.total()
    );

    // Consolidate every batch into one flat sequence.
    link.send_batch(batch.clone())?;
    let gathered = hub.gather_batches(&original)?;

    // Plan the balanced split and hand every rank its share.
    let balanced = Layout::balanced(original.total(), hub.pool())?;
    log::debug!("balanced shares {:?}", balanced.counts());
    hub.scatter_shares(&balanced)?;
    let share = link.recv_share()?;

    hub.scatter_values(gathered.into_values(), &balanced)?;
    let slice = link.recv_slice()?;
    if slice.len() != share {
        return Err(Error::ShapeMismatch {
            expected: share,
            actual: slice.len(),
        });
    }

    // Local compute on the assigned slice.
    let computed: Vec<U> = slice.iter().map(transform).collect();
    link.send_results(computed)?;

    // Reconcile: gather by the balanced shape, return by the original.
    let results = hub.gather_results(&balanced)?;
    hub.scatter_finals(results.into_values(), &original)?;
    let finals = link.recv_final()?;

    let summary = RoundSummary {
        counts: original.counts().to_vec(),
        balanced: balanced.counts().to_vec(),
        total: original.total(),
    };
    let report = RankReport {
        rank: link.rank(),
        batch,
        results: finals,
    };
    Ok((report, summary))
}

fn member_round<T, U, F>(link: Link<T, U>, batch: Vec<T>, transform: &F) -> Result<RankReport<T, U>>
where
    T: Clone,
    F: Fn(&T) -> U,
{
    link.report_count(batch.len())?;
    link.send_batch(batch.clone())?;

    let share = link.recv_share()?;
    let slice = link.recv_slice()?;
    if slice.len() != share {
        return Err(Error::ShapeMismatch {
            expected: share,
            actual: slice.len(),
        });
    }

    let computed: Vec<U> = slice.iter().map(transform).collect();
    link.send_results(computed)?;

    let finals = link.recv_final()?;
    Ok(RankReport {
        rank: link.rank(),
        batch,
        results: finals,
    })
}
