//! In-process message fabric connecting a coordinator hub to worker links.
//!
//! The fabric carries a small typed protocol: ranks report counts,
//! batches, and results toward the hub; the hub hands back shares,
//! slices, and final results. One channel pair per rank keeps sender
//! identity structural, so messages carry no rank tag and nothing is
//! parsed. Channels are unbounded: senders never block, and phase
//! ordering is enforced entirely by the receiving side.

use crate::types::{Error, Rank, Result};
use std::sync::mpsc;

/// Message a rank sends toward the hub.
pub(crate) enum Report<T, U> {
    /// Length of the rank's private batch.
    Count(usize),
    /// The private batch itself.
    Batch(Vec<T>),
    /// Computed results for the rank's assigned slice.
    Results(Vec<U>),
}

impl<T, U> Report<T, U> {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Report::Count(_) => "count",
            Report::Batch(_) => "batch",
            Report::Results(_) => "results",
        }
    }
}

/// Message the hub sends toward a rank.
pub(crate) enum Assign<T, U> {
    /// How many items the rank will receive for computing.
    Share(usize),
    /// The rank's region of the consolidated sequence.
    Slice(Vec<T>),
    /// Results for the items the rank originally contributed.
    Final(Vec<U>),
}

impl<T, U> Assign<T, U> {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Assign::Share(_) => "share",
            Assign::Slice(_) => "slice",
            Assign::Final(_) => "final",
        }
    }
}

/// Coordinator capability: one inbound queue and one outbound queue per rank.
pub struct Hub<T, U> {
    from: Vec<mpsc::Receiver<Report<T, U>>>,
    to: Vec<mpsc::Sender<Assign<T, U>>>,
}

impl<T, U> Hub<T, U> {
    /// Number of ranks wired into the fabric.
    pub fn pool(&self) -> usize {
        self.to.len()
    }

    pub(crate) fn recv_from(&self, rank: Rank) -> Result<Report<T, U>> {
        self.from[rank].recv().map_err(|_| {
            log::warn!("rank {rank} unreachable while the hub was receiving");
            Error::RankLost { rank }
        })
    }

    pub(crate) fn send_to(&self, rank: Rank, assign: Assign<T, U>) -> Result<()> {
        self.to[rank].send(assign).map_err(|_| {
            log::warn!("rank {rank} unreachable while the hub was sending");
            Error::RankLost { rank }
        })
    }
}

/// Worker capability: rank identity plus the rank's two channel endpoints.
pub struct Link<T, U> {
    rank: Rank,
    pool: usize,
    tx: mpsc::Sender<Report<T, U>>,
    rx: mpsc::Receiver<Assign<T, U>>,
}

impl<T, U> Link<T, U> {
    /// This link's rank within the pool.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Size of the pool this link belongs to.
    pub fn pool(&self) -> usize {
        self.pool
    }

    pub(crate) fn send(&self, report: Report<T, U>) -> Result<()> {
        self.tx.send(report).map_err(|_| Error::CoordinatorLost)
    }

    pub(crate) fn recv(&self) -> Result<Assign<T, U>> {
        self.rx.recv().map_err(|_| Error::CoordinatorLost)
    }
}

/// Wire up a coordinator hub and one link per rank.
///
/// Links come back in rank order. Dropping a link mid-round surfaces as
/// `RankLost` on the hub side; dropping the hub surfaces as
/// `CoordinatorLost` on every link.
pub fn connect<T, U>(pool: usize) -> Result<(Hub<T, U>, Vec<Link<T, U>>)> {
    if pool == 0 {
        return Err(Error::EmptyPool);
    }
    let mut from = Vec::with_capacity(pool);
    let mut to = Vec::with_capacity(pool);
    let mut links = Vec::with_capacity(pool);
    for rank in 0..pool {
        let (report_tx, report_rx) = mpsc::channel();
        let (assign_tx, assign_rx) = mpsc::channel();
        from.push(report_rx);
        to.push(assign_tx);
        links.push(Link {
            rank,
            pool,
            tx: report_tx,
            rx: assign_rx,
        });
    }
    Ok((Hub { from, to }, links))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_assigns_ranks_in_order() {
        let (hub, links) = connect::<i32, f32>(3).unwrap();
        assert_eq!(hub.pool(), 3);
        let ranks: Vec<_> = links.iter().map(|link| link.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
        assert!(links.iter().all(|link| link.pool() == 3));
    }

    #[test]
    fn test_connect_rejects_empty_pool() {
        assert!(matches!(connect::<i32, f32>(0), Err(Error::EmptyPool)));
    }

    #[test]
    fn test_dropped_link_is_reported_lost() {
        let (hub, mut links) = connect::<i32, f32>(2).unwrap();
        links.remove(1);
        assert!(matches!(
            hub.recv_from(1),
            Err(Error::RankLost { rank: 1 })
        ));
        assert!(matches!(
            hub.send_to(1, Assign::Share(0)),
            Err(Error::RankLost { rank: 1 })
        ));
    }

    #[test]
    fn test_dropped_hub_is_reported_lost() {
        let (hub, links) = connect::<i32, f32>(1).unwrap();
        drop(hub);
        assert!(matches!(
            links[0].send(Report::Count(2)),
            Err(Error::CoordinatorLost)
        ));
        assert!(matches!(links[0].recv(), Err(Error::CoordinatorLost)));
    }
}
