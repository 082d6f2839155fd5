//! Simulated analytics source: seeded drifting funnel counters on a
//! dedicated thread. Stands in for the aggregation backend during
//! development and demos.

use std::collections::HashMap;
use std::thread;

use crossbeam_channel::{bounded, Receiver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::model::{BranchKind, FunnelStats, HierarchySnapshot};
use crate::data::{SnapshotSource, SourceConfig};

/// Relative send volume per branch, echoing a typical outreach mix.
const BRANCH_WEIGHTS: [(BranchKind, u64); 4] = [
    (BranchKind::Initial, 4),
    (BranchKind::Followup, 3),
    (BranchKind::Manual, 2),
    (BranchKind::Conditional, 1),
];

/// Deterministic funnel generator. Kept separate from the source thread so
/// tests can step it directly.
pub struct FunnelSim {
    rng: StdRng,
    branches: HashMap<BranchKind, FunnelStats>,
}

impl FunnelSim {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            branches: HashMap::new(),
        }
    }

    /// Advance every branch by one batch of sends and derive fresh totals.
    /// Counters only ever grow; a snapshot is a point-in-time aggregate.
    pub fn step(&mut self) -> HierarchySnapshot {
        for (kind, weight) in BRANCH_WEIGHTS {
            let batch = self.rng.gen_range(weight * 2..=weight * 6);
            let failures = self.rng.gen_range(0..=batch / 8);
            let delivered = batch - failures;
            let opened = self.rng.gen_range(delivered / 3..=delivered * 7 / 10);
            let clicked = self.rng.gen_range(opened / 8..=opened / 3 + 1);

            let stats = self.branches.entry(kind).or_default();
            stats.sent += batch;
            stats.delivered += delivered;
            stats.opened += opened;
            stats.clicked += clicked.min(opened);

            for _ in 0..failures {
                match self.rng.gen_range(0..6u8) {
                    0 => stats.pending_reschedule += 1,
                    1 => stats.soft_bounce += 1,
                    2 => stats.hard_bounce += 1,
                    3 => stats.blocked += 1,
                    4 => stats.spam += 1,
                    _ => stats.failed += 1,
                }
            }
        }

        let mut totals = FunnelStats::default();
        for stats in self.branches.values() {
            accumulate(&mut totals, stats);
        }

        HierarchySnapshot {
            totals,
            by_type: self.branches.clone(),
        }
    }
}

fn accumulate(into: &mut FunnelStats, from: &FunnelStats) {
    into.sent += from.sent;
    into.delivered += from.delivered;
    into.opened += from.opened;
    into.clicked += from.clicked;
    into.pending_reschedule += from.pending_reschedule;
    into.soft_bounce += from.soft_bounce;
    into.hard_bounce += from.hard_bounce;
    into.failed += from.failed;
    into.blocked += from.blocked;
    into.spam += from.spam;
}

/// Snapshot source backed by `FunnelSim`.
pub struct SimulatedSource;

impl SnapshotSource for SimulatedSource {
    fn spawn(config: SourceConfig) -> Receiver<HierarchySnapshot> {
        let (tx, rx) = bounded(64);
        thread::spawn(move || {
            let mut sim = FunnelSim::new(config.seed);
            loop {
                if tx.send(sim.step()).is_err() {
                    return;
                }
                thread::sleep(config.interval);
            }
        });
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_yields_identical_sequences() {
        let mut a = FunnelSim::new(7);
        let mut b = FunnelSim::new(7);

        for _ in 0..3 {
            assert_eq!(a.step(), b.step());
        }
    }

    #[test]
    fn totals_are_the_sum_of_branches() {
        let mut sim = FunnelSim::new(42);
        let snapshot = sim.step();

        let mut summed = FunnelStats::default();
        for kind in BranchKind::ALL {
            accumulate(&mut summed, &snapshot.branch(kind));
        }
        assert_eq!(snapshot.totals, summed);
    }

    #[test]
    fn counters_never_decrease() {
        let mut sim = FunnelSim::new(3);
        let first = sim.step();
        let second = sim.step();

        for kind in BranchKind::ALL {
            assert!(second.branch(kind).sent >= first.branch(kind).sent);
            assert!(second.branch(kind).delivered >= first.branch(kind).delivered);
        }
        assert!(second.totals.sent >= first.totals.sent);
    }

    #[test]
    fn delivered_never_exceeds_sent() {
        let mut sim = FunnelSim::new(11);
        for _ in 0..20 {
            let snapshot = sim.step();
            for kind in BranchKind::ALL {
                let stats = snapshot.branch(kind);
                assert!(stats.delivered <= stats.sent);
            }
        }
    }
}
