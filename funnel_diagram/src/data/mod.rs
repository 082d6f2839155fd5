mod channel;
mod model;
mod simulated;

use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::Receiver;

pub use channel::{init_fixture_channel, init_source_channel, RecordBuffer, SnapshotChannel};
pub use model::{pct, BranchKind, FunnelStats, HierarchySnapshot, ResultKind};
pub use simulated::{FunnelSim, SimulatedSource};

/// Configuration for spawning a snapshot source.
pub struct SourceConfig {
    pub kind: SourceKind,
    pub interval: Duration,
    pub seed: u64,
}

/// Which collaborator supplies aggregate snapshots.
pub enum SourceKind {
    Simulated,
    Fixture(PathBuf),
}

/// Interface for sources that feed snapshots to the diagram.
pub trait SnapshotSource: Send + 'static {
    fn spawn(config: SourceConfig) -> Receiver<HierarchySnapshot>;
}
