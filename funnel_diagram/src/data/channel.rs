use std::path::{Path, PathBuf};
use std::time::Duration;

use crossbeam_channel::Receiver;

use crate::data::model::HierarchySnapshot;
use crate::data::{SimulatedSource, SnapshotSource, SourceConfig, SourceKind};

/// Pacing between replayed fixture snapshots.
const REPLAY_INTERVAL: Duration = Duration::from_millis(500);

/// Bevy resource holding the channel from the snapshot source thread.
/// Systems drain this in ingest_snapshots.
#[derive(bevy::prelude::Resource)]
pub struct SnapshotChannel(pub Receiver<HierarchySnapshot>);

/// Spawn the configured source and wrap its receiver.
pub fn init_source_channel(config: SourceConfig) -> SnapshotChannel {
    match config.kind {
        SourceKind::Fixture(ref path) => init_fixture_channel(path),
        SourceKind::Simulated => SnapshotChannel(SimulatedSource::spawn(config)),
    }
}

/// Create a snapshot channel that replays pre-recorded snapshots from a JSON
/// fixture file, paced to simulate live aggregation updates.
pub fn init_fixture_channel(path: &Path) -> SnapshotChannel {
    let json = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    let snapshots: Vec<HierarchySnapshot> = serde_json::from_str(&json)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()));

    let (tx, rx) = crossbeam_channel::bounded(64);

    std::thread::spawn(move || {
        for snapshot in snapshots {
            if tx.send(snapshot).is_err() {
                return;
            }
            std::thread::sleep(REPLAY_INTERVAL);
        }
    });

    SnapshotChannel(rx)
}

/// Bevy resource that records ingested snapshots for later serialization to
/// a fixture file.
#[derive(bevy::prelude::Resource)]
pub struct RecordBuffer {
    pub snapshots: Vec<HierarchySnapshot>,
    pub path: PathBuf,
}

impl RecordBuffer {
    pub fn new(path: PathBuf) -> Self {
        Self {
            snapshots: Vec::new(),
            path,
        }
    }

    /// Serialize accumulated snapshots to the target path as JSON.
    pub fn flush(&self) {
        let json = serde_json::to_string_pretty(&self.snapshots)
            .expect("failed to serialize record buffer");
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(&self.path, json)
            .unwrap_or_else(|e| panic!("failed to write fixture to {}: {e}", self.path.display()));
        eprintln!(
            "cascade: recorded {} snapshots to {}",
            self.snapshots.len(),
            self.path.display()
        );
    }
}
