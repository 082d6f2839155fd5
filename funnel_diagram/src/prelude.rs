//! Minimal prelude for SDK consumers.

pub use crate::config::{record_path, source_config, theme_config};
pub use crate::data::{
    BranchKind, FunnelStats, HierarchySnapshot, ResultKind, SnapshotChannel, SourceConfig,
    SourceKind,
};
pub use crate::diagram::{Selection, Theme};
pub use crate::render::{GlowOrbArtist, NodeArtist};
pub use crate::sdk::FunnelExplorerBuilder;
