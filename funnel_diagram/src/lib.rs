//! Email funnel explorer — an outreach funnel rendered as a continuously
//! animated hierarchical flow diagram.
//!
//! Library root: data, diagram engine, render, UI, and config modules.

pub mod config;
pub mod data;
pub mod diagram;
pub mod render;
mod ui;

pub mod prelude;
pub mod sdk;

pub use data::{
    init_fixture_channel, init_source_channel, pct, BranchKind, FunnelStats, HierarchySnapshot,
    RecordBuffer, ResultKind, SimulatedSource, SnapshotChannel, SnapshotSource, SourceConfig,
    SourceKind,
};
pub use diagram::{
    apply_click, diagram_plugin, hit_test, ingest_snapshots, layout_system, link_plugin,
    setup_scene, sync_nodes_system, update_viewport_system, CurrentSnapshot, DiagramLayout, Hover,
    NodeGeom, NodeId, NodeRegistry, ParticleRng, ParticleSettings, Selection, Theme, ViewportSize,
};
pub use render::{ArtistResource, GlowOrbArtist, NodeArtist};
pub use ui::{hud_plugin, summary_plugin, HudState};
