//! Diagram engine: resources, snapshot ingest, and the frame pipeline.

pub(crate) mod interaction;
pub(crate) mod layout;
pub(crate) mod links;
pub(crate) mod particles;
pub(crate) mod theme;

use bevy::prelude::*;

use crate::data::{FunnelStats, HierarchySnapshot, RecordBuffer, SnapshotChannel};
use crate::render::{
    hover_highlight_system, ArtistResource, GlowOrbArtist, NodeOrb, OrbSpec,
};
use crate::ui::HudState;

pub use interaction::{
    apply_click, clear_selection_system, click_system, hit_test, pointer_move_system, Hover,
    PointerGuard, Selection, HIT_PADDING,
};
pub use layout::{
    layout_system, screen_to_world, DiagramLayout, NodeGeom, NodeId, NodeRegistry, BRANCH_RADIUS,
    RESULT_RADIUS, ROOT_RADIUS,
};
pub use links::{link_plugin, GlowPass, LinkSettings};
pub use particles::{
    advance_particles_system, branch_curve, quadratic_bezier, respawn_particles_system,
    result_curve, sync_particles_system, FlowParticle, ParticleRng, ParticleSettings,
    PARTICLES_PER_BRANCH,
};
pub use theme::{lerp_color, theme_toggle_system, Theme};

use particles::{recolor_particles_system, toggle_particles_system};
use theme::apply_clear_color_system;

/// Logical viewport size, refreshed from the primary window each frame.
/// Zero until a window reports in; render systems treat zero as a detached
/// surface and skip the tick.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn is_zero(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Latest snapshot, swapped whole between ticks by ingest. Change detection
/// on this resource is the "snapshot identity changed" signal downstream.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct CurrentSnapshot(pub HierarchySnapshot);

impl CurrentSnapshot {
    /// Counters scoped to the current selection: branch stats when drilled
    /// in, funnel totals otherwise.
    pub fn scoped(&self, selection: Selection) -> FunnelStats {
        match selection.branch() {
            None => self.0.totals,
            Some(kind) => self.0.branch(kind),
        }
    }

    /// The number a node displays. Outcome orbs read the selected branch
    /// and show 0 when no branch is drilled in (they are not rendered then).
    pub fn node_value(&self, id: NodeId, selection: Selection) -> u64 {
        match id {
            NodeId::Root => self.0.totals.sent,
            NodeId::Branch(kind) => self.0.branch(kind).sent,
            NodeId::Result(kind) => selection
                .branch()
                .map(|branch| self.0.branch(branch).result_value(kind))
                .unwrap_or(0),
        }
    }
}

/// Camera plus the per-view diagram state. Every piece of engine state is
/// owned by the app instance; nothing here is process-global, so multiple
/// diagrams can coexist and tear down independently.
pub fn setup_scene(mut commands: Commands) {
    commands.insert_resource(ViewportSize::default());
    commands.insert_resource(NodeRegistry::default());
    commands.insert_resource(DiagramLayout::default());
    commands.spawn(Camera2d);
}

/// Drain the source channel, keeping only the newest snapshot. The swap is
/// whole-value between ticks, never a partial update mid-frame.
pub fn ingest_snapshots(
    mut commands: Commands,
    channel: Res<SnapshotChannel>,
    mut hud: Option<ResMut<HudState>>,
    mut record: Option<ResMut<RecordBuffer>>,
) {
    let mut latest = None;
    while let Ok(snapshot) = channel.0.try_recv() {
        if let Some(hud) = hud.as_mut() {
            hud.update_from_snapshot(&snapshot);
        }
        if let Some(record) = record.as_mut() {
            record.snapshots.push(snapshot.clone());
        }
        latest = Some(snapshot);
    }

    if let Some(snapshot) = latest {
        commands.insert_resource(CurrentSnapshot(snapshot));
    }
}

pub fn update_viewport_system(windows: Query<&Window>, mut viewport: ResMut<ViewportSize>) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    viewport.set_if_neq(ViewportSize {
        width: window.width(),
        height: window.height(),
    });
}

/// Rebuild the retained node visuals when layout, snapshot, or palette
/// changed. The hit-test registry is refreshed every frame regardless.
pub fn sync_nodes_system(
    mut commands: Commands,
    artist: Res<ArtistResource>,
    layout: Res<DiagramLayout>,
    selection: Res<Selection>,
    snapshot: Res<CurrentSnapshot>,
    theme: Res<Theme>,
    viewport: Res<ViewportSize>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    existing: Query<Entity, With<NodeOrb>>,
) {
    if !(layout.is_changed() || snapshot.is_changed() || theme.is_changed()) {
        return;
    }
    if viewport.is_zero() {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    for geom in layout.nodes() {
        let color = match geom.id {
            NodeId::Root => theme.root_color(),
            NodeId::Branch(kind) => theme.branch_color(kind),
            NodeId::Result(kind) => theme.result_color(kind),
        };
        let dimmed = match geom.id {
            NodeId::Branch(kind) => selection.branch().is_some_and(|selected| selected != kind),
            _ => false,
        };

        let spec = OrbSpec {
            geom: *geom,
            value: snapshot.node_value(geom.id, *selection),
            label: geom.id.label(),
            color,
            dimmed,
        };
        artist
            .0
            .spawn_node(&mut commands, &mut meshes, &mut materials, &spec, &theme, &viewport);
    }
}

/// Flush any record buffer to disk when the app exits.
pub fn flush_record_system(mut exits: EventReader<AppExit>, record: Option<Res<RecordBuffer>>) {
    if exits.read().next().is_none() {
        return;
    }
    if let Some(record) = record {
        record.flush();
    }
}

/// Engine plugin: one frame task per tick — ingest, advance, layout,
/// paint, then pointer input against the registry written this frame.
pub fn diagram_plugin(app: &mut App) {
    if !app.world().contains_resource::<ArtistResource>() {
        app.insert_resource(ArtistResource::new(GlowOrbArtist::default()));
    }

    app.init_resource::<Selection>()
        .init_resource::<Hover>()
        .init_resource::<PointerGuard>()
        .init_resource::<Theme>()
        .init_resource::<ClearColor>()
        .init_resource::<ParticleRng>()
        .init_resource::<ParticleSettings>()
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                ingest_snapshots,
                update_viewport_system,
                advance_particles_system,
                layout_system,
                (sync_nodes_system, respawn_particles_system)
                    .run_if(resource_exists::<CurrentSnapshot>),
                (sync_particles_system, recolor_particles_system),
                hover_highlight_system,
                (pointer_move_system, click_system, clear_selection_system),
                (
                    toggle_particles_system,
                    theme_toggle_system,
                    apply_clear_color_system,
                ),
            )
                .chain(),
        )
        .add_systems(Last, flush_record_system);
}
