//! Node artist trait and default implementation.

mod glow_orbs;

use bevy::prelude::*;

use crate::diagram::{Hover, NodeGeom, NodeId, Theme, ViewportSize};

pub use glow_orbs::{GlowOrbArtist, GlowOrbSettings, LabelSettings, OrbSettings};

/// Hover scale factor applied to an orb's visual root.
pub const HOVER_SCALE: f32 = 1.08;

/// Everything an artist needs to paint one node.
pub struct OrbSpec {
    pub geom: NodeGeom,
    pub value: u64,
    pub label: &'static str,
    pub color: Color,
    pub dimmed: bool,
}

pub trait NodeArtist: Send + Sync + 'static {
    fn setup(&self, _app: &mut App) {}
    fn spawn_node(
        &self,
        commands: &mut Commands,
        meshes: &mut ResMut<Assets<Mesh>>,
        materials: &mut ResMut<Assets<ColorMaterial>>,
        spec: &OrbSpec,
        theme: &Theme,
        viewport: &ViewportSize,
    );
}

#[derive(Resource)]
pub struct ArtistResource(pub Box<dyn NodeArtist>);

impl ArtistResource {
    pub fn new(artist: impl NodeArtist) -> Self {
        Self(Box::new(artist))
    }
}

/// Marker + identity on a node's visual root entity.
#[derive(Component)]
pub struct NodeOrb {
    pub id: NodeId,
}

/// Children shown only while their node is the hover target (the wider
/// border and the shadow-blur halo).
#[derive(Component)]
pub struct HoverOnly;

/// Scale and border/halo boost on the hover target. Also reapplies hover
/// state to freshly respawned orbs.
pub fn hover_highlight_system(
    hover: Res<Hover>,
    added: Query<Entity, Added<NodeOrb>>,
    mut orbs: Query<(&NodeOrb, &mut Transform, &Children)>,
    mut hover_children: Query<&mut Visibility, With<HoverOnly>>,
) {
    if !hover.is_changed() && added.is_empty() {
        return;
    }

    for (orb, mut transform, children) in &mut orbs {
        let hovered = hover.0 == Some(orb.id);
        transform.scale = Vec3::splat(if hovered { HOVER_SCALE } else { 1.0 });

        for child in children {
            if let Ok(mut visibility) = hover_children.get_mut(*child) {
                *visibility = if hovered {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}
