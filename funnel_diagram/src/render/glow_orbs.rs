//! Default node painter: concentric glow rings, a layered radial fill,
//! a hover-reactive border, the value centered, and a label underneath.

use bevy::prelude::*;

use crate::diagram::{lerp_color, screen_to_world, Theme, ViewportSize};
use crate::render::{HoverOnly, NodeArtist, NodeOrb, OrbSpec};

const ORB_Z: f32 = 10.0;

#[derive(Clone, Debug)]
pub struct OrbSettings {
    pub glow_rings: usize,
    pub ring_step: f32,
    pub ring_alpha: f32,
    pub tint_ratio: f32,
    pub core_ratio: f32,
    pub border_width: f32,
    pub border_width_hover: f32,
    pub hover_halo_ratio: f32,
    pub hover_halo_alpha: f32,
    pub dim_alpha: f32,
}

#[derive(Clone, Debug)]
pub struct LabelSettings {
    pub value_font_size: f32,
    pub label_font_size: f32,
    pub label_gap: f32,
}

#[derive(Clone, Debug)]
pub struct GlowOrbSettings {
    pub orb: OrbSettings,
    pub label: LabelSettings,
}

impl Default for GlowOrbSettings {
    fn default() -> Self {
        Self {
            orb: OrbSettings {
                glow_rings: 4,
                ring_step: 0.16,
                ring_alpha: 0.06,
                tint_ratio: 0.78,
                core_ratio: 0.45,
                border_width: 2.0,
                border_width_hover: 3.0,
                hover_halo_ratio: 1.35,
                hover_halo_alpha: 0.12,
                dim_alpha: 0.4,
            },
            label: LabelSettings {
                value_font_size: 20.0,
                label_font_size: 13.0,
                label_gap: 16.0,
            },
        }
    }
}

#[derive(Default)]
pub struct GlowOrbArtist {
    pub settings: GlowOrbSettings,
}

impl NodeArtist for GlowOrbArtist {
    fn spawn_node(
        &self,
        commands: &mut Commands,
        meshes: &mut ResMut<Assets<Mesh>>,
        materials: &mut ResMut<Assets<ColorMaterial>>,
        spec: &OrbSpec,
        theme: &Theme,
        viewport: &ViewportSize,
    ) {
        let orb = &self.settings.orb;
        let text = &self.settings.label;
        let r = spec.geom.radius;
        let alpha = if spec.dimmed { orb.dim_alpha } else { 1.0 };
        let world = screen_to_world(spec.geom.center(), viewport);
        let border_color = lerp_color(spec.color, Color::WHITE, 0.25);

        commands
            .spawn((
                NodeOrb { id: spec.geom.id },
                Transform::from_xyz(world.x, world.y, ORB_Z),
                Visibility::Visible,
            ))
            .with_children(|parent| {
                // Concentric glow rings, widening outward.
                for i in 0..orb.glow_rings {
                    let ring_radius = r * (1.0 + orb.ring_step * (i + 1) as f32);
                    parent.spawn((
                        Mesh2d(meshes.add(Circle::new(ring_radius))),
                        MeshMaterial2d(materials.add(fade(spec.color, orb.ring_alpha * alpha))),
                        Transform::from_xyz(0.0, 0.0, -0.5 + 0.01 * i as f32),
                    ));
                }

                // Layered radial fill: primary at the rim, background tint
                // in the body, bright glow at the core.
                parent.spawn((
                    Mesh2d(meshes.add(Circle::new(r))),
                    MeshMaterial2d(materials.add(fade(spec.color, alpha))),
                    Transform::from_xyz(0.0, 0.0, 0.0),
                ));
                parent.spawn((
                    Mesh2d(meshes.add(Circle::new(r * orb.tint_ratio))),
                    MeshMaterial2d(materials.add(fade(theme.node_tint(spec.color), alpha))),
                    Transform::from_xyz(0.0, 0.0, 0.05),
                ));
                parent.spawn((
                    Mesh2d(meshes.add(Circle::new(r * orb.core_ratio))),
                    MeshMaterial2d(materials.add(fade(theme.core_glow(spec.color), alpha))),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));

                // Resting border.
                parent.spawn((
                    Mesh2d(meshes.add(Annulus::new(r, r + orb.border_width))),
                    MeshMaterial2d(materials.add(fade(border_color, alpha))),
                    Transform::from_xyz(0.0, 0.0, 0.2),
                ));

                // Hover-only: wider border plus the shadow-blur halo.
                parent.spawn((
                    HoverOnly,
                    Mesh2d(meshes.add(Annulus::new(r, r + orb.border_width_hover))),
                    MeshMaterial2d(materials.add(fade(border_color, alpha))),
                    Transform::from_xyz(0.0, 0.0, 0.25),
                    Visibility::Hidden,
                ));
                parent.spawn((
                    HoverOnly,
                    Mesh2d(meshes.add(Circle::new(r * orb.hover_halo_ratio))),
                    MeshMaterial2d(materials.add(fade(spec.color, orb.hover_halo_alpha * alpha))),
                    Transform::from_xyz(0.0, 0.0, -0.6),
                    Visibility::Hidden,
                ));

                // Value centered in the orb, label underneath.
                parent.spawn((
                    Text2d::new(spec.value.to_string()),
                    TextFont {
                        font_size: text.value_font_size,
                        ..default()
                    },
                    TextColor(fade(theme.value_text_color(), alpha)),
                    TextLayout::new_with_justify(JustifyText::Center),
                    Transform::from_xyz(0.0, 0.0, 0.5),
                ));
                parent.spawn((
                    Text2d::new(spec.label),
                    TextFont {
                        font_size: text.label_font_size,
                        ..default()
                    },
                    TextColor(fade(theme.label_color(), alpha)),
                    TextLayout::new_with_justify(JustifyText::Center),
                    Transform::from_xyz(0.0, -(r + text.label_gap), 0.5),
                ));
            });
    }
}

fn fade(color: Color, alpha: f32) -> Color {
    let srgba = color.to_srgba();
    color.with_alpha(srgba.alpha * alpha)
}
