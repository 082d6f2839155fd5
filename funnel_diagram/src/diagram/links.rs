//! Connection curves: two-pass glow strokes from the root to each branch
//! and from the selected branch to its outcome orbs, using Bevy Gizmos.

use bevy::prelude::*;

use crate::data::BranchKind;
use crate::diagram::interaction::Selection;
use crate::diagram::layout::{screen_to_world, DiagramLayout, NodeId};
use crate::diagram::particles::{branch_curve, quadratic_bezier, result_curve};
use crate::diagram::theme::{lerp_color, Theme};
use crate::diagram::{CurrentSnapshot, ViewportSize};

const SEGMENTS: usize = 24;
const SOLID_WIDTH: f32 = 3.0;
const GLOW_WIDTH: f32 = 8.0;
const GLOW_ALPHA: f32 = 0.2;

// Curves sit below particles and orbs; the glow pass sits below the solid.
const GLOW_Z: f32 = -0.2;
const SOLID_Z: f32 = -0.1;

/// Wide low-alpha pass stroked beneath the solid line.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct GlowPass;

/// Controls connection curve visibility. Toggled with `G`.
#[derive(Resource)]
pub struct LinkSettings {
    pub enabled: bool,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

pub fn link_plugin(app: &mut App) {
    app.init_resource::<LinkSettings>()
        .init_gizmo_group::<GlowPass>()
        .add_systems(Startup, configure_link_gizmos)
        .add_systems(
            Update,
            (
                toggle_links_system,
                draw_links_system.run_if(resource_exists::<CurrentSnapshot>),
            ),
        );
}

fn configure_link_gizmos(mut store: ResMut<GizmoConfigStore>) {
    let (solid, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    solid.line_width = SOLID_WIDTH;
    let (glow, _) = store.config_mut::<GlowPass>();
    glow.line_width = GLOW_WIDTH;
}

fn toggle_links_system(keys: Res<ButtonInput<KeyCode>>, mut settings: ResMut<LinkSettings>) {
    if keys.just_pressed(KeyCode::KeyG) {
        settings.enabled = !settings.enabled;
    }
}

fn draw_links_system(
    mut solid: Gizmos,
    mut glow: Gizmos<GlowPass>,
    settings: Res<LinkSettings>,
    viewport: Res<ViewportSize>,
    layout: Res<DiagramLayout>,
    selection: Res<Selection>,
    theme: Res<Theme>,
) {
    if !settings.enabled || viewport.is_zero() {
        return;
    }

    for branch in BranchKind::ALL {
        let curve = branch_curve(&layout, branch);
        stroke_curve(
            &mut solid,
            &mut glow,
            curve,
            theme.root_color(),
            theme.branch_color(branch),
            &viewport,
        );
    }

    let Some(selected) = selection.branch() else {
        return;
    };
    let branch_geom = *layout.branch_geom(selected);
    for result in &layout.results {
        let NodeId::Result(kind) = result.id else {
            continue;
        };
        let curve = result_curve(&branch_geom, result);
        stroke_curve(
            &mut solid,
            &mut glow,
            curve,
            theme.branch_color(selected),
            theme.result_color(kind),
            &viewport,
        );
    }
}

/// Sample the curve into line segments with the color lerped from `from`
/// at the source node to `to` at the target, glow pass underneath.
fn stroke_curve(
    solid: &mut Gizmos,
    glow: &mut Gizmos<GlowPass>,
    (start, control, end): (Vec2, Vec2, Vec2),
    from: Color,
    to: Color,
    viewport: &ViewportSize,
) {
    let mut prev = screen_to_world(start, viewport);
    for s in 1..=SEGMENTS {
        let t = s as f32 / SEGMENTS as f32;
        let point = screen_to_world(quadratic_bezier(start, control, end, t), viewport);
        let color = lerp_color(from, to, t);

        glow.line(
            prev.extend(GLOW_Z),
            point.extend(GLOW_Z),
            color.with_alpha(GLOW_ALPHA),
        );
        solid.line(prev.extend(SOLID_Z), point.extend(SOLID_Z), color);
        prev = point;
    }
}
