//! Flow particles: continuous root→branch streams along quadratic curves.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::BranchKind;
use crate::diagram::layout::{screen_to_world, DiagramLayout, NodeGeom};
use crate::diagram::theme::Theme;
use crate::diagram::{CurrentSnapshot, ViewportSize};

pub const PARTICLES_PER_BRANCH: usize = 5;
const SPEED_MIN: f32 = 0.002;
const SPEED_MAX: f32 = 0.005;
const SIZE_MIN: f32 = 2.0;
const SIZE_MAX: f32 = 4.0;

/// Upward lift of the quadratic control point above the segment midpoint.
pub(crate) const ARC_RISE: f32 = 60.0;

const HALO_SCALE: f32 = 2.4;
const HALO_ALPHA: f32 = 0.25;
const PARTICLE_Z: f32 = 5.0;

/// One flow indicator. Progress wraps in [0, 1); the curve is re-derived
/// from the live layout every frame, so resizes shift particles in place
/// without resetting phase or speed.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct FlowParticle {
    pub branch: BranchKind,
    pub progress: f32,
    pub speed: f32,
    pub size: f32,
}

impl FlowParticle {
    /// Draw phase, speed, and size for one particle of `branch`. Per-particle
    /// randomization keeps the stream from pulsing synchronously.
    pub fn sample(branch: BranchKind, rng: &mut impl Rng) -> Self {
        Self {
            branch,
            progress: rng.gen_range(0.0..1.0),
            speed: rng.gen_range(SPEED_MIN..SPEED_MAX),
            size: rng.gen_range(SIZE_MIN..SIZE_MAX),
        }
    }

    /// Advance by `dt_frames` 60 Hz ticks, wrapping to 0 the tick the
    /// progress would reach 1.
    pub fn advance(&mut self, dt_frames: f32) {
        self.progress += self.speed * dt_frames;
        if self.progress >= 1.0 {
            self.progress = 0.0;
        }
    }
}

/// Standard quadratic Bezier.
pub fn quadratic_bezier(p0: Vec2, control: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    u * u * p0 + 2.0 * u * t * control + t * t * p1
}

/// Root→branch curve in screen space: endpoints at the node centers, the
/// control point lifted above the midpoint for a gentle arc. Connection
/// strokes and particles share this exact curve.
pub fn branch_curve(layout: &DiagramLayout, branch: BranchKind) -> (Vec2, Vec2, Vec2) {
    let start = layout.root.center();
    let end = layout.branch_geom(branch).center();
    let control = (start + end) * 0.5 - Vec2::new(0.0, ARC_RISE);
    (start, control, end)
}

/// Branch→result curve for the outcome orbs of the selected branch.
pub fn result_curve(branch: &NodeGeom, result: &NodeGeom) -> (Vec2, Vec2, Vec2) {
    let start = branch.center();
    let end = result.center();
    let control = (start + end) * 0.5 - Vec2::new(0.0, ARC_RISE * 0.5);
    (start, control, end)
}

/// Injectable randomness for particle draws. Reseedable so tests and the
/// config layer get reproducible streams.
#[derive(Resource)]
pub struct ParticleRng(pub StdRng);

impl Default for ParticleRng {
    fn default() -> Self {
        Self(StdRng::seed_from_u64(0))
    }
}

/// Controls particle visibility. Toggled with `P`.
#[derive(Resource)]
pub struct ParticleSettings {
    pub enabled: bool,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Replace the whole particle population when a new snapshot arrives.
/// Between snapshots the entities stay alive, which is what preserves phase
/// across resizes and selection changes.
pub fn respawn_particles_system(
    mut commands: Commands,
    snapshot: Res<CurrentSnapshot>,
    theme: Res<Theme>,
    mut rng: ResMut<ParticleRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    existing: Query<Entity, With<FlowParticle>>,
) {
    if !snapshot.is_changed() {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    for branch in BranchKind::ALL {
        let color = theme.branch_color(branch);
        for _ in 0..PARTICLES_PER_BRANCH {
            let particle = FlowParticle::sample(branch, &mut rng.0);
            let core = meshes.add(Circle::new(particle.size));
            let halo = meshes.add(Circle::new(particle.size * HALO_SCALE));

            commands
                .spawn((
                    particle,
                    Mesh2d(core),
                    MeshMaterial2d(materials.add(color)),
                    Transform::from_xyz(0.0, 0.0, PARTICLE_Z),
                    Visibility::Hidden,
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Mesh2d(halo),
                        MeshMaterial2d(materials.add(color.with_alpha(HALO_ALPHA))),
                        Transform::from_xyz(0.0, 0.0, -0.1),
                    ));
                });
        }
    }
}

/// Advance every particle along its phase. Runs off wall-clock delta
/// normalized to 60 Hz ticks, so per-tick speeds stay meaningful at any
/// refresh rate.
pub fn advance_particles_system(
    time: Res<Time>,
    settings: Res<ParticleSettings>,
    mut particles: Query<&mut FlowParticle>,
) {
    if !settings.enabled {
        return;
    }

    let dt_frames = time.delta_secs() * 60.0;
    for mut particle in &mut particles {
        particle.advance(dt_frames);
    }
}

/// Evaluate each particle's curve position against the current layout and
/// move its entity there. Positions are re-derived in place; nothing here
/// resets phase.
pub fn sync_particles_system(
    settings: Res<ParticleSettings>,
    viewport: Res<ViewportSize>,
    layout: Res<DiagramLayout>,
    mut particles: Query<(&FlowParticle, &mut Transform, &mut Visibility)>,
) {
    if viewport.is_zero() {
        return;
    }

    for (particle, mut transform, mut visibility) in &mut particles {
        let (start, control, end) = branch_curve(&layout, particle.branch);
        let screen = quadratic_bezier(start, control, end, particle.progress);
        let world = screen_to_world(screen, &viewport);
        transform.translation.x = world.x;
        transform.translation.y = world.y;

        *visibility = if settings.enabled {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

pub fn toggle_particles_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<ParticleSettings>,
) {
    if keys.just_pressed(KeyCode::KeyP) {
        settings.enabled = !settings.enabled;
    }
}

/// Repaint particle materials when the palette flips. Not a respawn: phase
/// and speed survive theme changes.
pub fn recolor_particles_system(
    theme: Res<Theme>,
    particles: Query<(&FlowParticle, &MeshMaterial2d<ColorMaterial>, &Children)>,
    halos: Query<&MeshMaterial2d<ColorMaterial>, Without<FlowParticle>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    if !theme.is_changed() {
        return;
    }

    for (particle, material, children) in &particles {
        let color = theme.branch_color(particle.branch);
        if let Some(core) = materials.get_mut(&material.0) {
            core.color = color;
        }
        for child in children {
            if let Ok(halo) = halos.get(*child) {
                if let Some(halo) = materials.get_mut(&halo.0) {
                    halo.color = color.with_alpha(HALO_ALPHA);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::interaction::Selection;

    #[test]
    fn progress_stays_in_unit_interval() {
        let mut particle = FlowParticle {
            branch: BranchKind::Initial,
            progress: 0.0,
            speed: SPEED_MAX,
            size: 3.0,
        };

        for _ in 0..10_000 {
            particle.advance(1.0);
            assert!(particle.progress >= 0.0);
            assert!(particle.progress < 1.0);
        }
    }

    #[test]
    fn progress_wraps_to_exactly_zero() {
        let mut particle = FlowParticle {
            branch: BranchKind::Manual,
            progress: 0.999,
            speed: 0.005,
            size: 2.0,
        };

        particle.advance(1.0);
        assert_eq!(particle.progress, 0.0);
    }

    #[test]
    fn sampling_is_deterministic_for_a_seed() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);

        for _ in 0..PARTICLES_PER_BRANCH {
            assert_eq!(
                FlowParticle::sample(BranchKind::Followup, &mut a),
                FlowParticle::sample(BranchKind::Followup, &mut b)
            );
        }
    }

    #[test]
    fn sampled_particles_land_in_spec_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let particle = FlowParticle::sample(BranchKind::Conditional, &mut rng);
            assert!(particle.progress >= 0.0 && particle.progress < 1.0);
            assert!(particle.speed >= SPEED_MIN && particle.speed < SPEED_MAX);
            assert!(particle.size >= SIZE_MIN && particle.size < SIZE_MAX);
        }
    }

    #[test]
    fn bezier_hits_endpoints_and_arcs_upward() {
        let layout = DiagramLayout::compute(1280.0, 720.0, Selection::All);
        let (start, control, end) = branch_curve(&layout, BranchKind::Initial);

        assert_eq!(quadratic_bezier(start, control, end, 0.0), start);
        assert_eq!(quadratic_bezier(start, control, end, 1.0), end);

        // Screen coordinates grow downward, so the arc apex sits above the
        // straight-line midpoint.
        let midpoint = (start + end) * 0.5;
        let apex = quadratic_bezier(start, control, end, 0.5);
        assert!(apex.y < midpoint.y);
    }

    #[test]
    fn branch_curves_span_root_to_branch_centers() {
        let layout = DiagramLayout::compute(1000.0, 700.0, Selection::All);
        for branch in BranchKind::ALL {
            let (start, _, end) = branch_curve(&layout, branch);
            assert_eq!(start, layout.root.center());
            assert_eq!(end, layout.branch_geom(branch).center());
        }
    }
}
