//! Light/dark palettes and the color ramp helpers the diagram paints with.

use bevy::prelude::*;

use crate::data::{BranchKind, ResultKind};

/// Light/dark flag accepted from the host; everything else about theming is
/// derived here.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn flipped(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn background(&self) -> Color {
        match self {
            Theme::Dark => Color::srgb(0.05, 0.05, 0.08),
            Theme::Light => Color::srgb(0.94, 0.95, 0.97),
        }
    }

    pub fn root_color(&self) -> Color {
        match self {
            Theme::Dark => Color::srgb(0.62, 0.55, 0.98),
            Theme::Light => Color::srgb(0.42, 0.35, 0.85),
        }
    }

    pub fn branch_color(&self, kind: BranchKind) -> Color {
        match (self, kind) {
            (Theme::Dark, BranchKind::Initial) => Color::srgb(0.30, 0.62, 1.00),
            (Theme::Dark, BranchKind::Followup) => Color::srgb(0.72, 0.45, 1.00),
            (Theme::Dark, BranchKind::Manual) => Color::srgb(0.22, 0.82, 0.70),
            (Theme::Dark, BranchKind::Conditional) => Color::srgb(1.00, 0.72, 0.25),
            (Theme::Light, BranchKind::Initial) => Color::srgb(0.12, 0.45, 0.88),
            (Theme::Light, BranchKind::Followup) => Color::srgb(0.55, 0.28, 0.85),
            (Theme::Light, BranchKind::Manual) => Color::srgb(0.05, 0.60, 0.50),
            (Theme::Light, BranchKind::Conditional) => Color::srgb(0.85, 0.55, 0.08),
        }
    }

    pub fn result_color(&self, kind: ResultKind) -> Color {
        match (self, kind) {
            (Theme::Dark, ResultKind::Delivered) => Color::srgb(0.30, 0.85, 0.45),
            (Theme::Dark, ResultKind::Pending) => Color::srgb(1.00, 0.60, 0.20),
            (Theme::Dark, ResultKind::Failed) => Color::srgb(0.95, 0.30, 0.32),
            (Theme::Light, ResultKind::Delivered) => Color::srgb(0.10, 0.62, 0.28),
            (Theme::Light, ResultKind::Pending) => Color::srgb(0.88, 0.45, 0.05),
            (Theme::Light, ResultKind::Failed) => Color::srgb(0.78, 0.12, 0.15),
        }
    }

    /// Mid tint of an orb's radial fill: the node color receding toward the
    /// background.
    pub fn node_tint(&self, base: Color) -> Color {
        lerp_color(base, self.background(), 0.55)
    }

    /// Bright inner glow at an orb's core.
    pub fn core_glow(&self, base: Color) -> Color {
        let toward = match self {
            Theme::Dark => Color::WHITE,
            Theme::Light => Color::srgb(1.0, 1.0, 0.96),
        };
        lerp_color(base, toward, 0.6)
    }

    pub fn value_text_color(&self) -> Color {
        match self {
            Theme::Dark => Color::srgb(0.93, 0.95, 0.99),
            Theme::Light => Color::srgb(0.10, 0.12, 0.18),
        }
    }

    pub fn label_color(&self) -> Color {
        match self {
            Theme::Dark => Color::srgba(0.72, 0.78, 0.88, 0.85),
            Theme::Light => Color::srgba(0.25, 0.28, 0.35, 0.85),
        }
    }
}

/// Linear interpolation in sRGB, the same ramp the connection curves use.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let a = a.to_srgba();
    let b = b.to_srgba();
    Color::srgba(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
        a.alpha + (b.alpha - a.alpha) * t,
    )
}

/// Flips the palette with `T`.
pub fn theme_toggle_system(keys: Res<ButtonInput<KeyCode>>, mut theme: ResMut<Theme>) {
    if keys.just_pressed(KeyCode::KeyT) {
        let next = theme.flipped();
        *theme = next;
    }
}

/// Keeps the clear color in step with the active palette.
pub fn apply_clear_color_system(theme: Res<Theme>, mut clear: ResMut<ClearColor>) {
    if theme.is_changed() {
        clear.0 = theme.background();
    }
}
