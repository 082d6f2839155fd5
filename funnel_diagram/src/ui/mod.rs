mod hud;
mod summary;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::diagram::PointerGuard;

pub use hud::{hud_plugin, HudState};
pub use summary::summary_plugin;

/// Add the egui plumbing exactly once, whichever panel plugin lands first.
fn ensure_egui(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, pointer_guard_system);
    }
}

/// Mirror egui's pointer capture into the engine-side guard so diagram
/// hit-testing stands down while the cursor is on a panel.
fn pointer_guard_system(mut contexts: EguiContexts, mut guard: ResMut<PointerGuard>) {
    guard.0 = contexts.ctx_mut().is_pointer_over_area();
}

/// Engine color → egui color for panel accents.
pub(crate) fn egui_color(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgb(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
    )
}

pub(crate) fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_scales_units() {
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(2_340_000), "2.34M");
    }
}
