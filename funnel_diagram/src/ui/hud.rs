//! HUD overlay: funnel totals, delivery rate, ingest and FPS counters.

use std::collections::VecDeque;

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::data::{pct, FunnelStats, HierarchySnapshot};
use crate::diagram::Selection;
use crate::ui::{ensure_egui, format_count};

const RATE_WINDOW: usize = 10;

/// Live HUD state updated each time a snapshot is ingested.
#[derive(Resource, Default)]
pub struct HudState {
    pub totals: FunnelStats,
    pub snapshots_ingested: u64,
    pub avg_delivery_rate: f64,
    rate_buffer: VecDeque<f64>,
}

impl HudState {
    pub fn update_from_snapshot(&mut self, snapshot: &HierarchySnapshot) {
        self.totals = snapshot.totals;
        self.snapshots_ingested += 1;

        self.rate_buffer
            .push_back(pct(snapshot.totals.delivered, snapshot.totals.sent));
        if self.rate_buffer.len() > RATE_WINDOW {
            self.rate_buffer.pop_front();
        }
        self.avg_delivery_rate =
            self.rate_buffer.iter().sum::<f64>() / self.rate_buffer.len() as f64;
    }
}

pub fn hud_plugin(app: &mut App) {
    ensure_egui(app);
    app.add_plugins(FrameTimeDiagnosticsPlugin)
        .init_resource::<HudState>()
        .add_systems(Update, hud_overlay_system);
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    hud: Res<HudState>,
    selection: Res<Selection>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    let delivery = pct(hud.totals.delivered, hud.totals.sent);

    egui::Window::new("Funnel")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.label(
                egui::RichText::new("Outreach funnel")
                    .size(16.0)
                    .color(egui::Color32::from_rgb(150, 140, 240)),
            );
            ui.add_space(4.0);

            ui.label(format!("Sent {}", format_count(hud.totals.sent)));
            ui.add(
                egui::ProgressBar::new((delivery / 100.0) as f32)
                    .text(format!("{delivery:.1}% delivered"))
                    .fill(egui::Color32::from_rgb(80, 180, 140)),
            );
            ui.add_space(4.0);

            ui.label(format!("Opened  {}", format_count(hud.totals.opened)));
            ui.label(format!("Clicked {}", format_count(hud.totals.clicked)));
            ui.add_space(4.0);

            ui.separator();
            ui.label(format!("Scope {}", selection.label()));
            ui.label(format!("Snapshots  {}", hud.snapshots_ingested));
            ui.label(format!("FPS  {fps:.0}"));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(sent: u64, delivered: u64) -> HierarchySnapshot {
        HierarchySnapshot {
            totals: FunnelStats {
                sent,
                delivered,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn hud_tracks_latest_totals_and_ingest_count() {
        let mut hud = HudState::default();
        hud.update_from_snapshot(&snapshot_with(100, 80));
        hud.update_from_snapshot(&snapshot_with(200, 150));

        assert_eq!(hud.totals.sent, 200);
        assert_eq!(hud.snapshots_ingested, 2);
    }

    #[test]
    fn delivery_rate_averages_a_rolling_window() {
        let mut hud = HudState::default();
        hud.update_from_snapshot(&snapshot_with(100, 100));
        hud.update_from_snapshot(&snapshot_with(100, 50));

        assert_eq!(hud.avg_delivery_rate, 75.0);

        // Only the most recent RATE_WINDOW entries contribute.
        for _ in 0..RATE_WINDOW {
            hud.update_from_snapshot(&snapshot_with(100, 60));
        }
        assert_eq!(hud.avg_delivery_rate, 60.0);
    }

    #[test]
    fn zero_sends_keep_the_rate_finite() {
        let mut hud = HudState::default();
        hud.update_from_snapshot(&snapshot_with(0, 0));

        assert_eq!(hud.avg_delivery_rate, 0.0);
        assert!(hud.avg_delivery_rate.is_finite());
    }
}
