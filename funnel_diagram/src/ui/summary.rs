//! Scope summary side panel: derives the percentage displays from the
//! current (selection, snapshot) pair.
//!
//! Two denominators are in play on purpose: delivery outcomes are rated
//! against sends, engagement against deliveries.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::data::pct;
use crate::diagram::{CurrentSnapshot, Selection, Theme};
use crate::ui::{egui_color, ensure_egui, format_count};

pub fn summary_plugin(app: &mut App) {
    ensure_egui(app);
    app.add_systems(Update, summary_panel_system);
}

fn summary_panel_system(
    mut contexts: EguiContexts,
    snapshot: Option<Res<CurrentSnapshot>>,
    selection: Res<Selection>,
    theme: Res<Theme>,
) {
    let Some(snapshot) = snapshot else {
        return;
    };
    let stats = snapshot.scoped(*selection);

    let accent = match selection.branch() {
        Some(kind) => egui_color(theme.branch_color(kind)),
        None => egui_color(theme.root_color()),
    };

    egui::SidePanel::right("summary")
        .default_width(260.0)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 220))
                .inner_margin(egui::Margin::same(14)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.label(
                egui::RichText::new(selection.label())
                    .size(18.0)
                    .color(accent),
            );
            ui.add_space(8.0);

            ui.label(format!("Sent         {}", format_count(stats.sent)));
            ui.add_space(4.0);

            rate_row(ui, "Delivered", stats.delivered, stats.sent);
            rate_row(ui, "Pending", stats.pending_reschedule, stats.sent);
            rate_row(ui, "Failed", stats.failed, stats.sent);
            ui.add_space(4.0);

            ui.separator();
            ui.label(
                egui::RichText::new("of delivered")
                    .size(11.0)
                    .color(egui::Color32::from_rgb(120, 120, 140)),
            );
            rate_row(ui, "Opened", stats.opened, stats.delivered);
            rate_row(ui, "Clicked", stats.clicked, stats.delivered);
            ui.add_space(4.0);

            ui.separator();
            count_row(ui, "Soft bounce", stats.soft_bounce);
            count_row(ui, "Hard bounce", stats.hard_bounce);
            count_row(ui, "Blocked", stats.blocked);
            count_row(ui, "Spam", stats.spam);

            if selection.branch().is_some() {
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new("Esc to show all branches")
                        .size(11.0)
                        .color(egui::Color32::from_rgb(120, 120, 140)),
                );
            }
        });
}

fn rate_row(ui: &mut egui::Ui, label: &str, value: u64, base: u64) {
    ui.label(format!(
        "{label:<12} {:>7}  {:>5.1}%",
        format_count(value),
        pct(value, base)
    ));
}

fn count_row(ui: &mut egui::Ui, label: &str, value: u64) {
    ui.label(format!("{label:<12} {:>7}", format_count(value)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BranchKind, FunnelStats, HierarchySnapshot};

    #[test]
    fn scoped_stats_follow_the_selection() {
        let snapshot: HierarchySnapshot = serde_json::from_str(
            r#"{"totals":{"sent":100,"delivered":78},
                "byType":{"Initial":{"sent":40,"delivered":35}}}"#,
        )
        .unwrap();
        let current = CurrentSnapshot(snapshot);

        assert_eq!(current.scoped(Selection::All).sent, 100);

        let scoped = current.scoped(Selection::Branch(BranchKind::Initial));
        assert_eq!(scoped.sent, 40);
        assert_eq!(pct(scoped.delivered, scoped.sent), 87.5);
    }

    #[test]
    fn dual_denominators_use_sent_and_delivered() {
        let stats = FunnelStats {
            sent: 200,
            delivered: 100,
            opened: 50,
            clicked: 10,
            ..Default::default()
        };

        // Outcome rates against sends, engagement against deliveries.
        assert_eq!(pct(stats.delivered, stats.sent), 50.0);
        assert_eq!(pct(stats.opened, stats.delivered), 50.0);
        assert_eq!(pct(stats.clicked, stats.delivered), 10.0);
    }
}
