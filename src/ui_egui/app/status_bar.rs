//! Status bar showing the last interaction and the selected item.

use super::TimelineApp;
use egui::{Color32, RichText};

/// Status bar section separator
const SEPARATOR_WIDTH: f32 = 8.0;

/// Get theme-aware secondary text color
fn secondary_text_color(is_dark: bool) -> Color32 {
    if is_dark {
        Color32::from_gray(160)
    } else {
        Color32::from_gray(100)
    }
}

impl TimelineApp {
    /// Render the status bar at the bottom of the window
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let secondary = secondary_text_color(self.theme.is_dark);

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let selected = self
                        .selected
                        .as_deref()
                        .map(|id| self.item_title(id))
                        .unwrap_or_else(|| "Nothing selected".to_string());
                    ui.label(RichText::new(selected).small());

                    ui.add_space(SEPARATOR_WIDTH);
                    ui.separator();
                    ui.add_space(SEPARATOR_WIDTH);

                    ui.label(RichText::new(&self.status).small().color(secondary));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let hint = if self.selected.is_some() {
                            "Drag to move · drag an edge to resize"
                        } else {
                            "Click an item to select it"
                        };
                        ui.label(RichText::new(hint).small().color(secondary));
                    });
                });
            });
    }
}
