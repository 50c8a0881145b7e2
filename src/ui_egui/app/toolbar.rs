//! Toolbar with navigation and interaction settings.

use super::{TimelineApp, DAY};
use crate::models::settings::ResizeEdges;
use crate::ui_egui::gesture::GestureMemory;

const SNAP_CHOICES: [(i64, &str); 5] = [
    (0, "Off"),
    (60_000, "1 min"),
    (5 * 60_000, "5 min"),
    (15 * 60_000, "15 min"),
    (60 * 60_000, "1 hour"),
];

const RESIZE_CHOICES: [(ResizeEdges, &str); 4] = [
    (ResizeEdges::None, "No resize"),
    (ResizeEdges::Left, "Left edge"),
    (ResizeEdges::Right, "Right edge"),
    (ResizeEdges::Both, "Both edges"),
];

fn snap_label(snap_ms: i64) -> String {
    SNAP_CHOICES
        .iter()
        .find(|(value, _)| *value == snap_ms)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| format!("{} s", snap_ms / 1000))
}

impl TimelineApp {
    pub(super) fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let quarter = self.viewport.duration() / 4;
                if ui.button("◀").on_hover_text("Earlier").clicked() {
                    self.viewport = self.viewport.panned(-quarter);
                }
                if ui.button("▶").on_hover_text("Later").clicked() {
                    self.viewport = self.viewport.panned(quarter);
                }
                if ui.button("−").on_hover_text("Zoom out").clicked() {
                    self.viewport = self.viewport.zoomed(1.25);
                }
                if ui.button("+").on_hover_text("Zoom in").clicked() {
                    self.viewport = self.viewport.zoomed(0.8);
                }
                if ui.button("Day").on_hover_text("Show one day").clicked() {
                    let start = self.viewport.visible_start;
                    self.viewport.visible_end = start + DAY;
                }

                ui.separator();
                self.render_interaction_settings(ui);

                ui.separator();
                let theme_label = if self.theme.is_dark { "☀" } else { "🌙" };
                if ui.button(theme_label).on_hover_text("Toggle theme").clicked() {
                    self.theme = self.theme.toggled();
                    self.theme.apply_to_context(ctx);
                }
                if ui.button("Save settings").clicked() {
                    match self.settings_service.save(&self.settings) {
                        Ok(()) => {
                            self.status =
                                format!("Saved settings to {}", self.settings_service.path().display());
                        }
                        Err(err) => {
                            log::error!("Failed to save settings: {:#}", err);
                            self.status = format!("Could not save settings: {}", err);
                        }
                    }
                }
            });
        });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape))
            && GestureMemory::active(ctx).is_none()
        {
            self.selected = None;
        }
    }

    fn render_interaction_settings(&mut self, ui: &mut egui::Ui) {
        let before = self.settings.clone();

        egui::ComboBox::from_id_source("snap")
            .selected_text(format!("Snap: {}", snap_label(self.settings.drag_snap_ms)))
            .show_ui(ui, |ui| {
                for (value, label) in SNAP_CHOICES {
                    ui.selectable_value(&mut self.settings.drag_snap_ms, value, label);
                }
            });

        egui::ComboBox::from_id_source("resize_edges")
            .selected_text(
                RESIZE_CHOICES
                    .iter()
                    .find(|(edges, _)| *edges == self.settings.can_resize)
                    .map(|(_, label)| *label)
                    .unwrap_or_default(),
            )
            .show_ui(ui, |ui| {
                for (edges, label) in RESIZE_CHOICES {
                    ui.selectable_value(&mut self.settings.can_resize, edges, label);
                }
            });

        ui.checkbox(&mut self.settings.can_move, "Move");
        ui.checkbox(&mut self.settings.can_change_group, "Change row");
        ui.checkbox(&mut self.settings.use_resize_handle, "Handles");

        let mut right_sidebar = self.settings.show_right_sidebar();
        if ui.checkbox(&mut right_sidebar, "Right sidebar").changed() {
            self.settings.right_sidebar_width = if right_sidebar { 120.0 } else { 0.0 };
        }

        if self.settings != before {
            log::debug!("Settings changed: {:?}", self.settings);
            self.settings_changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_label() {
        assert_eq!(snap_label(0), "Off");
        assert_eq!(snap_label(15 * 60_000), "15 min");
        assert_eq!(snap_label(30_000), "30 s");
    }
}
