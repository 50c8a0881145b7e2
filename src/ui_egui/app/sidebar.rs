//! Group sidebars next to the canvas.

use egui::{Align2, FontId, Pos2, Rect, Stroke, Vec2};

use super::canvas::CanvasAreas;
use super::TimelineApp;
use crate::models::group::GroupBoundaryTable;
use crate::services::layout::{RowParity, SidebarLayout};

impl TimelineApp {
    pub(super) fn render_sidebars(
        &self,
        ui: &egui::Ui,
        areas: &CanvasAreas,
        table: &GroupBoundaryTable,
    ) {
        if let Some(layout) = &self.sidebar {
            self.paint_sidebar(ui, layout, areas.sidebar, table);
        }
        if let (Some(layout), Some(rect)) = (&self.right_sidebar, areas.right_sidebar) {
            self.paint_sidebar(ui, layout, rect, table);
        }
    }

    fn paint_sidebar(
        &self,
        ui: &egui::Ui,
        layout: &SidebarLayout,
        area: Rect,
        table: &GroupBoundaryTable,
    ) {
        let painter = ui.painter_at(area);
        painter.rect_filled(area, 0.0, self.theme.sidebar_background);

        for row in &layout.rows {
            let top = table.tops().get(row.index).copied().unwrap_or(0.0) as f32;
            let rect = Rect::from_min_size(
                area.min + Vec2::new(0.0, top),
                Vec2::new(row.width as f32, row.height as f32),
            );
            if row.parity == RowParity::Odd {
                painter.rect_filled(rect, 0.0, self.theme.row_odd.linear_multiply(0.5));
            }
            painter.hline(
                area.x_range(),
                rect.bottom() + 0.5,
                Stroke::new(1.0, self.theme.grid_line),
            );

            if let Some(content) = &row.content {
                let anchor = if layout.right {
                    (Pos2::new(rect.right() - 6.0, rect.center().y), Align2::RIGHT_CENTER)
                } else {
                    (Pos2::new(rect.left() + 6.0, rect.center().y), Align2::LEFT_CENTER)
                };
                painter.text(
                    anchor.0,
                    anchor.1,
                    content,
                    FontId::proportional(13.0),
                    self.theme.text_primary,
                );
            }
        }
    }
}
