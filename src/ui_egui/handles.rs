// Item resize handles
//
// Hit zones and drawing for the left and right resize edges of an item.
// Whole-edge zones are used unless the item asks for dedicated handles.

use egui::{Color32, CursorIcon, Painter, Pos2, Rect, Stroke, Vec2};

use crate::services::interaction::{EdgeAffordance, ResizableConfig, ResizeEdge};

/// Width of a whole-edge hit zone
pub const EDGE_ZONE_WIDTH: f32 = 8.0;
/// Size of a dedicated handle
pub const HANDLE_SIZE: f32 = 6.0;

pub fn cursor_icon() -> CursorIcon {
    CursorIcon::ResizeHorizontal
}

/// Resize hit zones of one item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleRects {
    pub left: Option<Rect>,
    pub right: Option<Rect>,
}

impl HandleRects {
    pub fn for_item(item_rect: Rect, config: &ResizableConfig) -> Self {
        if !config.enabled {
            return Self {
                left: None,
                right: None,
            };
        }
        Self {
            left: edge_rect(item_rect, config.left, ResizeEdge::Left),
            right: edge_rect(item_rect, config.right, ResizeEdge::Right),
        }
    }

    /// Check if a point hits a handle and return its edge
    pub fn hit_test(&self, pos: Pos2) -> Option<ResizeEdge> {
        if self.left.map_or(false, |r| r.contains(pos)) {
            Some(ResizeEdge::Left)
        } else if self.right.map_or(false, |r| r.contains(pos)) {
            Some(ResizeEdge::Right)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

fn edge_rect(item_rect: Rect, affordance: EdgeAffordance, edge: ResizeEdge) -> Option<Rect> {
    let x = match edge {
        ResizeEdge::Left => item_rect.left(),
        ResizeEdge::Right => item_rect.right(),
    };
    match affordance {
        EdgeAffordance::Disabled => None,
        EdgeAffordance::Edge => {
            // Stay inside the item so narrow neighbours keep their own zones
            let width = EDGE_ZONE_WIDTH.min(item_rect.width() / 2.0);
            let min_x = match edge {
                ResizeEdge::Left => x,
                ResizeEdge::Right => x - width,
            };
            Some(Rect::from_min_size(
                Pos2::new(min_x, item_rect.top()),
                Vec2::new(width, item_rect.height()),
            ))
        }
        EdgeAffordance::Handle => {
            let inset = match edge {
                ResizeEdge::Left => HANDLE_SIZE,
                ResizeEdge::Right => -HANDLE_SIZE,
            };
            Some(Rect::from_center_size(
                Pos2::new(x + inset, item_rect.center().y),
                Vec2::new(HANDLE_SIZE, item_rect.height().min(HANDLE_SIZE * 2.0)),
            ))
        }
    }
}

/// Draw resize handles on an item
pub fn draw_handles(
    painter: &Painter,
    handles: &HandleRects,
    hovered: Option<ResizeEdge>,
    color: Color32,
) {
    let draw_handle = |rect: Rect, is_hovered: bool| {
        let (width, stroke_color) = if is_hovered {
            (3.0, Color32::WHITE)
        } else {
            (2.0, Color32::from_rgba_unmultiplied(255, 255, 255, 180))
        };
        let x = rect.center().x;
        let half = rect.height().min(16.0) / 2.0;
        painter.line_segment(
            [
                Pos2::new(x, rect.center().y - half),
                Pos2::new(x, rect.center().y + half),
            ],
            Stroke::new(width, stroke_color),
        );
        painter.rect_stroke(rect, 1.0, Stroke::new(1.0, color.linear_multiply(0.6)));
    };

    if let Some(rect) = handles.left {
        draw_handle(rect, hovered == Some(ResizeEdge::Left));
    }
    if let Some(rect) = handles.right {
        draw_handle(rect, hovered == Some(ResizeEdge::Right));
    }
}
