// Settings module
// Timeline configuration persisted as TOML

use serde::{Deserialize, Serialize};

use crate::models::keys::TimelineKeys;

/// Which item edges may be resized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeEdges {
    None,
    Left,
    Right,
    Both,
}

impl ResizeEdges {
    pub fn left(&self) -> bool {
        matches!(self, ResizeEdges::Left | ResizeEdges::Both)
    }

    pub fn right(&self) -> bool {
        matches!(self, ResizeEdges::Right | ResizeEdges::Both)
    }
}

/// Timeline-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Snap quantum in milliseconds; zero disables snapping
    pub drag_snap_ms: i64,
    /// Items narrower than this (in pixels) cannot be resized
    pub min_resize_width: f64,
    pub line_height: f64,
    pub sidebar_width: f64,
    /// Zero hides the right sidebar
    pub right_sidebar_width: f64,
    pub can_move: bool,
    pub can_resize: ResizeEdges,
    pub can_change_group: bool,
    pub can_select: bool,
    pub use_resize_handle: bool,
    /// Maximum pointer travel (pixels) for a row press to count as a click
    pub click_tolerance: f64,
    pub keys: TimelineKeys,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            drag_snap_ms: 15 * 60 * 1000,
            min_resize_width: 20.0,
            line_height: 30.0,
            sidebar_width: 150.0,
            right_sidebar_width: 0.0,
            can_move: true,
            can_resize: ResizeEdges::Right,
            can_change_group: true,
            can_select: true,
            use_resize_handle: false,
            click_tolerance: 3.0,
            keys: TimelineKeys::default(),
        }
    }
}

impl TimelineSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.drag_snap_ms < 0 {
            return Err("drag_snap_ms cannot be negative".to_string());
        }

        if self.min_resize_width < 0.0 {
            return Err("min_resize_width cannot be negative".to_string());
        }

        if self.line_height <= 0.0 {
            return Err("line_height must be positive".to_string());
        }

        if self.sidebar_width < 0.0 || self.right_sidebar_width < 0.0 {
            return Err("sidebar widths cannot be negative".to_string());
        }

        if self.click_tolerance < 0.0 {
            return Err("click_tolerance cannot be negative".to_string());
        }

        Ok(())
    }

    /// Snap quantum, if snapping is enabled
    pub fn drag_snap(&self) -> Option<i64> {
        Some(self.drag_snap_ms).filter(|snap| *snap > 0)
    }

    pub fn show_right_sidebar(&self) -> bool {
        self.right_sidebar_width > 0.0
    }
}
