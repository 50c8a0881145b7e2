//! Theme module for the egui timeline
//!
//! Defines the TimelineTheme structure and the colors used to paint rows,
//! sidebars and items.

use egui::Color32;

/// Colors used by the timeline widgets
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    /// Application background color
    pub app_background: Color32,

    /// Sidebar background color
    pub sidebar_background: Color32,

    /// Background of even group rows
    pub row_even: Color32,

    /// Background of odd group rows
    pub row_odd: Color32,

    /// Row the dragged item would land in
    pub row_highlight: Color32,

    /// Separator lines between rows and axis ticks
    pub grid_line: Color32,

    pub item_fill: Color32,
    pub item_selected_fill: Color32,
    pub item_border: Color32,

    /// Translucent silhouette drawn while a gesture is running
    pub item_preview: Color32,

    /// Primary text color (titles, labels)
    pub text_primary: Color32,

    /// Secondary text color (axis labels, hints)
    pub text_secondary: Color32,
}

impl TimelineTheme {
    /// Create the default Light theme
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            sidebar_background: Color32::from_rgb(235, 238, 242),
            row_even: Color32::from_rgb(255, 255, 255),
            row_odd: Color32::from_rgb(248, 248, 250),
            row_highlight: Color32::from_rgb(230, 240, 255),
            grid_line: Color32::from_rgb(220, 220, 220),
            item_fill: Color32::from_rgb(33, 150, 243),
            item_selected_fill: Color32::from_rgb(255, 193, 7),
            item_border: Color32::from_rgb(25, 118, 210),
            item_preview: Color32::from_rgba_unmultiplied(100, 150, 255, 90),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(100, 100, 100),
        }
    }

    /// Create the default Dark theme
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            sidebar_background: Color32::from_rgb(36, 38, 42),
            row_even: Color32::from_rgb(40, 40, 40),
            row_odd: Color32::from_rgb(35, 35, 38),
            row_highlight: Color32::from_rgb(50, 60, 80),
            grid_line: Color32::from_rgb(60, 60, 60),
            item_fill: Color32::from_rgb(30, 110, 180),
            item_selected_fill: Color32::from_rgb(200, 150, 20),
            item_border: Color32::from_rgb(100, 150, 255),
            item_preview: Color32::from_rgba_unmultiplied(100, 150, 255, 70),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
        }
    }

    /// The theme matching the opposite brightness
    pub fn toggled(&self) -> Self {
        if self.is_dark {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Row background for the given row parity
    pub fn row_fill(&self, is_even: bool, highlighted: bool) -> Color32 {
        if highlighted {
            self.row_highlight
        } else if is_even {
            self.row_even
        } else {
            self.row_odd
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }
}

impl Default for TimelineTheme {
    fn default() -> Self {
        Self::light()
    }
}
