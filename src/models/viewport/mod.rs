// Viewport module
// Affine mapping between canvas pixels and time

use crate::models::error::TimelineError;

/// Milliseconds on the timeline axis
pub type TimeMs = i64;

/// Snapshot of the visible time window and the canvas width it spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub visible_start: TimeMs,
    pub visible_end: TimeMs,
    pub pixel_width: f64,
}

impl Viewport {
    /// Create a viewport, rejecting empty time ranges and non-positive widths
    ///
    /// # Examples
    /// ```
    /// use rust_timeline::models::viewport::Viewport;
    ///
    /// let viewport = Viewport::new(0, 10_000, 1000.0).unwrap();
    /// assert_eq!(viewport.time_ratio(), 10.0);
    /// assert!(Viewport::new(5, 5, 1000.0).is_err());
    /// ```
    pub fn new(
        visible_start: TimeMs,
        visible_end: TimeMs,
        pixel_width: f64,
    ) -> Result<Self, TimelineError> {
        if visible_end <= visible_start || !(pixel_width > 0.0) {
            return Err(TimelineError::InvalidViewport {
                start: visible_start,
                end: visible_end,
                width: pixel_width,
            });
        }
        Ok(Self::unchecked(visible_start, visible_end, pixel_width))
    }

    /// Create a viewport without validation.
    ///
    /// A zero width yields a non-finite ratio which simply propagates into
    /// the proposed times.
    pub fn unchecked(visible_start: TimeMs, visible_end: TimeMs, pixel_width: f64) -> Self {
        Self {
            visible_start,
            visible_end,
            pixel_width,
        }
    }

    /// Time units per pixel
    pub fn time_ratio(&self) -> f64 {
        (self.visible_end - self.visible_start) as f64 / self.pixel_width
    }

    /// Visible duration in milliseconds
    pub fn duration(&self) -> TimeMs {
        self.visible_end - self.visible_start
    }

    /// Canvas x (relative to the canvas origin) of a time
    pub fn x_for_time(&self, time: TimeMs) -> f64 {
        (time - self.visible_start) as f64 / self.time_ratio()
    }

    /// Time at a canvas x (relative to the canvas origin)
    pub fn time_for_x(&self, x: f64) -> f64 {
        x * self.time_ratio() + self.visible_start as f64
    }

    /// Shift the visible window by a duration, keeping the width
    pub fn panned(&self, delta: TimeMs) -> Self {
        Self {
            visible_start: self.visible_start + delta,
            visible_end: self.visible_end + delta,
            ..*self
        }
    }

    /// Scale the visible duration around its centre
    pub fn zoomed(&self, factor: f64) -> Self {
        let centre = self.visible_start as f64 + self.duration() as f64 / 2.0;
        let half = (self.duration() as f64 * factor / 2.0).max(500.0);
        Self {
            visible_start: (centre - half).round() as TimeMs,
            visible_end: (centre + half).round() as TimeMs,
            ..*self
        }
    }
}

/// Summed offsets of the scroll container and its scroll positions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub offset_left: f64,
    pub offset_top: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
}

impl ScrollState {
    /// Canvas x for a page x
    pub fn canvas_x(&self, page_x: f64) -> f64 {
        page_x - self.offset_left + self.scroll_left
    }

    /// Canvas y for a page y
    pub fn canvas_y(&self, page_y: f64) -> f64 {
        page_y - self.offset_top + self.scroll_top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_rejects_invalid_ranges() {
        assert!(Viewport::new(0, 1000, 100.0).is_ok());
        assert!(Viewport::new(1000, 1000, 100.0).is_err());
        assert!(Viewport::new(2000, 1000, 100.0).is_err());
        assert!(Viewport::new(0, 1000, 0.0).is_err());
        assert!(Viewport::new(0, 1000, f64::NAN).is_err());
    }

    #[test]
    fn test_x_and_time_are_inverse() {
        let viewport = Viewport::new(1_000, 11_000, 500.0).unwrap();
        assert_eq!(viewport.time_ratio(), 20.0);
        assert_eq!(viewport.x_for_time(3_000), 100.0);
        assert_eq!(viewport.time_for_x(100.0), 3_000.0);
    }

    #[test]
    fn test_zero_width_passes_through() {
        let viewport = Viewport::unchecked(0, 1000, 0.0);
        assert!(!viewport.time_ratio().is_finite());
    }

    #[test]
    fn test_pan_and_zoom() {
        let viewport = Viewport::new(0, 10_000, 1000.0).unwrap();
        let panned = viewport.panned(2_000);
        assert_eq!((panned.visible_start, panned.visible_end), (2_000, 12_000));

        let zoomed = viewport.zoomed(0.5);
        assert_eq!((zoomed.visible_start, zoomed.visible_end), (2_500, 7_500));
        assert_eq!(zoomed.pixel_width, 1000.0);
    }

    #[test]
    fn test_scroll_state_adjusts_page_coordinates() {
        let scroll = ScrollState {
            offset_left: 150.0,
            offset_top: 40.0,
            scroll_left: 25.0,
            scroll_top: 10.0,
        };
        assert_eq!(scroll.canvas_x(200.0), 75.0);
        assert_eq!(scroll.canvas_y(100.0), 70.0);
    }
}
