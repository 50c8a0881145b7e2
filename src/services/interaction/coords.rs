//! Pointer-to-domain coordinate mapping.

use crate::models::group::GroupBoundaryTable;
use crate::models::viewport::{ScrollState, Viewport};

/// Layout state a gesture sample is resolved against.
///
/// Hosts build a fresh frame for every call: the viewport and scroll
/// positions may change between two samples of the same gesture.
#[derive(Debug, Clone, Copy)]
pub struct InteractionFrame<'a> {
    pub viewport: Viewport,
    pub scroll: ScrollState,
    pub group_tops: &'a GroupBoundaryTable,
}

impl<'a> InteractionFrame<'a> {
    pub fn new(
        viewport: Viewport,
        scroll: ScrollState,
        group_tops: &'a GroupBoundaryTable,
    ) -> Self {
        Self {
            viewport,
            scroll,
            group_tops,
        }
    }

    /// Time under a page x coordinate
    pub fn time_for_pixel(&self, page_x: f64) -> f64 {
        time_for_pixel(&self.viewport, &self.scroll, page_x)
    }
}

/// One pointer sample delivered by a gesture source
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub page_x: f64,
    pub page_y: f64,
    /// How far the left edge of the item's bounding box moved in this
    /// sample; non-zero means a resize is happening on the left edge
    pub left_edge_delta: f64,
}

impl PointerSample {
    pub fn at(page_x: f64, page_y: f64) -> Self {
        Self {
            page_x,
            page_y,
            left_edge_delta: 0.0,
        }
    }

    pub fn with_left_edge_delta(mut self, delta: f64) -> Self {
        self.left_edge_delta = delta;
        self
    }
}

/// Map a page x coordinate to a time on the viewport
pub fn time_for_pixel(viewport: &Viewport, scroll: &ScrollState, page_x: f64) -> f64 {
    scroll.canvas_x(page_x) * viewport.time_ratio() + viewport.visible_start as f64
}

/// Number of rows the pointer has moved an item away from `group_index`.
///
/// The result never moves the item above the first row.
pub fn group_delta(
    table: &GroupBoundaryTable,
    scroll: &ScrollState,
    page_y: f64,
    group_index: usize,
) -> i64 {
    let current = group_index as i64;
    let delta = table
        .index_at(scroll.canvas_y(page_y))
        .map(|index| index as i64 - current)
        .unwrap_or(0);

    if current + delta < 0 {
        -current
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll(offset_left: f64, offset_top: f64, scroll_left: f64, scroll_top: f64) -> ScrollState {
        ScrollState {
            offset_left,
            offset_top,
            scroll_left,
            scroll_top,
        }
    }

    #[test]
    fn test_time_for_pixel_uses_offsets_and_scroll() {
        let viewport = Viewport::new(10_000, 20_000, 1000.0).unwrap();
        assert_eq!(time_for_pixel(&viewport, &ScrollState::default(), 100.0), 11_000.0);
        // Canvas starts 200px into the page and is scrolled 50px
        let s = scroll(200.0, 0.0, 50.0, 0.0);
        assert_eq!(time_for_pixel(&viewport, &s, 250.0), 11_000.0);
    }

    #[test]
    fn test_group_delta_follows_pointer() {
        let table = GroupBoundaryTable::from_heights(&[30.0, 30.0, 30.0, 30.0]);
        let s = ScrollState::default();
        assert_eq!(group_delta(&table, &s, 15.0, 1), -1);
        assert_eq!(group_delta(&table, &s, 45.0, 1), 0);
        assert_eq!(group_delta(&table, &s, 100.0, 1), 2);
    }

    #[test]
    fn test_group_delta_respects_scroll() {
        let table = GroupBoundaryTable::from_heights(&[30.0, 30.0, 30.0]);
        let s = scroll(0.0, 100.0, 0.0, 40.0);
        // page y 125 -> canvas y 65 -> third row
        assert_eq!(group_delta(&table, &s, 125.0, 0), 2);
    }

    #[test]
    fn test_group_delta_above_first_row_is_zero() {
        let table = GroupBoundaryTable::from_tops(vec![10.0, 40.0]);
        assert_eq!(group_delta(&table, &ScrollState::default(), 5.0, 1), 0);
    }

    #[test]
    fn test_group_delta_can_reach_first_row() {
        let table = GroupBoundaryTable::from_tops(vec![-50.0, 0.0]);
        assert_eq!(group_delta(&table, &ScrollState::default(), -10.0, 3), -3);
    }
}
