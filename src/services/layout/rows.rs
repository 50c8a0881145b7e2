//! Background row lines behind the items, and clicks on them.

use crate::utils::generic::ArrayComparer;

/// Background line of one group row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLine {
    pub index: usize,
    pub is_even: bool,
    pub top: f64,
    pub width: f64,
    /// Row height minus the one pixel separator
    pub height: f64,
    /// Row the dragged item is hovering over
    pub highlighted: bool,
}

/// All row lines of the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRowsLayout {
    pub lines: Vec<RowLine>,
}

impl GroupRowsLayout {
    pub fn build(canvas_width: f64, group_heights: &[f64], new_group_order: Option<usize>) -> Self {
        let mut top = 0.0;
        let lines = group_heights
            .iter()
            .enumerate()
            .map(|(index, height)| {
                let line = RowLine {
                    index,
                    is_even: index % 2 == 0,
                    top,
                    width: canvas_width,
                    height: (height - 1.0).max(0.0),
                    highlighted: new_group_order == Some(index),
                };
                top += height;
                line
            })
            .collect();
        Self { lines }
    }

    /// Row under a canvas y, counting the separator as part of its row
    pub fn row_at(&self, y: f64) -> Option<usize> {
        self.lines
            .iter()
            .find(|line| y >= line.top && y < line.top + line.height + 1.0)
            .map(|line| line.index)
    }

    pub fn total_height(&self) -> f64 {
        self.lines
            .last()
            .map(|line| line.top + line.height + 1.0)
            .unwrap_or(0.0)
    }
}

/// Interaction on an empty part of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    Click(usize),
    DoubleClick(usize),
    ContextClick(usize),
}

/// Turns press/release pairs on rows into clicks, dropping presses that
/// travelled further than the click tolerance.
#[derive(Debug, Clone, Default)]
pub struct RowClickTracker {
    tolerance: f64,
    pressed: Option<(usize, f64, f64)>,
}

impl RowClickTracker {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            pressed: None,
        }
    }

    pub fn press(&mut self, row: usize, x: f64, y: f64) {
        self.pressed = Some((row, x, y));
    }

    pub fn release(&mut self, x: f64, y: f64) -> Option<RowEvent> {
        let (row, start_x, start_y) = self.pressed.take()?;
        let travelled = (x - start_x).abs().max((y - start_y).abs());
        if travelled > self.tolerance {
            log::trace!("Row {} press travelled {}px, not a click", row, travelled);
            return None;
        }
        Some(RowEvent::Click(row))
    }
}

/// Inputs whose change means the row lines must be drawn again
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRowsInputs {
    pub new_group_order: Option<usize>,
    pub canvas_width: f64,
    pub line_count: usize,
    pub group_count: usize,
    pub group_heights: Vec<f64>,
}

#[derive(Debug, Default)]
pub struct GroupRowsWatch {
    last: Option<GroupRowsInputs>,
    comparer: ArrayComparer,
}

impl GroupRowsWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_render(&mut self, next: GroupRowsInputs) -> bool {
        let changed = match &self.last {
            None => true,
            Some(last) => {
                let order = last.new_group_order;
                let highlighted_height =
                    |inputs: &GroupRowsInputs| order.and_then(|i| inputs.group_heights.get(i).copied());

                last.new_group_order != next.new_group_order
                    || last.canvas_width != next.canvas_width
                    || last.line_count != next.line_count
                    || last.group_count != next.group_count
                    || highlighted_height(last) != highlighted_height(&next)
                    || !self
                        .comparer
                        .arrays_equal(&last.group_heights, &next.group_heights)
            }
        };
        self.last = Some(next);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn inputs(order: Option<usize>, width: f64, heights: Vec<f64>) -> GroupRowsInputs {
        GroupRowsInputs {
            new_group_order: order,
            canvas_width: width,
            line_count: heights.len(),
            group_count: heights.len(),
            group_heights: heights,
        }
    }

    #[test]
    fn test_build_stacks_lines() {
        let layout = GroupRowsLayout::build(800.0, &[30.0, 50.0, 30.0], Some(1));
        let tops: Vec<f64> = layout.lines.iter().map(|l| l.top).collect();
        assert_eq!(tops, vec![0.0, 30.0, 80.0]);
        assert_eq!(layout.lines[1].height, 49.0);
        assert!(layout.lines[0].is_even && !layout.lines[1].is_even);
        assert!(layout.lines[1].highlighted && !layout.lines[2].highlighted);
        assert_eq!(layout.total_height(), 110.0);
    }

    #[test_case(0.0, Some(0) ; "top of first row")]
    #[test_case(29.5, Some(0) ; "separator belongs to row")]
    #[test_case(30.0, Some(1) ; "next row starts")]
    #[test_case(109.9, Some(2) ; "bottom row")]
    #[test_case(110.0, None ; "below rows")]
    #[test_case(-1.0, None ; "above rows")]
    fn test_row_at(y: f64, expected: Option<usize>) {
        let layout = GroupRowsLayout::build(800.0, &[30.0, 50.0, 30.0], None);
        assert_eq!(layout.row_at(y), expected);
    }

    #[test]
    fn test_click_tolerance() {
        let mut tracker = RowClickTracker::new(3.0);
        tracker.press(2, 100.0, 100.0);
        assert_eq!(tracker.release(102.0, 101.0), Some(RowEvent::Click(2)));

        tracker.press(1, 100.0, 100.0);
        assert_eq!(tracker.release(110.0, 100.0), None);

        // Release without press
        assert_eq!(tracker.release(0.0, 0.0), None);
    }

    #[test]
    fn test_watch() {
        let mut watch = GroupRowsWatch::new();
        assert!(watch.needs_render(inputs(None, 800.0, vec![30.0, 30.0])));
        assert!(!watch.needs_render(inputs(None, 800.0, vec![30.0, 30.0])));
        assert!(watch.needs_render(inputs(Some(1), 800.0, vec![30.0, 30.0])));
        assert!(watch.needs_render(inputs(Some(1), 900.0, vec![30.0, 30.0])));
        assert!(watch.needs_render(inputs(Some(1), 900.0, vec![30.0, 30.0, 30.0])));
        assert!(watch.needs_render(inputs(Some(1), 900.0, vec![30.0, 60.0, 30.0])));
        assert!(!watch.needs_render(inputs(Some(1), 900.0, vec![30.0, 60.0, 30.0])));
    }
}
