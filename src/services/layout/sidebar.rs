//! Group sidebar layout.

use crate::models::keys::{Record, TimelineKeys};
use crate::utils::generic::{get_text, ArrayComparer};

/// Alternating row shading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowParity {
    Even,
    Odd,
}

impl RowParity {
    pub fn of(index: usize) -> Self {
        if index % 2 == 0 {
            RowParity::Even
        } else {
            RowParity::Odd
        }
    }
}

/// One line of the sidebar
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarRow {
    pub index: usize,
    pub parity: RowParity,
    pub id: Option<String>,
    /// Title (or right title) of the group
    pub content: Option<String>,
    pub width: f64,
    /// Row height minus the one pixel separator line
    pub height: f64,
}

/// Sidebar next to the timeline canvas, one row per group
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarLayout {
    pub width: f64,
    pub height: f64,
    pub right: bool,
    pub rows: Vec<SidebarRow>,
}

impl SidebarLayout {
    /// Lay out one sidebar row per group. Groups without a height entry get
    /// a zero-height row.
    pub fn build(
        groups: &[Record],
        keys: &TimelineKeys,
        group_heights: &[f64],
        width: f64,
        height: f64,
        right: bool,
    ) -> Self {
        let content_key = keys.group_content_key(right);
        let rows = groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let group_height = group_heights.get(index).copied().unwrap_or(0.0);
                SidebarRow {
                    index,
                    parity: RowParity::of(index),
                    id: get_text(group, &keys.group_id_key),
                    content: get_text(group, content_key),
                    width,
                    height: (group_height - 1.0).max(0.0),
                }
            })
            .collect();

        Self {
            width,
            height,
            right,
            rows,
        }
    }
}

/// Inputs whose change means the sidebar must be drawn again
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarInputs {
    pub force_refresh_index: u64,
    pub keys: TimelineKeys,
    pub width: f64,
    pub height: f64,
    pub group_heights: Vec<f64>,
}

/// Decides when the sidebar has to be re-rendered
#[derive(Debug, Default)]
pub struct SidebarWatch {
    last: Option<SidebarInputs>,
    comparer: ArrayComparer,
}

impl SidebarWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `next` and report whether it differs from the last inputs
    pub fn needs_render(&mut self, next: SidebarInputs) -> bool {
        let changed = match &self.last {
            None => true,
            Some(last) => {
                last.force_refresh_index != next.force_refresh_index
                    || last.keys != next.keys
                    || last.width != next.width
                    || last.height != next.height
                    || !self
                        .comparer
                        .arrays_equal(&last.group_heights, &next.group_heights)
            }
        };
        self.last = Some(next);
        changed
    }
}

/// Per-row watched fields
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarRowInputs {
    pub force_refresh_index: u64,
    pub width: f64,
    pub height: f64,
    pub content: Option<String>,
}

impl SidebarRowInputs {
    pub fn from_row(row: &SidebarRow, force_refresh_index: u64) -> Self {
        Self {
            force_refresh_index,
            width: row.width,
            height: row.height,
            content: row.content.clone(),
        }
    }
}
