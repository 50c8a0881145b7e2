// Group module
// Group rows and their vertical boundaries

use crate::models::error::TimelineError;
use crate::models::keys::{Record, TimelineKeys};
use crate::utils::generic::{get_id, get_text};

/// A group row of the timeline, read from a host record
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub fields: Record,
}

impl Group {
    pub fn from_record(record: Record, keys: &TimelineKeys) -> Result<Self, TimelineError> {
        Ok(Self {
            id: get_id(&record, &keys.group_id_key)?,
            fields: record,
        })
    }

    pub fn title(&self, keys: &TimelineKeys) -> Option<String> {
        get_text(&self.fields, &keys.group_title_key)
    }

    pub fn right_title(&self, keys: &TimelineKeys) -> Option<String> {
        get_text(&self.fields, &keys.group_right_title_key)
    }
}

/// Top pixel offset of every group row, in row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupBoundaryTable {
    tops: Vec<f64>,
}

impl GroupBoundaryTable {
    pub fn from_tops(tops: Vec<f64>) -> Self {
        Self { tops }
    }

    /// Build the table by stacking rows of the given heights from y = 0
    pub fn from_heights(heights: &[f64]) -> Self {
        let tops = heights
            .iter()
            .scan(0.0, |top, height| {
                let current = *top;
                *top += height;
                Some(current)
            })
            .collect();
        Self { tops }
    }

    pub fn tops(&self) -> &[f64] {
        &self.tops
    }

    pub fn len(&self) -> usize {
        self.tops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }

    /// Index of the last row whose top lies above `y`.
    ///
    /// Rows are scanned in order and the scan stops at the first top that is
    /// not above `y`. Returns `None` when `y` is above the first row.
    pub fn index_at(&self, y: f64) -> Option<usize> {
        self.tops
            .iter()
            .take_while(|top| y > **top)
            .enumerate()
            .last()
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_heights_stacks_rows() {
        let table = GroupBoundaryTable::from_heights(&[30.0, 45.0, 30.0]);
        assert_eq!(table.tops(), &[0.0, 30.0, 75.0]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_index_at() {
        let table = GroupBoundaryTable::from_tops(vec![0.0, 30.0, 60.0]);
        assert_eq!(table.index_at(-5.0), None);
        assert_eq!(table.index_at(0.0), None);
        assert_eq!(table.index_at(0.5), Some(0));
        assert_eq!(table.index_at(30.0), Some(0));
        assert_eq!(table.index_at(31.0), Some(1));
        assert_eq!(table.index_at(500.0), Some(2));
    }

    #[test]
    fn test_index_at_stops_at_first_boundary_below() {
        // Unordered tops: the scan stops as soon as one is not above y
        let table = GroupBoundaryTable::from_tops(vec![0.0, 100.0, 20.0]);
        assert_eq!(table.index_at(50.0), Some(0));
    }

    #[test]
    fn test_group_from_record() {
        let keys = TimelineKeys::default();
        let record = json!({"id": 3, "title": "Crew A", "rightTitle": "12h"})
            .as_object()
            .cloned()
            .unwrap();
        let group = Group::from_record(record, &keys).unwrap();
        assert_eq!(group.id, "3");
        assert_eq!(group.title(&keys).as_deref(), Some("Crew A"));
        assert_eq!(group.right_title(&keys).as_deref(), Some("12h"));
    }
}
