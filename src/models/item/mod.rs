// Item module
// Timeline items as seen by the interaction resolver

use crate::models::error::TimelineError;
use crate::models::keys::{Record, TimelineKeys};
use crate::models::viewport::TimeMs;
use crate::utils::generic::{get_id, get_text, get_time};

/// An item that can be dragged and resized on the timeline.
///
/// The host owns the underlying record; the resolver only reads it and
/// proposes replacement times and group indices.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggableItem {
    pub id: String,
    pub start_time: TimeMs,
    pub end_time: TimeMs,
    /// Index of the group row the item is currently placed in
    pub group_index: usize,
    /// The full host record, kept for titles and listener callbacks
    pub fields: Record,
}

impl DraggableItem {
    /// Create an item with no extra fields
    pub fn new(
        id: impl Into<String>,
        start_time: TimeMs,
        end_time: TimeMs,
        group_index: usize,
    ) -> Result<Self, TimelineError> {
        let item = Self {
            id: id.into(),
            start_time,
            end_time,
            group_index,
            fields: Record::new(),
        };
        item.validate()?;
        Ok(item)
    }

    /// Read an item out of a host record using the configured keys
    ///
    /// # Examples
    /// ```
    /// use rust_timeline::models::item::DraggableItem;
    /// use rust_timeline::models::keys::TimelineKeys;
    /// use serde_json::json;
    ///
    /// let record = json!({"id": 7, "start_time": 1000, "end_time": 5000})
    ///     .as_object()
    ///     .cloned()
    ///     .unwrap();
    /// let item = DraggableItem::from_record(record, &TimelineKeys::default(), 2).unwrap();
    /// assert_eq!(item.id, "7");
    /// assert_eq!(item.length(), 4000);
    /// ```
    pub fn from_record(
        record: Record,
        keys: &TimelineKeys,
        group_index: usize,
    ) -> Result<Self, TimelineError> {
        let item = Self {
            id: get_id(&record, &keys.item_id_key)?,
            start_time: get_time(&record, &keys.item_time_start_key)?,
            end_time: get_time(&record, &keys.item_time_end_key)?,
            group_index,
            fields: record,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.id.trim().is_empty() {
            return Err(TimelineError::InvalidItem("item id cannot be empty".to_string()));
        }
        if self.end_time < self.start_time {
            return Err(TimelineError::InvalidItem(format!(
                "item {} ends ({}) before it starts ({})",
                self.id, self.end_time, self.start_time
            )));
        }
        Ok(())
    }

    /// Duration of the item in milliseconds
    pub fn length(&self) -> TimeMs {
        self.end_time - self.start_time
    }

    pub fn title(&self, keys: &TimelineKeys) -> Option<String> {
        get_text(&self.fields, &keys.item_title_key)
    }

    pub fn div_title(&self, keys: &TimelineKeys) -> Option<String> {
        get_text(&self.fields, keys.div_title_key())
    }

    pub fn name(&self, keys: &TimelineKeys) -> Option<String> {
        get_text(&self.fields, &keys.item_name_key)
    }

    pub fn class_name(&self, keys: &TimelineKeys) -> Option<String> {
        get_text(&self.fields, &keys.item_class_name_key)
    }

    /// Group id the record points at
    pub fn group_id(&self, keys: &TimelineKeys) -> Option<String> {
        get_text(&self.fields, &keys.item_group_key)
    }
}

/// Pixel box of a rendered item, relative to the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dimensions {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_record_with_custom_keys() {
        let keys = TimelineKeys {
            item_id_key: "uid".to_string(),
            item_time_start_key: "from".to_string(),
            item_time_end_key: "to".to_string(),
            item_title_key: "label".to_string(),
            ..TimelineKeys::default()
        };
        let item = DraggableItem::from_record(
            record(json!({"uid": "job-1", "from": 0, "to": "3600000", "label": "Build"})),
            &keys,
            1,
        )
        .unwrap();

        assert_eq!(item.id, "job-1");
        assert_eq!(item.start_time, 0);
        assert_eq!(item.end_time, 3_600_000);
        assert_eq!(item.group_index, 1);
        assert_eq!(item.title(&keys).as_deref(), Some("Build"));
        assert_eq!(item.div_title(&keys).as_deref(), Some("Build"));
    }

    #[test]
    fn test_from_record_missing_time() {
        let result = DraggableItem::from_record(
            record(json!({"id": 1, "start_time": 0})),
            &TimelineKeys::default(),
            0,
        );
        assert_eq!(
            result.unwrap_err(),
            TimelineError::MissingField {
                key: "end_time".to_string()
            }
        );
    }

    #[test]
    fn test_item_cannot_end_before_start() {
        assert!(DraggableItem::new("a", 5000, 1000, 0).is_err());
        assert!(DraggableItem::new("", 0, 1000, 0).is_err());
        assert!(DraggableItem::new("a", 1000, 1000, 0).is_ok());
    }
}
