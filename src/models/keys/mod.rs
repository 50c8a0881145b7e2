// Keys module
// Field names used to read host records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A host-owned record with arbitrary fields (an item or a group).
pub type Record = Map<String, Value>;

/// Names of the fields the timeline reads from host records.
///
/// Hosts keep their own field naming; the timeline only ever looks fields
/// up through these keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineKeys {
    pub group_id_key: String,
    pub group_title_key: String,
    pub group_right_title_key: String,
    pub item_id_key: String,
    pub item_title_key: String,
    /// Hover title for the item; falls back to `item_title_key` when unset
    pub item_div_title_key: Option<String>,
    pub item_name_key: String,
    pub item_class_name_key: String,
    pub item_group_key: String,
    pub item_time_start_key: String,
    pub item_time_end_key: String,
}

impl Default for TimelineKeys {
    fn default() -> Self {
        Self {
            group_id_key: "id".to_string(),
            group_title_key: "title".to_string(),
            group_right_title_key: "rightTitle".to_string(),
            item_id_key: "id".to_string(),
            item_title_key: "title".to_string(),
            item_div_title_key: None,
            item_name_key: "name".to_string(),
            item_class_name_key: "className".to_string(),
            item_group_key: "group".to_string(),
            item_time_start_key: "start_time".to_string(),
            item_time_end_key: "end_time".to_string(),
        }
    }
}

impl TimelineKeys {
    /// Key used for the item's hover title
    pub fn div_title_key(&self) -> &str {
        self.item_div_title_key
            .as_deref()
            .unwrap_or(&self.item_title_key)
    }

    /// Key used for a group's sidebar content
    pub fn group_content_key(&self, right_sidebar: bool) -> &str {
        if right_sidebar {
            &self.group_right_title_key
        } else {
            &self.group_title_key
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_title_falls_back_to_title() {
        let mut keys = TimelineKeys::default();
        assert_eq!(keys.div_title_key(), "title");

        keys.item_div_title_key = Some("tooltip".to_string());
        assert_eq!(keys.div_title_key(), "tooltip");
    }

    #[test]
    fn test_partial_keys_deserialize_with_defaults() {
        let keys: TimelineKeys =
            serde_json::from_str(r#"{"item_time_start_key": "from"}"#).unwrap();
        assert_eq!(keys.item_time_start_key, "from");
        assert_eq!(keys.item_time_end_key, "end_time");
        assert_eq!(keys.group_content_key(true), "rightTitle");
    }
}
