// Generic helpers
// Record access, cached array comparison and change watching

use std::collections::HashMap;

use serde_json::Value;

use crate::models::error::TimelineError;
use crate::models::keys::Record;

/// Look up a field of a host record
pub fn get<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    record.get(key)
}

/// Read a field as text. Numbers and booleans are rendered, null is absent.
pub fn get_text(record: &Record, key: &str) -> Option<String> {
    match get(record, key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Read an identifier field. Ids may be strings or numbers.
pub fn get_id(record: &Record, key: &str) -> Result<String, TimelineError> {
    match get(record, key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(TimelineError::InvalidField {
            key: key.to_string(),
            value: other.to_string(),
        }),
        None => Err(TimelineError::MissingField {
            key: key.to_string(),
        }),
    }
}

/// Read a time field in milliseconds. Accepts numbers and numeric strings.
pub fn get_time(record: &Record, key: &str) -> Result<i64, TimelineError> {
    let invalid = |value: &Value| TimelineError::InvalidField {
        key: key.to_string(),
        value: value.to_string(),
    };

    match get(record, key) {
        Some(value @ Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .ok_or_else(|| invalid(value)),
        Some(value @ Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid(value)),
        Some(other) => Err(invalid(other)),
        None => Err(TimelineError::MissingField {
            key: key.to_string(),
        }),
    }
}

/// Index records by the text value of one of their fields, mapping each
/// value to the record's position in `records`.
///
/// Records without the field are skipped. Later records win on duplicate keys.
pub fn key_by(records: &[Record], key: &str) -> HashMap<String, usize> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| get_text(record, key).map(|k| (k, index)))
        .collect()
}

/// Element-wise slice equality that remembers where the last mismatch was.
///
/// Changes to row heights tend to be localised, so the index that differed
/// last time is checked before anything else.
#[derive(Debug, Default, Clone)]
pub struct ArrayComparer {
    last_hit_index: Option<usize>,
}

impl ArrayComparer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arrays_equal<T: PartialEq>(&mut self, a: &[T], b: &[T]) -> bool {
        if let Some(hit) = self.last_hit_index {
            if a.get(hit) != b.get(hit) {
                return false;
            }
        }

        if a.len() != b.len() {
            return false;
        }

        for (i, (left, right)) in a.iter().zip(b.iter()).enumerate() {
            if left != right {
                self.last_hit_index = Some(i);
                return false;
            }
        }
        true
    }

    pub fn last_hit_index(&self) -> Option<usize> {
        self.last_hit_index
    }
}

/// Remembers the last observed snapshot of some watched state.
///
/// `observe` returns `true` when the new snapshot differs from the previous
/// one (or on the very first observation), which is the signal to re-render.
#[derive(Debug, Clone)]
pub struct RenderWatch<T> {
    last: Option<T>,
}

impl<T> Default for RenderWatch<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq> RenderWatch<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, next: T) -> bool {
        let changed = self.last.as_ref() != Some(&next);
        self.last = Some(next);
        changed
    }

    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_get_id_accepts_strings_and_numbers() {
        let r = record(json!({"id": 42, "key": "a-1", "flag": true}));
        assert_eq!(get_id(&r, "id").unwrap(), "42");
        assert_eq!(get_id(&r, "key").unwrap(), "a-1");
        assert!(matches!(
            get_id(&r, "flag"),
            Err(TimelineError::InvalidField { .. })
        ));
        assert!(matches!(
            get_id(&r, "missing"),
            Err(TimelineError::MissingField { .. })
        ));
    }

    #[test]
    fn test_get_time_parses_numbers_and_strings() {
        let r = record(json!({"a": 1000, "b": "2500", "c": 12.6, "d": "soon"}));
        assert_eq!(get_time(&r, "a").unwrap(), 1000);
        assert_eq!(get_time(&r, "b").unwrap(), 2500);
        assert_eq!(get_time(&r, "c").unwrap(), 13);
        assert!(get_time(&r, "d").is_err());
    }

    #[test]
    fn test_get_text_skips_null() {
        let r = record(json!({"title": "Row", "n": 3, "none": null}));
        assert_eq!(get_text(&r, "title").as_deref(), Some("Row"));
        assert_eq!(get_text(&r, "n").as_deref(), Some("3"));
        assert_eq!(get_text(&r, "none"), None);
    }

    #[test]
    fn test_key_by_indexes_records() {
        let records = vec![
            record(json!({"id": 1, "title": "one"})),
            record(json!({"id": "b", "title": "two"})),
            record(json!({"title": "orphan"})),
        ];
        let map = key_by(&records, "id");
        assert_eq!(map.len(), 2);
        assert_eq!(get_text(&records[map["1"]], "title").as_deref(), Some("one"));
        assert_eq!(get_text(&records[map["b"]], "title").as_deref(), Some("two"));
    }

    #[test]
    fn test_arrays_equal_remembers_last_mismatch() {
        let mut comparer = ArrayComparer::new();
        assert!(comparer.arrays_equal(&[30.0, 30.0, 30.0], &[30.0, 30.0, 30.0]));
        assert_eq!(comparer.last_hit_index(), None);

        assert!(!comparer.arrays_equal(&[30.0, 30.0, 30.0], &[30.0, 60.0, 30.0]));
        assert_eq!(comparer.last_hit_index(), Some(1));

        // Cached index is checked first and still equal here
        assert!(comparer.arrays_equal(&[1, 2], &[1, 2]));
        assert!(!comparer.arrays_equal(&[1, 2], &[1, 2, 3]));
    }

    #[test]
    fn test_render_watch_reports_changes_only() {
        let mut watch = RenderWatch::new();
        assert!(watch.observe((1, "a")));
        assert!(!watch.observe((1, "a")));
        assert!(watch.observe((2, "a")));
        assert_eq!(watch.last(), Some(&(2, "a")));
    }
}
