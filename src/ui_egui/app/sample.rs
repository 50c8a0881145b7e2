//! Demo groups and items shown when the app starts.

use serde_json::{json, Value};

use crate::models::keys::{Record, TimelineKeys};
use crate::models::viewport::TimeMs;

const HOUR: TimeMs = 60 * 60 * 1000;

const GROUPS: [(&str, &str); 6] = [
    ("Crane A", "north yard"),
    ("Crane B", "north yard"),
    ("Forklift 1", "warehouse"),
    ("Forklift 2", "warehouse"),
    ("Truck 7", "depot"),
    ("Truck 9", "depot"),
];

fn record(pairs: Vec<(&str, Value)>) -> Record {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

pub fn groups(keys: &TimelineKeys) -> Vec<Record> {
    GROUPS
        .iter()
        .enumerate()
        .map(|(index, (title, right_title))| {
            record(vec![
                (keys.group_id_key.as_str(), json!(index + 1)),
                (keys.group_title_key.as_str(), json!(title)),
                (keys.group_right_title_key.as_str(), json!(right_title)),
            ])
        })
        .collect()
}

/// Three jobs per group, spread over the day starting at `day_start`
pub fn items(keys: &TimelineKeys, day_start: TimeMs) -> Vec<Record> {
    let mut items = Vec::new();
    for group in 0..GROUPS.len() as i64 {
        for job in 0..3_i64 {
            let id = group * 3 + job + 1;
            let start = day_start + (6 + job * 4 + group % 3) * HOUR;
            let length = (2 + (id % 3)) * HOUR;
            items.push(record(vec![
                (keys.item_id_key.as_str(), json!(id)),
                (keys.item_group_key.as_str(), json!(group + 1)),
                (keys.item_title_key.as_str(), json!(format!("Job {}", id))),
                (
                    keys.item_name_key.as_str(),
                    json!(format!("job-{}", id)),
                ),
                (keys.item_time_start_key.as_str(), json!(start)),
                (keys.item_time_end_key.as_str(), json!(start + length)),
            ]));
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::generic::{get_id, get_time};

    #[test]
    fn test_sample_records_follow_keys() {
        let mut keys = TimelineKeys::default();
        keys.item_time_start_key = "from".to_string();
        let items = items(&keys, 0);
        assert_eq!(items.len(), GROUPS.len() * 3);
        assert_eq!(get_id(&items[0], "id").unwrap(), "1");
        assert_eq!(get_time(&items[0], "from").unwrap(), 6 * HOUR);
        assert_eq!(groups(&keys).len(), GROUPS.len());
    }
}
