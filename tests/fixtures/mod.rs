// Test fixtures - reusable test data
// Provides consistent records, layouts and interactions across test files
#![allow(dead_code)]

use rust_timeline::models::group::GroupBoundaryTable;
use rust_timeline::models::item::{Dimensions, DraggableItem};
use rust_timeline::models::keys::Record;
use rust_timeline::models::settings::{ResizeEdges, TimelineSettings};
use rust_timeline::models::viewport::{ScrollState, TimeMs, Viewport};
use rust_timeline::services::interaction::{
    GestureSource, InteractionFrame, ItemInteraction, ItemProps, ResizableConfig,
    UtcOffsetSource,
};
use serde_json::json;

/// Host records as a timeline host would pass them in
pub mod records {
    use super::*;

    fn object(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    /// Three machines, the middle one without a right title
    pub fn groups() -> Vec<Record> {
        vec![
            object(json!({"id": 1, "title": "Crane", "rightTitle": "4 jobs"})),
            object(json!({"id": 2, "title": "Forklift"})),
            object(json!({"id": "truck", "title": "Truck", "rightTitle": "idle"})),
        ]
    }

    pub fn item(id: &str, group: serde_json::Value, start: TimeMs, end: TimeMs) -> Record {
        object(json!({
            "id": id,
            "group": group,
            "title": format!("Job {}", id),
            "start_time": start,
            "end_time": end,
        }))
    }
}

/// Canvas geometry shared by the interaction tests
pub mod layout {
    use super::*;

    /// 0..10_000 ms over 1000 px: 10 ms per pixel
    pub fn viewport() -> Viewport {
        Viewport::new(0, 10_000, 1000.0).unwrap()
    }

    /// Four rows, 30 px each
    pub fn table() -> GroupBoundaryTable {
        GroupBoundaryTable::from_heights(&[30.0, 30.0, 30.0, 30.0])
    }

    pub fn frame(table: &GroupBoundaryTable) -> InteractionFrame<'_> {
        InteractionFrame::new(viewport(), ScrollState::default(), table)
    }

    /// Box of an item on the fixture viewport, 30 px rows with no padding
    pub fn dimensions(item: &DraggableItem) -> Dimensions {
        let viewport = viewport();
        let left = viewport.x_for_time(item.start_time);
        Dimensions::new(
            left,
            item.group_index as f64 * 30.0,
            viewport.x_for_time(item.end_time) - left,
            30.0,
        )
    }
}

/// Gesture source that accepts every configuration
#[derive(Debug, Default)]
pub struct NullSource {
    pub draggable: bool,
    pub resizable: ResizableConfig,
}

impl GestureSource for NullSource {
    fn configure_draggable(&mut self, enabled: bool) {
        self.draggable = enabled;
    }

    fn configure_resizable(&mut self, config: ResizableConfig) {
        self.resizable = config;
    }
}

/// Settings with a one second snap and both edges resizable
pub fn settings() -> TimelineSettings {
    TimelineSettings {
        drag_snap_ms: 1000,
        can_resize: ResizeEdges::Both,
        ..TimelineSettings::default()
    }
}

/// A selected item whose gesture source is already mounted
pub fn selected_interaction(
    item: DraggableItem,
    settings: &TimelineSettings,
    source: &mut NullSource,
) -> ItemInteraction {
    let dimensions = layout::dimensions(&item);
    let props = ItemProps::from_settings(item, settings, true, dimensions);
    let mut interaction =
        ItemInteraction::new(props.clone()).with_utc_offset(UtcOffsetSource::Fixed(0));
    interaction.update_props(props, source);
    interaction
}
