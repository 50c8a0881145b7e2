mod canvas;
mod sample;
mod sidebar;
mod status_bar;
mod toolbar;

use std::collections::HashMap;

use chrono::Local;
use serde_json::Value;

use crate::models::group::Group;
use crate::models::item::DraggableItem;
use crate::models::keys::Record;
use crate::models::settings::TimelineSettings;
use crate::models::viewport::{TimeMs, Viewport};
use crate::services::interaction::{
    BoundsValidator, EventQueue, InteractionEvent, ItemContext, ItemInteraction, ItemProps,
    ResizeEdge,
};
use crate::services::layout::{
    GroupRowsLayout, GroupRowsWatch, RowClickTracker, RowEvent, SidebarLayout, SidebarWatch,
};
use crate::services::settings::SettingsService;
use crate::ui_egui::gesture::ItemGestureSource;
use crate::ui_egui::theme::TimelineTheme;
use crate::utils::date::{from_local, start_of_day, to_local};
use crate::utils::generic::{get_text, key_by};

const DAY: TimeMs = 24 * 60 * 60 * 1000;

/// Interaction state and cached drawing state of one item
struct ItemSlot {
    interaction: ItemInteraction,
    source: ItemGestureSource,
    context: ItemContext,
}

impl ItemSlot {
    fn new(props: ItemProps, validator: BoundsValidator) -> Self {
        let interaction = ItemInteraction::new(props).with_validator(validator);
        let context = interaction.item_context();
        Self {
            interaction,
            source: ItemGestureSource::default(),
            context,
        }
    }
}

pub struct TimelineApp {
    settings: TimelineSettings,
    settings_service: SettingsService,
    groups: Vec<Group>,
    group_records: Vec<Record>,
    items: Vec<DraggableItem>,
    slots: HashMap<String, ItemSlot>,
    selected: Option<String>,
    viewport: Viewport,
    bounds: BoundsValidator,
    theme: TimelineTheme,
    events: EventQueue,
    row_clicks: RowClickTracker,
    sidebar_watch: SidebarWatch,
    right_sidebar_watch: SidebarWatch,
    rows_watch: GroupRowsWatch,
    sidebar: Option<SidebarLayout>,
    right_sidebar: Option<SidebarLayout>,
    rows: Option<GroupRowsLayout>,
    /// Bumped whenever the settings change so the sidebars are rebuilt
    force_refresh_index: u64,
    status: String,
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_toolbar(ctx);
        self.render_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_timeline(ui);
        });
        self.apply_events();

        if self.slots.values().any(|slot| slot.interaction.is_active()) {
            ctx.request_repaint();
        }
    }
}

impl TimelineApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: TimelineSettings,
        settings_service: SettingsService,
    ) -> Self {
        let theme = TimelineTheme::default();
        theme.apply_to_context(&cc.egui_ctx);

        let day_start = start_of_day(Local::now())
            .map(from_local)
            .unwrap_or_default();
        let keys = &settings.keys;
        let group_records = sample::groups(keys);
        let item_records = sample::items(keys, day_start);

        let mut app = Self::from_records(settings, settings_service, group_records, item_records);
        app.theme = theme;
        app.viewport = Viewport::unchecked(day_start, day_start + DAY, 1000.0);
        app.bounds.min_time = day_start - 7 * DAY;
        app.bounds.max_time = day_start + 8 * DAY;
        app
    }

    /// Build the app state out of host records, skipping records that do
    /// not describe a valid group or item.
    fn from_records(
        settings: TimelineSettings,
        settings_service: SettingsService,
        group_records: Vec<Record>,
        item_records: Vec<Record>,
    ) -> Self {
        let keys = &settings.keys;
        let groups: Vec<Group> = group_records
            .iter()
            .filter_map(|record| match Group::from_record(record.clone(), keys) {
                Ok(group) => Some(group),
                Err(err) => {
                    log::warn!("Skipping group: {}", err);
                    None
                }
            })
            .collect();
        // Rows are drawn from the accepted groups only
        let group_records: Vec<Record> = groups.iter().map(|group| group.fields.clone()).collect();
        let group_rows = key_by(&group_records, &keys.group_id_key);

        let items: Vec<DraggableItem> = item_records
            .into_iter()
            .filter_map(|record| {
                let group_id = get_text(&record, &keys.item_group_key)?;
                let group_index = *group_rows.get(&group_id)?;
                match DraggableItem::from_record(record, keys, group_index) {
                    Ok(item) => Some(item),
                    Err(err) => {
                        log::warn!("Skipping item: {}", err);
                        None
                    }
                }
            })
            .collect();
        log::info!("Loaded {} groups and {} items", groups.len(), items.len());

        let bounds = BoundsValidator {
            min_time: TimeMs::MIN / 2,
            max_time: TimeMs::MAX / 2,
            max_group_index: groups.len().saturating_sub(1),
        };

        Self {
            row_clicks: RowClickTracker::new(settings.click_tolerance),
            settings,
            settings_service,
            groups,
            group_records,
            items,
            slots: HashMap::new(),
            selected: None,
            viewport: Viewport::unchecked(0, DAY, 1000.0),
            bounds,
            theme: TimelineTheme::default(),
            events: EventQueue::new(),
            sidebar_watch: SidebarWatch::new(),
            right_sidebar_watch: SidebarWatch::new(),
            rows_watch: GroupRowsWatch::new(),
            sidebar: None,
            right_sidebar: None,
            rows: None,
            force_refresh_index: 0,
            status: String::new(),
        }
    }

    fn item_title(&self, item_id: &str) -> String {
        self.items
            .iter()
            .find(|item| item.id == item_id)
            .and_then(|item| item.title(&self.settings.keys))
            .unwrap_or_else(|| item_id.to_string())
    }

    fn group_title(&self, group_index: usize) -> String {
        self.groups
            .get(group_index)
            .and_then(|group| group.title(&self.settings.keys))
            .unwrap_or_else(|| format!("row {}", group_index + 1))
    }

    fn settings_changed(&mut self) {
        self.force_refresh_index += 1;
        self.row_clicks = RowClickTracker::new(self.settings.click_tolerance);
    }

    /// Apply the notifications raised while handling this frame's input
    fn apply_events(&mut self) {
        for event in self.events.drain() {
            match event {
                InteractionEvent::Select { item_id, kind } => {
                    log::debug!("Selected item {} by {:?}", item_id, kind);
                    self.selected = Some(item_id);
                }
                InteractionEvent::Drag {
                    item_id,
                    time,
                    group_index,
                } => {
                    self.status = format!(
                        "Moving {} to {} on {}",
                        self.item_title(&item_id),
                        format_time(time),
                        self.group_title(group_index)
                    );
                }
                InteractionEvent::Drop {
                    item_id,
                    time,
                    group_index,
                    ..
                } => self.move_item(&item_id, time, group_index),
                InteractionEvent::Resizing {
                    item_id,
                    time,
                    edge: Some(edge),
                } => {
                    self.status = format!(
                        "Resizing {} ({:?} edge) to {}",
                        self.item_title(&item_id),
                        edge,
                        format_time(time)
                    );
                }
                InteractionEvent::Resizing { .. } => {}
                InteractionEvent::Resized {
                    item_id,
                    time,
                    edge,
                    time_delta,
                } => {
                    log::debug!("Resize of {} changed its length by {} ms", item_id, time_delta);
                    self.resize_item(&item_id, time, edge);
                }
                InteractionEvent::DoubleClick { item_id } => {
                    self.status = format!("Opened {}", self.item_title(&item_id));
                }
                InteractionEvent::ContextMenu { item_id } => {
                    self.status = format!("Context menu for {}", self.item_title(&item_id));
                }
            }
        }
    }

    fn handle_row_event(&mut self, event: RowEvent) {
        match event {
            RowEvent::Click(row) => {
                self.selected = None;
                self.status = format!("Clicked {}", self.group_title(row));
            }
            RowEvent::DoubleClick(row) => {
                self.status = format!("Double-clicked {}", self.group_title(row));
            }
            RowEvent::ContextClick(row) => {
                self.status = format!("Context menu for {}", self.group_title(row));
            }
        }
    }

    fn move_item(&mut self, item_id: &str, time: TimeMs, group_index: usize) {
        let group_index = group_index.min(self.groups.len().saturating_sub(1));
        let group_value = self
            .group_records
            .get(group_index)
            .and_then(|record| record.get(&self.settings.keys.group_id_key))
            .cloned();
        let keys = &self.settings.keys;
        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            log::warn!("Dropped unknown item {}", item_id);
            return;
        };

        let length = item.length();
        item.start_time = time;
        item.end_time = time + length;
        item.group_index = group_index;
        item.fields
            .insert(keys.item_time_start_key.clone(), Value::from(item.start_time));
        item.fields
            .insert(keys.item_time_end_key.clone(), Value::from(item.end_time));
        if let Some(value) = group_value {
            item.fields.insert(keys.item_group_key.clone(), value);
        }
        log::info!("Moved item {} to {} in group {}", item_id, time, group_index);
        self.status = format!("Moved to {}", format_time(time));
    }

    fn resize_item(&mut self, item_id: &str, time: TimeMs, edge: Option<ResizeEdge>) {
        let keys = &self.settings.keys;
        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            log::warn!("Resized unknown item {}", item_id);
            return;
        };

        match edge {
            Some(ResizeEdge::Left) => {
                item.start_time = time.min(item.end_time);
                item.fields
                    .insert(keys.item_time_start_key.clone(), Value::from(item.start_time));
            }
            Some(ResizeEdge::Right) | None => {
                item.end_time = time.max(item.start_time);
                item.fields
                    .insert(keys.item_time_end_key.clone(), Value::from(item.end_time));
            }
        }
        log::info!(
            "Resized item {} to {}..{}",
            item_id,
            item.start_time,
            item.end_time
        );
        self.status = format!(
            "Resized to {} - {}",
            format_time(item.start_time),
            format_time(item.end_time)
        );
    }
}

fn format_time(time: TimeMs) -> String {
    to_local(time)
        .map(|local| local.format("%a %H:%M").to_string())
        .unwrap_or_else(|| time.to_string())
}
