//! Per-item gesture state machine.

use crate::models::item::{Dimensions, DraggableItem};
use crate::models::keys::TimelineKeys;
use crate::models::settings::TimelineSettings;
use crate::models::viewport::TimeMs;
use crate::utils::date::local_utc_offset_minutes;
use crate::utils::generic::RenderWatch;

use super::coords::{group_delta, InteractionFrame, PointerSample};
use super::gesture::{
    Capabilities, CapabilityGate, ClickKind, DragState, GestureKind, GestureSource,
    GestureState, ResizeEdge, ResizeState,
};
use super::listener::InteractionListener;
use super::snap::{resize_time_delta, snap_move, snap_resize};
use super::validator::{MoveResizeValidator, ValidationAction, ValidationRequest};

/// Display labels read from the item record once per update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemLabels {
    pub title: Option<String>,
    pub div_title: Option<String>,
    pub name: Option<String>,
    pub class_name: Option<String>,
}

impl ItemLabels {
    pub fn from_item(item: &DraggableItem, keys: &TimelineKeys) -> Self {
        Self {
            title: item.title(keys),
            div_title: item.div_title(keys),
            name: item.name(keys),
            class_name: item.class_name(keys),
        }
    }
}

/// Everything the host tells an item about itself for the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct ItemProps {
    pub item: DraggableItem,
    pub labels: ItemLabels,
    pub selected: bool,
    pub can_select: bool,
    pub can_move: bool,
    pub can_resize_left: bool,
    pub can_resize_right: bool,
    pub can_change_group: bool,
    pub use_resize_handle: bool,
    /// Items narrower than this (in pixels) cannot be resized
    pub min_resize_width: f64,
    pub drag_snap: Option<TimeMs>,
    pub dimensions: Dimensions,
}

impl ItemProps {
    pub fn from_settings(
        item: DraggableItem,
        settings: &TimelineSettings,
        selected: bool,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            labels: ItemLabels::from_item(&item, &settings.keys),
            item,
            selected,
            can_select: settings.can_select,
            can_move: settings.can_move,
            can_resize_left: settings.can_resize.left(),
            can_resize_right: settings.can_resize.right(),
            can_change_group: settings.can_change_group,
            use_resize_handle: settings.use_resize_handle,
            min_resize_width: settings.min_resize_width,
            drag_snap: settings.drag_snap(),
            dimensions,
        }
    }
}

/// Where the local UTC offset for move snapping comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtcOffsetSource {
    /// Ask the system on every sample
    Local,
    /// A fixed offset in minutes
    Fixed(i32),
}

/// Fields that decide whether the item must be drawn again
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRenderState {
    pub dimensions: Dimensions,
    pub resizing: bool,
    pub resize_time: Option<TimeMs>,
    pub selected: bool,
    pub title: Option<String>,
    pub name: Option<String>,
    pub class_name: Option<String>,
    pub group_index: usize,
}

/// State handed to item renderers
#[derive(Debug, Clone, PartialEq)]
pub struct ItemContext {
    pub dimensions: Dimensions,
    pub use_resize_handle: bool,
    pub title: Option<String>,
    pub name: Option<String>,
    pub can_move: bool,
    pub can_resize_left: bool,
    pub can_resize_right: bool,
    pub selected: bool,
    pub dragging: bool,
    pub drag_start: Option<(f64, f64)>,
    pub drag_time: Option<TimeMs>,
    pub drag_group_index: Option<usize>,
    pub resizing: bool,
    pub resize_edge: Option<ResizeEdge>,
    pub resize_start: Option<f64>,
    pub resize_time: Option<TimeMs>,
    pub width: f64,
}

/// Turns pointer samples on one item into proposed and committed changes.
///
/// Drive it with [`on_gesture_start`](Self::on_gesture_start),
/// [`on_gesture_move`](Self::on_gesture_move) and
/// [`on_gesture_end`](Self::on_gesture_end) from any gesture source. Every
/// call gets a fresh [`InteractionFrame`] and the listener to notify.
pub struct ItemInteraction {
    props: ItemProps,
    state: GestureState,
    gate: CapabilityGate,
    validator: Option<Box<dyn MoveResizeValidator>>,
    utc_offset: UtcOffsetSource,
    pending_click: Option<ClickKind>,
    render_watch: RenderWatch<ItemRenderState>,
    was_dragging: bool,
}

impl std::fmt::Debug for ItemInteraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemInteraction")
            .field("item", &self.props.item.id)
            .field("state", &self.state)
            .field("mounted", &self.gate.is_mounted())
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

impl ItemInteraction {
    pub fn new(props: ItemProps) -> Self {
        Self {
            props,
            state: GestureState::Idle,
            gate: CapabilityGate::new(),
            validator: None,
            utc_offset: UtcOffsetSource::Local,
            pending_click: None,
            render_watch: RenderWatch::new(),
            was_dragging: false,
        }
    }

    pub fn with_validator(mut self, validator: impl MoveResizeValidator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn set_validator(&mut self, validator: Option<Box<dyn MoveResizeValidator>>) {
        self.validator = validator;
    }

    pub fn with_utc_offset(mut self, source: UtcOffsetSource) -> Self {
        self.utc_offset = source;
        self
    }

    pub fn props(&self) -> &ItemProps {
        &self.props
    }

    pub fn item(&self) -> &DraggableItem {
        &self.props.item
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, GestureState::Resizing(_))
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    pub fn is_mounted(&self) -> bool {
        self.gate.is_mounted()
    }

    /// Capability flags for the current props
    pub fn capabilities(&self) -> Capabilities {
        let props = &self.props;
        // Widths are compared in whole pixels
        let wide_enough = props.dimensions.width.trunc() >= props.min_resize_width;
        Capabilities {
            can_move: props.selected && props.can_move,
            can_resize_left: props.selected && props.can_resize_left && wide_enough,
            can_resize_right: props.selected && props.can_resize_right && wide_enough,
        }
    }

    /// Replace the props for a new frame and bring the gesture source in
    /// line with the resulting capabilities.
    ///
    /// Returns whether the item needs to be drawn again.
    pub fn update_props(&mut self, props: ItemProps, source: &mut dyn GestureSource) -> bool {
        self.props = props;
        let capabilities = self.capabilities();
        self.gate.reconcile(
            self.props.selected,
            capabilities,
            self.props.use_resize_handle,
            source,
        );
        self.needs_render()
    }

    /// True when a watched field changed since the last call, and on every
    /// call while a drag is running or has just ended.
    pub fn needs_render(&mut self) -> bool {
        let dragging = self.is_dragging();
        let state = self.render_state();
        let changed = self.render_watch.observe(state);
        let forced = dragging || self.was_dragging;
        self.was_dragging = dragging;
        forced || changed
    }

    pub fn render_state(&self) -> ItemRenderState {
        let (resizing, resize_time) = match &self.state {
            GestureState::Resizing(resize) => (true, Some(resize.proposed_time)),
            _ => (false, None),
        };
        ItemRenderState {
            dimensions: self.props.dimensions,
            resizing,
            resize_time,
            selected: self.props.selected,
            title: self.props.labels.title.clone(),
            name: self.props.labels.name.clone(),
            class_name: self.props.labels.class_name.clone(),
            group_index: self.props.item.group_index,
        }
    }

    pub fn item_context(&self) -> ItemContext {
        let capabilities = self.capabilities();
        let mut context = ItemContext {
            dimensions: self.props.dimensions,
            use_resize_handle: self.props.use_resize_handle,
            title: self.props.labels.title.clone(),
            name: self.props.labels.name.clone(),
            can_move: capabilities.can_move,
            can_resize_left: capabilities.can_resize_left,
            can_resize_right: capabilities.can_resize_right,
            selected: self.props.selected,
            dragging: false,
            drag_start: None,
            drag_time: None,
            drag_group_index: None,
            resizing: false,
            resize_edge: None,
            resize_start: None,
            resize_time: None,
            width: self.props.dimensions.width,
        };

        match &self.state {
            GestureState::Dragging(drag) => {
                context.dragging = true;
                context.drag_start = Some(drag.origin);
                context.drag_time = Some(drag.proposed_time);
                context.drag_group_index = Some(self.group_index_with(drag.group_delta));
            }
            GestureState::Resizing(resize) => {
                context.resizing = true;
                context.resize_edge = resize.edge;
                context.resize_start = Some(resize.origin_x);
                context.resize_time = Some(resize.proposed_time);
            }
            GestureState::Idle => {}
        }
        context
    }

    /// Begin a gesture. Returns false (and stays idle) when the item does
    /// not allow it.
    pub fn on_gesture_start(
        &mut self,
        kind: GestureKind,
        sample: PointerSample,
        frame: &InteractionFrame<'_>,
        listener: &mut dyn InteractionListener,
    ) -> bool {
        if self.is_active() {
            log::warn!(
                "Ignoring {:?} start on item {}: a gesture is already running",
                kind,
                self.props.item.id
            );
            return false;
        }

        let capabilities = self.capabilities();
        match kind {
            GestureKind::Drag if capabilities.can_move => {
                self.start_drag(sample, frame, listener);
                true
            }
            GestureKind::Resize if capabilities.can_resize() => {
                self.start_resize(sample, listener);
                true
            }
            _ => {
                log::debug!(
                    "Refusing {:?} on item {} with {:?}",
                    kind,
                    self.props.item.id,
                    capabilities
                );
                false
            }
        }
    }

    /// Feed one pointer sample of the running gesture. Ignored when idle.
    pub fn on_gesture_move(
        &mut self,
        sample: PointerSample,
        frame: &InteractionFrame<'_>,
        listener: &mut dyn InteractionListener,
    ) {
        match self.state {
            GestureState::Dragging(_) => self.move_drag(sample, frame, listener),
            GestureState::Resizing(_) => self.move_resize(sample, frame, listener),
            GestureState::Idle => {}
        }
    }

    /// Finish the running gesture and commit its result. Ignored when idle.
    pub fn on_gesture_end(
        &mut self,
        sample: PointerSample,
        frame: &InteractionFrame<'_>,
        listener: &mut dyn InteractionListener,
    ) {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Dragging(drag) => self.end_drag(&drag, sample, frame, listener),
            GestureState::Resizing(resize) => self.end_resize(&resize, sample, frame, listener),
            GestureState::Idle => {}
        }
    }

    /// Pointer pressed on the item. Before the gesture source is mounted a
    /// press/release pair is treated as a click.
    pub fn pointer_down(&mut self, kind: ClickKind) {
        if !self.gate.is_mounted() {
            self.pending_click = Some(kind);
        }
    }

    pub fn pointer_up(&mut self, kind: ClickKind, listener: &mut dyn InteractionListener) {
        if !self.gate.is_mounted() && self.pending_click == Some(kind) {
            self.pending_click = None;
            self.select(kind, listener);
        }
    }

    /// A tap recognised by the mounted gesture source
    pub fn tap(&mut self, kind: ClickKind, listener: &mut dyn InteractionListener) {
        self.select(kind, listener);
    }

    pub fn double_click(&mut self, listener: &mut dyn InteractionListener) {
        listener.on_double_click(&self.props.item.id, &self.props.item);
    }

    pub fn context_menu(&mut self, listener: &mut dyn InteractionListener) {
        listener.on_context_menu(&self.props.item.id, &self.props.item);
    }

    fn select(&self, kind: ClickKind, listener: &mut dyn InteractionListener) {
        if self.props.can_select {
            listener.on_select(&self.props.item.id, kind, &self.props.item);
        }
    }

    fn start_drag(
        &mut self,
        sample: PointerSample,
        frame: &InteractionFrame<'_>,
        listener: &mut dyn InteractionListener,
    ) {
        let item = &self.props.item;
        let click_time = frame.time_for_pixel(sample.page_x);
        log::debug!(
            "Drag start on item {} at ({}, {}), time {}",
            item.id,
            sample.page_x,
            sample.page_y,
            click_time
        );

        self.state = GestureState::Dragging(DragState {
            origin: (sample.page_x, sample.page_y),
            time_offset: item.start_time as f64 - click_time,
            proposed_time: item.start_time,
            group_delta: 0,
            last_reported: Some((item.start_time, 0)),
        });
        listener.on_drag(&item.id, item.start_time, item.group_index, item);
    }

    fn move_drag(
        &mut self,
        sample: PointerSample,
        frame: &InteractionFrame<'_>,
        listener: &mut dyn InteractionListener,
    ) {
        let GestureState::Dragging(ref drag) = self.state else {
            return;
        };
        let (time, delta) = self.resolve_drag(sample, frame, drag.time_offset);

        let GestureState::Dragging(ref mut drag) = self.state else {
            return;
        };
        drag.proposed_time = time;
        drag.group_delta = delta;
        if drag.last_reported == Some((time, delta)) {
            return;
        }
        drag.last_reported = Some((time, delta));

        let group_index = self.group_index_with(delta);
        log::trace!("Drag on item {} -> {} in group {}", self.props.item.id, time, group_index);
        listener.on_drag(&self.props.item.id, time, group_index, &self.props.item);
    }

    fn end_drag(
        &self,
        drag: &DragState,
        sample: PointerSample,
        frame: &InteractionFrame<'_>,
        listener: &mut dyn InteractionListener,
    ) {
        let (time, delta) = self.resolve_drag(sample, frame, drag.time_offset);
        let item = &self.props.item;
        let group_index = self.group_index_with(delta);
        log::debug!(
            "Drop item {} at {} in group {} (was {})",
            item.id,
            time,
            group_index,
            item.group_index
        );
        listener.on_drop(&item.id, time, group_index, item.group_index, item);
    }

    /// Snapped, validated time and group delta for a drag sample
    fn resolve_drag(
        &self,
        sample: PointerSample,
        frame: &InteractionFrame<'_>,
        time_offset: f64,
    ) -> (TimeMs, i64) {
        let item = &self.props.item;
        let raw = frame.time_for_pixel(sample.page_x) + time_offset;
        let mut time = snap_move(raw, self.props.drag_snap, self.utc_offset_minutes());
        let mut delta = if self.props.can_change_group {
            group_delta(frame.group_tops, &frame.scroll, sample.page_y, item.group_index)
        } else {
            0
        };

        if let Some(validator) = &self.validator {
            let verdict = validator.validate(&ValidationRequest {
                action: ValidationAction::Move,
                item,
                time,
                edge: None,
                proposed_group_index: self.group_index_with(delta),
                original_group_index: item.group_index,
            });
            time = verdict.time;
            if let Some(group_index) = verdict.group_index_override {
                delta = group_index as i64 - item.group_index as i64;
            }
        }
        (time, delta)
    }

    fn start_resize(&mut self, sample: PointerSample, listener: &mut dyn InteractionListener) {
        log::debug!("Resize start on item {} at x {}", self.props.item.id, sample.page_x);
        self.state = GestureState::Resizing(ResizeState {
            origin_x: sample.page_x,
            edge: None,
            proposed_time: 0,
        });
        listener.on_resizing(&self.props.item.id, 0, None);
    }

    fn move_resize(
        &mut self,
        sample: PointerSample,
        frame: &InteractionFrame<'_>,
        listener: &mut dyn InteractionListener,
    ) {
        let GestureState::Resizing(ref resize) = self.state else {
            return;
        };
        let edge = resize
            .edge
            .unwrap_or_else(|| ResizeEdge::from_left_delta(sample.left_edge_delta));
        let time = self.resolve_resize(sample, frame, Some(edge));

        let GestureState::Resizing(ref mut resize) = self.state else {
            return;
        };
        resize.edge = Some(edge);
        resize.proposed_time = time;

        log::trace!("Resize {:?} on item {} -> {}", edge, self.props.item.id, time);
        listener.on_resizing(&self.props.item.id, time, Some(edge));
    }

    fn end_resize(
        &self,
        resize: &ResizeState,
        sample: PointerSample,
        frame: &InteractionFrame<'_>,
        listener: &mut dyn InteractionListener,
    ) {
        let time = self.resolve_resize(sample, frame, resize.edge);
        let item = &self.props.item;
        let raw_delta = (sample.page_x - resize.origin_x) * frame.viewport.time_ratio();
        let time_delta = resize_time_delta(
            item.length(),
            raw_delta,
            resize.edge == Some(ResizeEdge::Left),
            self.props.drag_snap,
        );
        log::debug!(
            "Resized item {} on {:?} edge to {} (delta {})",
            item.id,
            resize.edge,
            time,
            time_delta
        );
        listener.on_resized(&item.id, time, resize.edge, time_delta, item);
    }

    /// Snapped, validated time for a resize sample
    fn resolve_resize(
        &self,
        sample: PointerSample,
        frame: &InteractionFrame<'_>,
        edge: Option<ResizeEdge>,
    ) -> TimeMs {
        let item = &self.props.item;
        let time = snap_resize(
            frame.time_for_pixel(sample.page_x),
            self.props.drag_snap,
            item.end_time,
        );

        match &self.validator {
            Some(validator) => {
                validator
                    .validate(&ValidationRequest {
                        action: ValidationAction::Resize,
                        item,
                        time,
                        edge,
                        proposed_group_index: item.group_index,
                        original_group_index: item.group_index,
                    })
                    .time
            }
            None => time,
        }
    }

    fn group_index_with(&self, delta: i64) -> usize {
        (self.props.item.group_index as i64 + delta).max(0) as usize
    }

    fn utc_offset_minutes(&self) -> i32 {
        match self.utc_offset {
            UtcOffsetSource::Local => local_utc_offset_minutes(),
            UtcOffsetSource::Fixed(minutes) => minutes,
        }
    }
}
