//! Timeline canvas: axis, group rows and items, and the pointer routing
//! that feeds item gestures to the interaction resolver.

use egui::{Align2, FontId, Id, Pos2, Rect, Sense, Stroke, Vec2};

use super::{ItemSlot, TimelineApp};
use crate::models::group::GroupBoundaryTable;
use crate::models::item::Dimensions;
use crate::models::viewport::{ScrollState, Viewport};
use crate::services::interaction::{
    ClickKind, GestureKind, InteractionFrame, ItemContext, ItemProps, PointerSample, ResizeEdge,
};
use crate::services::layout::{
    GroupRowsInputs, GroupRowsLayout, RowEvent, SidebarInputs, SidebarLayout,
};
use crate::ui_egui::gesture::{ActiveGesture, GestureMemory};
use crate::ui_egui::handles::{cursor_icon, draw_handles, HandleRects};
use crate::utils::date::{axis_step, format_axis_label};

const AXIS_HEIGHT: f32 = 28.0;
const MIN_CANVAS_WIDTH: f32 = 200.0;
/// Item boxes fill this share of their row
const ITEM_HEIGHT_RATIO: f64 = 0.65;
const AXIS_LABEL_SPACING: f32 = 110.0;

/// Screen areas of one frame
pub(super) struct CanvasAreas {
    pub axis: Rect,
    pub canvas: Rect,
    pub sidebar: Rect,
    pub right_sidebar: Option<Rect>,
}

impl TimelineApp {
    pub(super) fn render_timeline(&mut self, ui: &mut egui::Ui) {
        let areas = self.layout_areas(ui.available_rect_before_wrap());
        let ctx = ui.ctx().clone();

        self.viewport = Viewport::unchecked(
            self.viewport.visible_start,
            self.viewport.visible_end,
            areas.canvas.width() as f64,
        );
        self.handle_pan_and_zoom(ui, areas.canvas);

        let heights = vec![self.settings.line_height; self.groups.len()];
        let table = GroupBoundaryTable::from_heights(&heights);
        let scroll = ScrollState {
            offset_left: areas.canvas.left() as f64,
            offset_top: areas.canvas.top() as f64,
            scroll_left: 0.0,
            scroll_top: 0.0,
        };

        self.refresh_layouts(&heights, areas.canvas);

        let canvas_response =
            ui.interact(areas.canvas, Id::new("timeline_canvas"), Sense::click());
        let painter = ui.painter_at(areas.canvas.union(areas.axis));
        self.paint_rows(&painter, areas.canvas);
        self.paint_axis(&painter, areas.axis, areas.canvas);
        self.render_sidebars(ui, &areas, &table);

        let ids: Vec<String> = self.items.iter().map(|item| item.id.clone()).collect();
        for id in ids {
            self.render_item(ui, &ctx, &painter, &id, areas.canvas, scroll, &table);
        }

        self.handle_row_input(&ctx, &canvas_response, areas.canvas);
    }

    fn layout_areas(&self, available: Rect) -> CanvasAreas {
        let sidebar_width = self.settings.sidebar_width as f32;
        let right_width = if self.settings.show_right_sidebar() {
            self.settings.right_sidebar_width as f32
        } else {
            0.0
        };
        let canvas_width =
            (available.width() - sidebar_width - right_width).max(MIN_CANVAS_WIDTH);
        let rows_height = (self.settings.line_height as f32) * self.groups.len() as f32;
        let canvas_left = available.left() + sidebar_width;
        let canvas_top = available.top() + AXIS_HEIGHT;

        CanvasAreas {
            axis: Rect::from_min_size(
                Pos2::new(canvas_left, available.top()),
                Vec2::new(canvas_width, AXIS_HEIGHT),
            ),
            canvas: Rect::from_min_size(
                Pos2::new(canvas_left, canvas_top),
                Vec2::new(canvas_width, rows_height),
            ),
            sidebar: Rect::from_min_size(
                Pos2::new(available.left(), canvas_top),
                Vec2::new(sidebar_width, rows_height),
            ),
            right_sidebar: (right_width > 0.0).then(|| {
                Rect::from_min_size(
                    Pos2::new(canvas_left + canvas_width, canvas_top),
                    Vec2::new(right_width, rows_height),
                )
            }),
        }
    }

    /// Scroll pans the visible window, pinch or ctrl+scroll zooms it
    fn handle_pan_and_zoom(&mut self, ui: &egui::Ui, canvas: Rect) {
        if !ui.rect_contains_pointer(canvas) {
            return;
        }
        let (scroll, zoom) = ui.ctx().input(|i| (i.smooth_scroll_delta, i.zoom_delta()));
        if zoom != 1.0 {
            self.viewport = self.viewport.zoomed(1.0 / zoom as f64);
        } else if scroll != Vec2::ZERO {
            let pixels = if scroll.x != 0.0 { scroll.x } else { scroll.y };
            let delta = (-(pixels as f64) * self.viewport.time_ratio()).round() as i64;
            self.viewport = self.viewport.panned(delta);
        }
    }

    /// Rebuild the cached row and sidebar layouts when their inputs changed
    fn refresh_layouts(&mut self, heights: &[f64], canvas: Rect) {
        let new_group_order = self
            .slots
            .values()
            .find_map(|slot| slot.context.drag_group_index);

        let rows_inputs = GroupRowsInputs {
            new_group_order,
            canvas_width: canvas.width() as f64,
            line_count: heights.len(),
            group_count: self.groups.len(),
            group_heights: heights.to_vec(),
        };
        if self.rows_watch.needs_render(rows_inputs) || self.rows.is_none() {
            self.rows = Some(GroupRowsLayout::build(
                canvas.width() as f64,
                heights,
                new_group_order,
            ));
        }

        let height = canvas.height() as f64;
        let sidebar_inputs = |width: f64| SidebarInputs {
            force_refresh_index: self.force_refresh_index,
            keys: self.settings.keys.clone(),
            width,
            height,
            group_heights: heights.to_vec(),
        };
        let left_inputs = sidebar_inputs(self.settings.sidebar_width);
        let right_inputs = sidebar_inputs(self.settings.right_sidebar_width);

        if self.sidebar_watch.needs_render(left_inputs) || self.sidebar.is_none() {
            self.sidebar = Some(SidebarLayout::build(
                &self.group_records,
                &self.settings.keys,
                heights,
                self.settings.sidebar_width,
                height,
                false,
            ));
        }
        if self.settings.show_right_sidebar() {
            if self.right_sidebar_watch.needs_render(right_inputs) || self.right_sidebar.is_none() {
                self.right_sidebar = Some(SidebarLayout::build(
                    &self.group_records,
                    &self.settings.keys,
                    heights,
                    self.settings.right_sidebar_width,
                    height,
                    true,
                ));
            }
        } else {
            self.right_sidebar = None;
        }
    }

    fn paint_rows(&self, painter: &egui::Painter, canvas: Rect) {
        let Some(rows) = &self.rows else {
            return;
        };
        for line in &rows.lines {
            let rect = Rect::from_min_size(
                canvas.min + Vec2::new(0.0, line.top as f32),
                Vec2::new(line.width as f32, line.height as f32),
            );
            painter.rect_filled(rect, 0.0, self.theme.row_fill(line.is_even, line.highlighted));
            painter.hline(
                canvas.x_range(),
                rect.bottom() + 0.5,
                Stroke::new(1.0, self.theme.grid_line),
            );
        }
    }

    fn paint_axis(&self, painter: &egui::Painter, axis: Rect, canvas: Rect) {
        let span = self.viewport.duration();
        let max_ticks = (axis.width() / AXIS_LABEL_SPACING).max(1.0) as u32;
        let step = axis_step(span, max_ticks);
        if step <= 0 {
            return;
        }

        let first = self.viewport.visible_start.div_euclid(step) * step + step;
        let mut tick = first;
        while tick < self.viewport.visible_end {
            let x = axis.left() + self.viewport.x_for_time(tick) as f32;
            painter.vline(
                x,
                axis.top()..=canvas.bottom(),
                Stroke::new(1.0, self.theme.grid_line),
            );
            painter.text(
                Pos2::new(x + 4.0, axis.center().y),
                Align2::LEFT_CENTER,
                format_axis_label(tick, span),
                FontId::proportional(12.0),
                self.theme.text_secondary,
            );
            tick += step;
        }
    }

    fn item_dimensions(
        &self,
        start: i64,
        end: i64,
        group_index: usize,
        table: &GroupBoundaryTable,
    ) -> Dimensions {
        let line_height = self.settings.line_height;
        let height = line_height * ITEM_HEIGHT_RATIO;
        let row_top = table.tops().get(group_index).copied().unwrap_or(0.0);
        let left = self.viewport.x_for_time(start);
        let width = self.viewport.x_for_time(end) - left;
        Dimensions::new(left, row_top + (line_height - height) / 2.0, width, height)
    }

    #[allow(clippy::too_many_arguments)]
    fn render_item(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        painter: &egui::Painter,
        id: &str,
        canvas: Rect,
        scroll: ScrollState,
        table: &GroupBoundaryTable,
    ) {
        let Some(item) = self.items.iter().find(|item| item.id == id).cloned() else {
            return;
        };
        let dimensions =
            self.item_dimensions(item.start_time, item.end_time, item.group_index, table);
        let selected = self.selected.as_deref() == Some(id);
        let props = ItemProps::from_settings(item, &self.settings, selected, dimensions);

        let bounds = self.bounds;
        let slot = self
            .slots
            .entry(id.to_string())
            .or_insert_with(|| ItemSlot::new(props.clone(), bounds));
        let mut refresh = slot.interaction.update_props(props, &mut slot.source);

        let item_rect = to_screen(canvas, &dimensions);
        if !item_rect.intersects(canvas) && !slot.interaction.is_active() {
            return;
        }

        let response = ui.interact(item_rect, Id::new(("timeline_item", id)), slot.source.sense());
        let handles = HandleRects::for_item(item_rect, &slot.source.resizable);
        let frame = InteractionFrame::new(self.viewport, scroll, table);
        let events = &mut self.events;

        let hovered_edge = response.hover_pos().and_then(|pos| handles.hit_test(pos));
        let resizing_here = GestureMemory::active(ctx)
            .map_or(false, |g| g.item_id == id && g.kind == GestureKind::Resize);
        if hovered_edge.is_some() || resizing_here {
            ctx.set_cursor_icon(cursor_icon());
        }

        if response.drag_started() {
            let origin = ctx
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(origin) = origin {
                let edge = handles.hit_test(origin);
                let kind = if edge.is_some() {
                    GestureKind::Resize
                } else {
                    GestureKind::Drag
                };
                let sample = PointerSample::at(origin.x as f64, origin.y as f64);
                if slot.source.accepts(kind)
                    && slot.interaction.on_gesture_start(kind, sample, &frame, events)
                {
                    GestureMemory::begin(ctx, ActiveGesture::new(id, kind, edge, origin));
                }
            }
        }

        if response.dragged() {
            let gesture = GestureMemory::active(ctx).filter(|g| g.item_id == id);
            if let (Some(gesture), Some(pos)) = (gesture, response.interact_pointer_pos()) {
                if gesture.should_forward(pos) {
                    slot.interaction
                        .on_gesture_move(gesture.sample_at(pos), &frame, events);
                    GestureMemory::update_pointer(ctx, pos);
                }
            }
        }

        if response.drag_stopped() && GestureMemory::is_active_for(ctx, id) {
            if let Some(gesture) = GestureMemory::finish(ctx) {
                let pos = response.interact_pointer_pos().unwrap_or(gesture.last_pos);
                slot.interaction
                    .on_gesture_end(gesture.sample_at(pos), &frame, events);
            }
        }

        let kind = if ctx.input(|i| i.any_touches()) {
            ClickKind::Touch
        } else {
            ClickKind::Click
        };
        if response.hovered() && ctx.input(|i| i.pointer.primary_pressed()) {
            slot.interaction.pointer_down(kind);
        }
        if response.clicked() {
            if slot.interaction.is_mounted() {
                slot.interaction.tap(kind, events);
            } else {
                slot.interaction.pointer_up(kind, events);
            }
        }
        if response.double_clicked() {
            slot.interaction.double_click(events);
        }
        if response.secondary_clicked() {
            slot.interaction.context_menu(events);
        }

        refresh |= slot.interaction.needs_render();
        if refresh {
            slot.context = slot.interaction.item_context();
        }

        let context = &slot.context;
        let group_index = slot.interaction.item().group_index;
        let rect = preview_rect(context, &self.viewport, canvas, table, item_rect, group_index);
        if rect != item_rect {
            painter.rect_filled(item_rect, 3.0, self.theme.item_preview);
        }
        let fill = if context.selected {
            self.theme.item_selected_fill
        } else {
            self.theme.item_fill
        };
        painter.rect_filled(rect, 3.0, fill);
        painter.rect_stroke(rect, 3.0, Stroke::new(1.0, self.theme.item_border));
        if let Some(title) = &context.title {
            painter.with_clip_rect(rect.intersect(canvas)).text(
                rect.left_center() + Vec2::new(4.0, 0.0),
                Align2::LEFT_CENTER,
                title,
                FontId::proportional(13.0),
                self.theme.text_primary,
            );
        }
        if context.selected && !context.dragging {
            let handles = HandleRects::for_item(rect, &slot.source.resizable);
            draw_handles(painter, &handles, hovered_edge, self.theme.item_border);
        }

        if let Some(div_title) = slot.interaction.props().labels.div_title.clone() {
            response.on_hover_text(div_title);
        }
    }

    fn handle_row_input(&mut self, ctx: &egui::Context, response: &egui::Response, canvas: Rect) {
        let Some(rows) = &self.rows else {
            return;
        };
        let row_at = |pos: Pos2| rows.row_at((pos.y - canvas.top()) as f64);

        let mut row_events = Vec::new();
        if response.hovered() && ctx.input(|i| i.pointer.primary_pressed()) {
            if let Some((row, pos)) = response.hover_pos().and_then(|pos| Some((row_at(pos)?, pos))) {
                self.row_clicks.press(row, pos.x as f64, pos.y as f64);
            }
        }
        if ctx.input(|i| i.pointer.primary_released()) {
            if let Some(pos) = ctx.input(|i| i.pointer.latest_pos()) {
                row_events.extend(self.row_clicks.release(pos.x as f64, pos.y as f64));
            }
        }
        if let Some(row) = response
            .interact_pointer_pos()
            .and_then(|pos| row_at(pos))
        {
            if response.double_clicked() {
                row_events.push(RowEvent::DoubleClick(row));
            }
            if response.secondary_clicked() {
                row_events.push(RowEvent::ContextClick(row));
            }
        }

        for event in row_events {
            self.handle_row_event(event);
        }
    }
}

fn to_screen(canvas: Rect, dimensions: &Dimensions) -> Rect {
    Rect::from_min_size(
        canvas.min + Vec2::new(dimensions.left as f32, dimensions.top as f32),
        Vec2::new(dimensions.width.max(1.0) as f32, dimensions.height as f32),
    )
}

/// Where the item should be drawn while a gesture is running
fn preview_rect(
    context: &ItemContext,
    viewport: &Viewport,
    canvas: Rect,
    table: &GroupBoundaryTable,
    item_rect: Rect,
    group_index: usize,
) -> Rect {
    let row_top = |index: usize| table.tops().get(index).copied().unwrap_or(0.0) as f32;

    if let (true, Some(time), Some(group)) =
        (context.dragging, context.drag_time, context.drag_group_index)
    {
        let top = item_rect.top() - row_top(group_index) + row_top(group);
        let left = canvas.left() + viewport.x_for_time(time) as f32;
        return Rect::from_min_size(Pos2::new(left, top), item_rect.size());
    }

    let edge_x = |time| canvas.left() + viewport.x_for_time(time) as f32;
    match (context.resizing, context.resize_edge, context.resize_time) {
        (true, Some(ResizeEdge::Left), Some(time)) => {
            let left = edge_x(time).min(item_rect.right() - 1.0);
            Rect::from_x_y_ranges(left..=item_rect.right(), item_rect.y_range())
        }
        (true, Some(ResizeEdge::Right), Some(time)) => {
            let right = edge_x(time).max(item_rect.left() + 1.0);
            Rect::from_x_y_ranges(item_rect.left()..=right, item_rect.y_range())
        }
        _ => item_rect,
    }
}
