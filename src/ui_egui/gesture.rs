use egui::{Context, Id, Pos2, Sense};

use crate::services::interaction::{
    GestureKind, GestureSource, PointerSample, ResizableConfig, ResizeEdge,
};

/// Gesture configuration egui applies to one item
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemGestureSource {
    pub draggable: bool,
    pub resizable: ResizableConfig,
}

impl ItemGestureSource {
    /// Items without any gesture only sense clicks, so a press never turns
    /// into a drag.
    pub fn sense(&self) -> Sense {
        if self.draggable || self.resizable.enabled {
            Sense::click_and_drag()
        } else {
            Sense::click()
        }
    }

    pub fn accepts(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Drag => self.draggable,
            GestureKind::Resize => self.resizable.enabled,
        }
    }
}

impl GestureSource for ItemGestureSource {
    fn configure_draggable(&mut self, enabled: bool) {
        self.draggable = enabled;
    }

    fn configure_resizable(&mut self, config: ResizableConfig) {
        self.resizable = config;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveGesture {
    pub item_id: String,
    pub kind: GestureKind,
    /// Edge grabbed by a resize
    pub edge: Option<ResizeEdge>,
    pub origin: Pos2,
    pub last_pos: Pos2,
}

impl ActiveGesture {
    pub fn new(
        item_id: impl Into<String>,
        kind: GestureKind,
        edge: Option<ResizeEdge>,
        origin: Pos2,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
            edge,
            origin,
            last_pos: origin,
        }
    }

    /// Sample for a pointer move to `pos`. A left-edge resize moves the
    /// item's left side along with the pointer.
    pub fn sample_at(&self, pos: Pos2) -> PointerSample {
        let sample = PointerSample::at(pos.x as f64, pos.y as f64);
        match (self.kind, self.edge) {
            (GestureKind::Resize, Some(ResizeEdge::Left)) => {
                sample.with_left_edge_delta((pos.x - self.last_pos.x) as f64)
            }
            _ => sample,
        }
    }

    /// A resize sample without horizontal motion says nothing about the
    /// edge and is skipped.
    pub fn should_forward(&self, pos: Pos2) -> bool {
        match self.kind {
            GestureKind::Drag => pos != self.last_pos,
            GestureKind::Resize => pos.x != self.last_pos.x,
        }
    }
}

pub struct GestureMemory;

impl GestureMemory {
    fn storage_id() -> Id {
        Id::new("timeline_item_gesture_state")
    }

    pub fn begin(ctx: &Context, gesture: ActiveGesture) {
        ctx.memory_mut(|mem| {
            mem.data.insert_temp(Self::storage_id(), gesture);
        });
    }

    pub fn active(ctx: &Context) -> Option<ActiveGesture> {
        ctx.memory_mut(|mem| mem.data.get_temp::<ActiveGesture>(Self::storage_id()))
    }

    pub fn is_active_for(ctx: &Context, item_id: &str) -> bool {
        Self::active(ctx).map_or(false, |gesture| gesture.item_id == item_id)
    }

    pub fn update_pointer(ctx: &Context, pos: Pos2) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(mut state) = mem.data.get_temp::<ActiveGesture>(id) {
                state.last_pos = pos;
                mem.data.insert_temp(id, state);
            }
        });
    }

    pub fn finish(ctx: &Context) -> Option<ActiveGesture> {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            let current = mem.data.get_temp::<ActiveGesture>(id);
            if current.is_some() {
                mem.data.remove::<ActiveGesture>(id);
            }
            current
        })
    }
}
