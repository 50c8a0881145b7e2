//! Upward notifications from an item's interaction.

use crate::models::item::DraggableItem;
use crate::models::viewport::TimeMs;

use super::gesture::{ClickKind, ResizeEdge};

/// Receives proposals and commits as gestures progress.
///
/// Every method defaults to doing nothing, so hosts only implement what
/// they care about. Calls are synchronous and their results are ignored.
pub trait InteractionListener {
    /// A move is proposed (gesture start and every changed sample)
    fn on_drag(&mut self, _item_id: &str, _time: TimeMs, _group_index: usize, _item: &DraggableItem) {}

    /// A move is committed at gesture end
    fn on_drop(
        &mut self,
        _item_id: &str,
        _time: TimeMs,
        _group_index: usize,
        _original_group_index: usize,
        _item: &DraggableItem,
    ) {
    }

    /// A resize is proposed; the edge is unknown at gesture start
    fn on_resizing(&mut self, _item_id: &str, _time: TimeMs, _edge: Option<ResizeEdge>) {}

    /// A resize is committed at gesture end
    fn on_resized(
        &mut self,
        _item_id: &str,
        _time: TimeMs,
        _edge: Option<ResizeEdge>,
        _time_delta: TimeMs,
        _item: &DraggableItem,
    ) {
    }

    fn on_select(&mut self, _item_id: &str, _kind: ClickKind, _item: &DraggableItem) {}

    fn on_double_click(&mut self, _item_id: &str, _item: &DraggableItem) {}

    fn on_context_menu(&mut self, _item_id: &str, _item: &DraggableItem) {}
}

/// Listener that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl InteractionListener for NoopListener {}

/// One recorded notification
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    Drag {
        item_id: String,
        time: TimeMs,
        group_index: usize,
    },
    Drop {
        item_id: String,
        time: TimeMs,
        group_index: usize,
        original_group_index: usize,
    },
    Resizing {
        item_id: String,
        time: TimeMs,
        edge: Option<ResizeEdge>,
    },
    Resized {
        item_id: String,
        time: TimeMs,
        edge: Option<ResizeEdge>,
        time_delta: TimeMs,
    },
    Select {
        item_id: String,
        kind: ClickKind,
    },
    DoubleClick {
        item_id: String,
    },
    ContextMenu {
        item_id: String,
    },
}

/// Collects notifications in order, for hosts that apply them after the
/// frame and for tests.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    events: Vec<InteractionEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl InteractionListener for EventQueue {
    fn on_drag(&mut self, item_id: &str, time: TimeMs, group_index: usize, _item: &DraggableItem) {
        self.events.push(InteractionEvent::Drag {
            item_id: item_id.to_string(),
            time,
            group_index,
        });
    }

    fn on_drop(
        &mut self,
        item_id: &str,
        time: TimeMs,
        group_index: usize,
        original_group_index: usize,
        _item: &DraggableItem,
    ) {
        self.events.push(InteractionEvent::Drop {
            item_id: item_id.to_string(),
            time,
            group_index,
            original_group_index,
        });
    }

    fn on_resizing(&mut self, item_id: &str, time: TimeMs, edge: Option<ResizeEdge>) {
        self.events.push(InteractionEvent::Resizing {
            item_id: item_id.to_string(),
            time,
            edge,
        });
    }

    fn on_resized(
        &mut self,
        item_id: &str,
        time: TimeMs,
        edge: Option<ResizeEdge>,
        time_delta: TimeMs,
        _item: &DraggableItem,
    ) {
        self.events.push(InteractionEvent::Resized {
            item_id: item_id.to_string(),
            time,
            edge,
            time_delta,
        });
    }

    fn on_select(&mut self, item_id: &str, kind: ClickKind, _item: &DraggableItem) {
        self.events.push(InteractionEvent::Select {
            item_id: item_id.to_string(),
            kind,
        });
    }

    fn on_double_click(&mut self, item_id: &str, _item: &DraggableItem) {
        self.events.push(InteractionEvent::DoubleClick {
            item_id: item_id.to_string(),
        });
    }

    fn on_context_menu(&mut self, item_id: &str, _item: &DraggableItem) {
        self.events.push(InteractionEvent::ContextMenu {
            item_id: item_id.to_string(),
        });
    }
}
