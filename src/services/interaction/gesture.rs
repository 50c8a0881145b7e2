//! Gesture kinds, capability flags and the gesture source seam.

use crate::models::viewport::TimeMs;

/// Which edge of an item a resize gesture moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Left,
    Right,
}

impl ResizeEdge {
    /// Resolve the edge from the first resize sample: the left edge is
    /// being dragged exactly when the box's left side moved.
    pub fn from_left_delta(left_edge_delta: f64) -> Self {
        if left_edge_delta != 0.0 {
            ResizeEdge::Left
        } else {
            ResizeEdge::Right
        }
    }
}

/// Kind of gesture a source reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
}

/// How a mouse or touch interaction reached the item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Click,
    Touch,
}

/// State of one in-flight gesture
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GestureState {
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DragState {
    pub origin: (f64, f64),
    /// Item start minus the time under the pointer at gesture start
    pub time_offset: f64,
    pub proposed_time: TimeMs,
    pub group_delta: i64,
    pub last_reported: Option<(TimeMs, i64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResizeState {
    pub origin_x: f64,
    /// Unknown until the first move sample
    pub edge: Option<ResizeEdge>,
    pub proposed_time: TimeMs,
}

/// What the item currently allows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub can_move: bool,
    pub can_resize_left: bool,
    pub can_resize_right: bool,
}

impl Capabilities {
    pub fn can_resize(&self) -> bool {
        self.can_resize_left || self.can_resize_right
    }
}

/// Where a resize can be grabbed on one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeAffordance {
    Disabled,
    /// The whole edge of the item box
    Edge,
    /// A dedicated handle element
    Handle,
}

impl EdgeAffordance {
    fn for_edge(enabled: bool, use_handle: bool) -> Self {
        match (enabled, use_handle) {
            (false, _) => EdgeAffordance::Disabled,
            (true, true) => EdgeAffordance::Handle,
            (true, false) => EdgeAffordance::Edge,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, EdgeAffordance::Disabled)
    }
}

/// Resizable configuration pushed to a gesture source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizableConfig {
    pub enabled: bool,
    pub left: EdgeAffordance,
    pub right: EdgeAffordance,
}

impl Default for ResizableConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            left: EdgeAffordance::Disabled,
            right: EdgeAffordance::Disabled,
        }
    }
}

impl ResizableConfig {
    pub fn from_capabilities(capabilities: &Capabilities, use_resize_handle: bool) -> Self {
        Self {
            enabled: capabilities.can_resize(),
            left: EdgeAffordance::for_edge(capabilities.can_resize_left, use_resize_handle),
            right: EdgeAffordance::for_edge(capabilities.can_resize_right, use_resize_handle),
        }
    }
}

/// Something that recognises drag and resize gestures on an item and feeds
/// them to the resolver.
pub trait GestureSource {
    fn configure_draggable(&mut self, enabled: bool);
    fn configure_resizable(&mut self, config: ResizableConfig);
}

/// Keeps a gesture source in step with the item's capabilities.
///
/// The source is mounted the first time the item becomes selected; after
/// that it is only reconfigured when a flag actually changed.
#[derive(Debug, Clone, Default)]
pub struct CapabilityGate {
    mounted: bool,
    applied: Capabilities,
}

impl CapabilityGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn applied(&self) -> Capabilities {
        self.applied
    }

    /// Apply `next` to the source. Returns true when anything was pushed.
    pub fn reconcile(
        &mut self,
        selected: bool,
        next: Capabilities,
        use_resize_handle: bool,
        source: &mut dyn GestureSource,
    ) -> bool {
        if !self.mounted {
            if !selected {
                return false;
            }
            log::debug!("Mounting gesture source with {:?}", next);
            source.configure_resizable(ResizableConfig::from_capabilities(&next, use_resize_handle));
            source.configure_draggable(next.can_move);
            self.mounted = true;
            self.applied = next;
            return true;
        }

        let mut changed = false;
        if self.applied.can_resize_left != next.can_resize_left
            || self.applied.can_resize_right != next.can_resize_right
        {
            source.configure_resizable(ResizableConfig::from_capabilities(&next, use_resize_handle));
            changed = true;
        }
        if self.applied.can_move != next.can_move {
            source.configure_draggable(next.can_move);
            changed = true;
        }
        if changed {
            log::debug!("Reconfigured gesture source: {:?} -> {:?}", self.applied, next);
        }
        self.applied = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        pub Source {}
        impl GestureSource for Source {
            fn configure_draggable(&mut self, enabled: bool);
            fn configure_resizable(&mut self, config: ResizableConfig);
        }
    }

    fn caps(can_move: bool, left: bool, right: bool) -> Capabilities {
        Capabilities {
            can_move,
            can_resize_left: left,
            can_resize_right: right,
        }
    }

    #[test]
    fn test_edge_from_left_delta() {
        assert_eq!(ResizeEdge::from_left_delta(-3.0), ResizeEdge::Left);
        assert_eq!(ResizeEdge::from_left_delta(0.0), ResizeEdge::Right);
    }

    #[test]
    fn test_resizable_config_uses_handles_when_asked() {
        let config = ResizableConfig::from_capabilities(&caps(true, false, true), true);
        assert!(config.enabled);
        assert_eq!(config.left, EdgeAffordance::Disabled);
        assert_eq!(config.right, EdgeAffordance::Handle);

        let config = ResizableConfig::from_capabilities(&caps(true, false, false), false);
        assert!(!config.enabled);
    }

    #[test]
    fn test_gate_does_not_mount_until_selected() {
        let mut source = MockSource::new();
        source.expect_configure_draggable().never();
        source.expect_configure_resizable().never();

        let mut gate = CapabilityGate::new();
        assert!(!gate.reconcile(false, caps(false, false, false), false, &mut source));
        assert!(!gate.is_mounted());
    }

    #[test]
    fn test_gate_mounts_once_then_only_pushes_changes() {
        let mut source = MockSource::new();
        source
            .expect_configure_resizable()
            .times(1)
            .return_const(());
        source
            .expect_configure_draggable()
            .with(eq(true))
            .times(1)
            .return_const(());

        let mut gate = CapabilityGate::new();
        assert!(gate.reconcile(true, caps(true, false, true), false, &mut source));
        assert!(gate.is_mounted());
        // Same flags again: nothing to push
        assert!(!gate.reconcile(true, caps(true, false, true), false, &mut source));
    }

    #[test]
    fn test_gate_reconfigures_changed_flags() {
        let mut source = MockSource::new();
        source.expect_configure_resizable().times(2).return_const(());
        source.expect_configure_draggable().times(2).return_const(());

        let mut gate = CapabilityGate::new();
        gate.reconcile(true, caps(true, true, true), false, &mut source);
        // Deselected: everything turns off
        assert!(gate.reconcile(false, caps(false, false, false), false, &mut source));
        assert_eq!(gate.applied(), caps(false, false, false));
    }
}
