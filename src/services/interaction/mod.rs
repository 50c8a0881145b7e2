// Interaction service
// Drag and resize resolution for timeline items
//
// Pointer samples come in from a gesture source, proposed and committed
// times and group indices go out to an InteractionListener. Snapping,
// group changes and the host validator are applied on every sample.

pub mod coords;
pub mod gesture;
pub mod listener;
pub mod resolver;
pub mod snap;
pub mod validator;

pub use coords::{InteractionFrame, PointerSample};
pub use gesture::{
    Capabilities, CapabilityGate, ClickKind, EdgeAffordance, GestureKind, GestureSource,
    ResizableConfig, ResizeEdge,
};
pub use listener::{EventQueue, InteractionEvent, InteractionListener, NoopListener};
pub use resolver::{
    ItemContext, ItemInteraction, ItemLabels, ItemProps, ItemRenderState, UtcOffsetSource,
};
pub use validator::{
    BoundsValidator, MoveResizeValidator, Validation, ValidationAction, ValidationRequest,
};
