mod app;
pub mod gesture;
pub mod handles;
pub mod theme;

pub use app::TimelineApp;
