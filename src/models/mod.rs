// Module exports for models

pub mod error;
pub mod group;
pub mod item;
pub mod keys;
pub mod settings;
pub mod viewport;
