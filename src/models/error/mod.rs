// Error module
// Failures at the record and viewport boundary

use thiserror::Error;

/// Errors raised while reading host data into timeline models.
///
/// The interaction resolver itself never fails; these only surface when a
/// host record or viewport is converted into the typed models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("viewport must have visible_end > visible_start and a positive width (start={start}, end={end}, width={width})")]
    InvalidViewport { start: i64, end: i64, width: f64 },

    #[error("record has no field '{key}'")]
    MissingField { key: String },

    #[error("field '{key}' has an unusable value: {value}")]
    InvalidField { key: String, value: String },

    #[error("invalid item: {0}")]
    InvalidItem(String),
}
