//! Error types for dungeon generation

use thiserror::Error;

/// Errors raised by the generation pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    /// A configuration value is outside its valid range.
    /// Raised before any stage runs.
    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A checked grid access landed outside the grid
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    /// No room pair is far enough apart to serve as start and goal.
    /// Not fatal: the layout is still produced without a designation.
    #[error("no start/goal pair: farthest rooms are {best:.2} apart, {required:.2} required")]
    NoValidStartGoal { best: f64, required: f64 },
}

impl GenError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GenError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for generation operations
pub type GenResult<T> = Result<T, GenError>;
