//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Field-level validation failures for task input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is empty after trimming.
    #[error("task title is required")]
    EmptyTitle,

    /// The trimmed title exceeds the configured character limit.
    #[error("task title must be {max} characters or less (got {actual})")]
    TitleTooLong {
        /// Configured maximum length in characters.
        max: usize,
        /// Actual trimmed length in characters.
        actual: usize,
    },

    /// The trimmed description exceeds the configured character limit.
    #[error("task description must be {max} characters or less (got {actual})")]
    DescriptionTooLong {
        /// Configured maximum length in characters.
        max: usize,
        /// Actual trimmed length in characters.
        actual: usize,
    },

    /// The due date could not be parsed as a calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDueDate(String),
}

/// Error returned while parsing quadrants from persistence or user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown quadrant: {0}")]
pub struct ParseQuadrantError(pub String);
