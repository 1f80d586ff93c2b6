//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised while validating configuration or decoding policy actions.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("splitting level {0} is outside 0..=3")]
    InvalidSplittingLevel(u8),

    #[error("shifts per day {0} is outside 1..=4")]
    InvalidShiftsPerDay(u8),

    #[error("{steps_per_day} steps per day cannot be divided into {shifts_per_day} equal shifts")]
    IndivisibleShifts {
        steps_per_day:  u32,
        shifts_per_day: u8,
    },

    #[error("population must contain at least one worker")]
    NoAgents,

    #[error("{agents} workers do not fit on a grid of {cells} cells")]
    TooManyAgents { agents: usize, cells: usize },

    #[error("grid must have a non-zero width and height")]
    EmptyGrid,

    #[error("malformed action: {0}")]
    MalformedAction(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ff-core`.
pub type CoreResult<T> = Result<T, CoreError>;
