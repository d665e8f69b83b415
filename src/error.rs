//! Error types for scheduling operations.

use chrono::NaiveDateTime;

/// Custom error type for the scheduling core
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Slot {start} - {end} conflicts with existing event {existing}")]
    Conflict { start: NaiveDateTime, end: NaiveDateTime, existing: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Slot index {index} is out of range ({len} slots suggested)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("No available slots found in the next {horizon_days} days")]
    NoAvailability { horizon_days: u32 },
}

pub type Result<T> = std::result::Result<T, SchedulerError>;

impl SchedulerError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SchedulerError::InvalidInput(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        SchedulerError::InvalidState(message.into())
    }
}
