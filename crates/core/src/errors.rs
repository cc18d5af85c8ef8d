use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed slot skipped: {0}")]
    MalformedSlot(String),

    #[error("Slot not found: {0}")]
    NotFound(String),
}

pub type SlotResult<T> = Result<T, SlotError>;
