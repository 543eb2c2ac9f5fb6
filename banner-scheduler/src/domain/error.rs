use thiserror::Error;

use super::models::ItemId;

/// Errors reported by a [`ScheduleStore`](super::ports::outbound::ScheduleStore).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("item not found: {0}")]
    NotFound(ItemId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store rejected the update: {0}")]
    Rejected(String),
    #[error("{0}")]
    Unknown(String),
}

impl StoreError {
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }
}

/// Which of the two form fields a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeField::Start => write!(f, "Start time"),
            TimeField::End => write!(f, "End time"),
        }
    }
}

/// Errors that end a scheduling gesture or form submission.
///
/// None of these are retried; the user starts the action again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("{0} is required")]
    MissingTime(TimeField),
    #[error("{field} \"{input}\" is not a valid time (use HH:MM)")]
    InvalidTime { field: TimeField, input: String },
    #[error("End time must be after start time")]
    EndNotAfterStart,
    #[error("Schedule must be at least {minimum} minutes long")]
    TooShort { minimum: u32 },
    #[error("This time slot conflicts with \"{title}\". Please choose a different time.")]
    Conflict { title: String },
    #[error("no scheduled banner with id {0}")]
    UnknownItem(ItemId),
    #[error("\"{title}\" is still saving")]
    SavePending { title: String },
    #[error("another banner is already being dragged")]
    DragInProgress,
    #[error("no drag in progress")]
    NotDragging,
    #[error("Failed to update banner schedule: {0}")]
    Persistence(#[from] StoreError),
}
