//! Error types for booking operations.
//!
//! The pure engine modules never fail on expected conditions: an empty
//! expansion or a detected conflict are ordinary return values. These errors
//! are raised by the boundary layer (validation, service, store).

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BookingError {
    /// One or more request fields failed validation. Every failed rule is listed.
    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    /// The candidate collides with an existing booking on `date`.
    #[error("Booking conflict on {date}.")]
    Conflict { date: NaiveDate, existing_id: Uuid },

    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    /// A calendar query matched no occurrences.
    #[error("No bookings found for the given date range.")]
    NoBookings,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BookingError {
    /// Shorthand for a validation error with a single message.
    pub fn invalid(message: impl Into<String>) -> Self {
        BookingError::Validation(vec![message.into()])
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
