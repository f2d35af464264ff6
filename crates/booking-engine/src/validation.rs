//! Request validation, run before any request reaches the engine.
//!
//! Every failed rule is collected so the caller can report them all at once.

use crate::error::{BookingError, Result};
use crate::expander::DateWindow;
use crate::model::RepeatOption;
use crate::service::{BookingRequest, CalendarQuery};

pub fn validate_request(request: &BookingRequest) -> Result<()> {
    let mut errors = Vec::new();

    if request.resource_id.is_nil() {
        errors.push("Car id is required.");
    }
    if request.start_time >= request.end_time {
        errors.push("Start time must be earlier than end time.");
    }
    match request.repeat_until {
        None if request.repeat_option != RepeatOption::NoRepeat => {
            errors.push("Repeat-until date is required for recurring bookings.")
        }
        Some(until) if until < request.start_date => {
            errors.push("Repeat-until date cannot be earlier than the start date.")
        }
        _ => {}
    }
    if request.repeat_option == RepeatOption::Weekly
        && request.weekday_mask.is_none_or(|mask| mask.is_empty())
    {
        errors.push("At least one weekday is required for weekly bookings.");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(BookingError::Validation(
            errors.into_iter().map(String::from).collect(),
        ))
    }
}

/// Check the query dates and turn them into a window.
pub fn validate_query(query: &CalendarQuery) -> Result<DateWindow> {
    DateWindow::new(query.start, query.end)
}
