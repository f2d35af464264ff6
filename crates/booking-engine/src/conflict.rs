//! Detect collisions between a candidate booking and existing bookings.
//!
//! Only definitions for the candidate's car are considered. Two bookings
//! collide on a date when both occur on it and their time ranges overlap
//! according to [`TimeRange::overlaps`](crate::overlap::TimeRange::overlaps).
//!
//! The detector runs in one of two modes:
//!
//! - **edit** (`exclude_id` is `Some`) -- the candidate's start date is the only
//!   date checked, and the definition being edited is ignored;
//! - **create** (`exclude_id` is `None`) -- every date of the candidate's own
//!   series is checked in order, stopping at the first collision.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::config::UnboundedHorizon;
use crate::expander::RecurrenceDates;
use crate::model::BookingDefinition;

/// The first collision found for a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub date: NaiveDate,
    /// The existing definition the candidate collides with.
    pub existing_id: Uuid,
    pub overlap_minutes: i64,
}

/// The days a candidate would occupy if accepted.
///
/// Runs from `start_date` to `repeat_until`. A candidate without
/// `repeat_until` covers its start date only.
pub fn candidate_dates(candidate: &BookingDefinition) -> RecurrenceDates {
    let last = candidate.series_end(UnboundedHorizon::StartDateOnly, candidate.start_date);
    RecurrenceDates::new(candidate.recurrence(), candidate.start_date, last)
}

/// Whether `candidate` collides with any of `existing`.
pub fn has_conflict(
    candidate: &BookingDefinition,
    existing: &[BookingDefinition],
    exclude_id: Option<Uuid>,
) -> bool {
    find_conflict(candidate, existing, exclude_id).is_some()
}

/// Find the first collision between `candidate` and `existing`.
///
/// Existing definitions without `repeat_until` are treated as open-ended
/// ([`UnboundedHorizon::ClampToQueryWindow`]).
pub fn find_conflict(
    candidate: &BookingDefinition,
    existing: &[BookingDefinition],
    exclude_id: Option<Uuid>,
) -> Option<Conflict> {
    find_conflict_with_horizon(candidate, existing, exclude_id, UnboundedHorizon::default())
}

/// Find the first collision, resolving open-ended existing definitions with `policy`.
pub fn find_conflict_with_horizon(
    candidate: &BookingDefinition,
    existing: &[BookingDefinition],
    exclude_id: Option<Uuid>,
    policy: UnboundedHorizon,
) -> Option<Conflict> {
    let others: Vec<&BookingDefinition> = existing
        .iter()
        .filter(|d| d.resource_id == candidate.resource_id && Some(d.id) != exclude_id)
        .collect();

    if others.is_empty() {
        return None;
    }

    let range = candidate.time_range();
    let conflict_on = |date: NaiveDate| {
        others
            .iter()
            .find(|d| d.occurs_on(date, policy) && d.time_range().overlaps(&range))
            .map(|d| Conflict {
                date,
                existing_id: d.id,
                overlap_minutes: d.time_range().overlap_minutes(&range),
            })
    };

    match exclude_id {
        Some(_) => conflict_on(candidate.start_date),
        None => candidate_dates(candidate).find_map(conflict_on),
    }
}
