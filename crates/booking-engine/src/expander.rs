//! Recurrence expansion -- turns one booking definition into the concrete days
//! it occupies inside a date window.
//!
//! The walk moves one day at a time from the definition's start date to the
//! earlier of its series end and the window end, emitting every day the
//! definition's [`Recurrence`] includes. Expansion is lazy and holds no state
//! beyond the iterator itself, so calling [`expand`] twice with the same inputs
//! yields the same sequence.

use std::iter::FusedIterator;

use chrono::NaiveDate;

use crate::config::UnboundedHorizon;
use crate::error::{BookingError, Result};
use crate::model::{BookingDefinition, Occurrence, Recurrence};

/// An inclusive range of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// # Errors
    /// Returns `BookingError::Validation` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(BookingError::invalid(
                "Start date cannot be greater than end date.",
            ));
        }
        Ok(DateWindow { start, end })
    }

    /// The one-day window `[date, date]`.
    pub fn single(date: NaiveDate) -> Self {
        DateWindow {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The dates a recurrence lands on between `start_date` and `last_date`, inclusive.
///
/// This is the bare day walk, independent of any stored definition. The
/// conflict detector uses it to enumerate a candidate's prospective days.
#[derive(Debug, Clone)]
pub struct RecurrenceDates {
    recurrence: Recurrence,
    start_date: NaiveDate,
    last_date: NaiveDate,
    cursor: Option<NaiveDate>,
}

impl RecurrenceDates {
    pub fn new(recurrence: Recurrence, start_date: NaiveDate, last_date: NaiveDate) -> Self {
        let cursor = (!recurrence.is_void()).then_some(start_date);
        RecurrenceDates {
            recurrence,
            start_date,
            last_date,
            cursor,
        }
    }

    /// Skip every date before `from`.
    pub fn starting_at(mut self, from: NaiveDate) -> Self {
        self.cursor = self.cursor.map(|cursor| cursor.max(from));
        self
    }
}

impl Iterator for RecurrenceDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while let Some(candidate) = self.cursor {
            if candidate > self.last_date {
                self.cursor = None;
                break;
            }

            // The cursor never goes below start_date, so a non-repeating walk
            // has nothing left after its first step.
            self.cursor = if self.recurrence.ends_after_first_day() {
                None
            } else {
                candidate.succ_opt()
            };

            if self.recurrence.includes(self.start_date, candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

impl FusedIterator for RecurrenceDates {}

/// Lazy sequence of a definition's occurrences inside a window.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    definition: &'a BookingDefinition,
    dates: RecurrenceDates,
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        self.dates
            .next()
            .map(|date| Occurrence::of(self.definition, date))
    }
}

impl FusedIterator for Occurrences<'_> {}

/// Expand a definition into its occurrences within `window`.
///
/// Repeating definitions without `repeat_until` run to the end of the window
/// ([`UnboundedHorizon::ClampToQueryWindow`]). Use [`expand_with_horizon`] to
/// pick another policy.
pub fn expand(definition: &BookingDefinition, window: DateWindow) -> Occurrences<'_> {
    expand_with_horizon(definition, window, UnboundedHorizon::default())
}

/// Expand a definition into its occurrences within `window`, resolving a
/// missing `repeat_until` with `policy`.
///
/// An empty sequence is a normal result: the definition may lie outside the
/// window, or be a weekly booking with no weekdays selected.
pub fn expand_with_horizon(
    definition: &BookingDefinition,
    window: DateWindow,
    policy: UnboundedHorizon,
) -> Occurrences<'_> {
    let effective_end = definition
        .series_end(policy, window.end())
        .min(window.end());

    let dates = RecurrenceDates::new(definition.recurrence(), definition.start_date, effective_end)
        .starting_at(window.start());

    Occurrences { definition, dates }
}
