//! Booking service -- the calendar query and create/update flows over a store.
//!
//! This is the layer that loads definitions, runs validation, hands the data
//! to the expander and conflict detector, and writes accepted bookings back.
//! [`BookingService::submit`] takes `&mut self`, so one service instance never
//! interleaves two check-then-write sequences.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calendar::build_calendar;
use crate::config::{EngineOptions, Materialization};
use crate::conflict::{candidate_dates, find_conflict_with_horizon, Conflict};
use crate::error::{BookingError, Result};
use crate::model::{BookingDefinition, Occurrence, RepeatOption, ResourceLabel, WeekdayMask};
use crate::store::BookingStore;
use crate::validation::{validate_query, validate_request};

/// A calendar request: every occurrence between `start` and `end`, inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarQuery {
    #[serde(default)]
    pub resource_id: Option<Uuid>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A create (no `id`) or update (`id` set) request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub resource_id: Uuid,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub repeat_option: RepeatOption,
    #[serde(default)]
    pub repeat_until: Option<NaiveDate>,
    #[serde(default)]
    pub weekday_mask: Option<WeekdayMask>,
}

impl BookingRequest {
    /// The id of the booking being edited. A nil id counts as a create.
    pub fn existing_id(&self) -> Option<Uuid> {
        self.id.filter(|id| !id.is_nil())
    }

    fn to_definition(&self, id: Uuid, requested_on: NaiveDateTime) -> BookingDefinition {
        BookingDefinition {
            id,
            resource_id: self.resource_id,
            start_date: self.start_date,
            start_time: self.start_time,
            end_time: self.end_time,
            repeat_option: self.repeat_option,
            repeat_until: self.repeat_until,
            weekday_mask: self.weekday_mask,
            requested_on,
            series_id: None,
        }
    }
}

/// What an accepted request did to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum BookingOutcome {
    Created { ids: Vec<Uuid> },
    Updated { id: Uuid },
}

pub struct BookingService<S> {
    store: S,
    options: EngineOptions,
}

impl<S: BookingStore> BookingService<S> {
    pub fn new(store: S, options: EngineOptions) -> Self {
        BookingService { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Expand stored bookings into a date-ordered list of occurrences, each
    /// labelled with its car's make and model.
    ///
    /// # Errors
    /// `Validation` for a reversed window, `NoBookings` when nothing falls
    /// inside it.
    pub fn calendar(&self, query: &CalendarQuery) -> Result<Vec<Occurrence>> {
        let window = validate_query(query)?;
        let definitions = self.store.bookings(query.resource_id)?;
        let calendar = build_calendar(&definitions, window, self.options.unbounded_horizon);

        debug!(
            definitions = definitions.len(),
            occurrences = calendar.len(),
            "expanded calendar"
        );

        if calendar.is_empty() {
            return Err(BookingError::NoBookings);
        }

        let cars = match query.resource_id {
            Some(id) => self.store.car(id)?.into_iter().collect(),
            None => self.store.cars()?,
        };
        let labels: HashMap<Uuid, ResourceLabel> =
            cars.iter().map(|car| (car.id, car.label())).collect();

        Ok(calendar
            .into_occurrences()
            .into_iter()
            .map(|occ| {
                let label = labels
                    .get(&occ.resource_id)
                    .cloned()
                    .unwrap_or_else(ResourceLabel::unknown);
                occ.with_label(label)
            })
            .collect())
    }

    /// Run validation and conflict detection without writing anything.
    pub fn check(&self, request: &BookingRequest) -> Result<Option<Conflict>> {
        validate_request(request)?;

        let candidate = match request.existing_id() {
            Some(id) => {
                self.store.booking(id)?.ok_or(BookingError::NotFound(id))?;
                request.to_definition(id, NaiveDateTime::default())
            }
            None => {
                let candidate = request.to_definition(Uuid::new_v4(), NaiveDateTime::default());
                require_dates(&candidate)?;
                candidate
            }
        };

        self.detect(&candidate, request.existing_id())
    }

    /// Validate, check for conflicts, and persist a booking.
    ///
    /// An update replaces the stored definition. A create stores the candidate
    /// according to [`Materialization`]. Nothing is written unless the whole
    /// request is accepted.
    ///
    /// # Errors
    /// `Validation`, `NotFound` for an update of an unknown id, `Conflict` with
    /// the first colliding date, or a store error.
    pub fn submit(
        &mut self,
        request: BookingRequest,
        now: NaiveDateTime,
    ) -> Result<BookingOutcome> {
        validate_request(&request)?;

        match request.existing_id() {
            Some(id) => self.update(&request, id, now),
            None => self.create(&request, now),
        }
    }

    fn update(
        &mut self,
        request: &BookingRequest,
        id: Uuid,
        now: NaiveDateTime,
    ) -> Result<BookingOutcome> {
        let existing = self.store.booking(id)?.ok_or(BookingError::NotFound(id))?;

        let mut candidate = request.to_definition(id, now);
        candidate.series_id = existing.series_id;

        if let Some(conflict) = self.detect(&candidate, Some(id))? {
            return Err(self.reject(conflict));
        }

        self.store.update(candidate)?;
        info!(booking = %id, "booking updated");
        Ok(BookingOutcome::Updated { id })
    }

    fn create(&mut self, request: &BookingRequest, now: NaiveDateTime) -> Result<BookingOutcome> {
        let candidate = request.to_definition(Uuid::new_v4(), now);

        require_dates(&candidate)?;

        if let Some(conflict) = self.detect(&candidate, None)? {
            return Err(self.reject(conflict));
        }

        let definitions = self.materialize(candidate);
        let ids: Vec<Uuid> = definitions.iter().map(|d| d.id).collect();
        self.store.insert(definitions)?;
        info!(
            car = %request.resource_id,
            count = ids.len(),
            "booking created"
        );
        Ok(BookingOutcome::Created { ids })
    }

    fn detect(
        &self,
        candidate: &BookingDefinition,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Conflict>> {
        let existing = self.store.bookings(Some(candidate.resource_id))?;
        Ok(find_conflict_with_horizon(
            candidate,
            &existing,
            exclude_id,
            self.options.unbounded_horizon,
        ))
    }

    fn reject(&self, conflict: Conflict) -> BookingError {
        warn!(
            date = %conflict.date,
            existing = %conflict.existing_id,
            "booking conflict"
        );
        BookingError::Conflict {
            date: conflict.date,
            existing_id: conflict.existing_id,
        }
    }

    /// Turn an accepted create candidate into the definitions to store.
    fn materialize(&self, candidate: BookingDefinition) -> Vec<BookingDefinition> {
        match (self.options.materialization, candidate.repeat_option) {
            (Materialization::Series, _) | (_, RepeatOption::NoRepeat) => vec![candidate],
            (Materialization::PerOccurrence, _) => candidate_dates(&candidate)
                .map(|date| BookingDefinition {
                    id: Uuid::new_v4(),
                    start_date: date,
                    repeat_option: RepeatOption::NoRepeat,
                    repeat_until: None,
                    weekday_mask: None,
                    series_id: Some(candidate.id),
                    ..candidate.clone()
                })
                .collect(),
        }
    }
}

/// Create-mode detection walks the candidate's dates, so a candidate with none
/// would pass unchecked.
fn require_dates(candidate: &BookingDefinition) -> Result<()> {
    if candidate_dates(candidate).next().is_none() {
        return Err(BookingError::invalid(
            "Booking has no occurrences between its start and repeat-until dates.",
        ));
    }
    Ok(())
}
