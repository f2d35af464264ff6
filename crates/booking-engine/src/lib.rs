//! # booking-engine
//!
//! Recurrence expansion and conflict detection for car bookings that repeat
//! daily or weekly.
//!
//! A booking is stored as a single *definition* (start date, time-of-day range,
//! repeat option, optional end date and weekday mask). The engine turns those
//! definitions into concrete per-day occurrences for a calendar window, and
//! decides whether a new or edited booking collides with what is already booked
//! for the same car. All times are naive local times.
//!
//! ## Modules
//!
//! - [`model`] — booking definitions, recurrence variants, weekday masks, occurrences
//! - [`overlap`] — the time-of-day overlap predicate shared by every comparison
//! - [`expander`] — definition + date window → lazy sequence of occurrences
//! - [`conflict`] — candidate booking + existing definitions → first conflict
//! - [`calendar`] — immutable date-keyed view over many expanded definitions
//! - [`config`] — engine policies (open-ended horizon, materialization)
//! - [`store`] — storage trait and an in-memory, JSON-snapshot implementation
//! - [`validation`] — request validation performed before the engine runs
//! - [`service`] — calendar query and create/update flow over a store
//! - [`seed`] — sample cars and bookings
//! - [`error`] — Error types

pub mod calendar;
pub mod config;
pub mod conflict;
pub mod error;
pub mod expander;
pub mod model;
pub mod overlap;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;

pub use calendar::{build_calendar, Calendar};
pub use config::{EngineOptions, Materialization, UnboundedHorizon};
pub use conflict::{
    candidate_dates, find_conflict, find_conflict_with_horizon, has_conflict, Conflict,
};
pub use error::BookingError;
pub use expander::{expand, expand_with_horizon, DateWindow, Occurrences, RecurrenceDates};
pub use model::{
    BookingDefinition, Car, Occurrence, Recurrence, RepeatOption, ResourceLabel, WeekdayMask,
};
pub use overlap::TimeRange;
pub use service::{BookingOutcome, BookingRequest, BookingService, CalendarQuery};
pub use store::{BookingStore, MemoryStore, Snapshot};
