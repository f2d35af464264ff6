//! Booking records and the values derived from them.
//!
//! [`BookingDefinition`] is the stored shape of a booking: one row per booking,
//! possibly standing for many days. [`Occurrence`] is one concrete day of a
//! definition, produced by the [`expander`](crate::expander) and never stored.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::UnboundedHorizon;
use crate::overlap::TimeRange;

/// How a booking repeats, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RepeatOption {
    #[default]
    NoRepeat,
    Daily,
    Weekly,
}

/// A set of weekdays, one bit per day counted from Sunday.
///
/// Sunday = 1, Monday = 2, Tuesday = 4, ... Saturday = 64. Serialized as the raw
/// integer so stored masks stay compatible with existing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdayMask(u8);

const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

impl WeekdayMask {
    pub const EMPTY: WeekdayMask = WeekdayMask(0);
    const ALL: u8 = 0b0111_1111;

    /// Build a mask from raw bits. Bits above Saturday are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        WeekdayMask(bits & Self::ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    fn bit(day: Weekday) -> u8 {
        1u8 << day.num_days_from_sunday()
    }

    /// Return a copy of this mask with `day` added.
    pub fn with(self, day: Weekday) -> Self {
        WeekdayMask(self.0 | Self::bit(day))
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 & Self::ALL == 0
    }

    /// The weekdays in this mask, Sunday first.
    pub fn weekdays(self) -> impl Iterator<Item = Weekday> {
        WEEK.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdayMask {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter().fold(WeekdayMask::EMPTY, WeekdayMask::with)
    }
}

/// The recurrence of a definition as a tagged variant.
///
/// Each variant owns its inclusion rule; see [`Recurrence::includes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    NoRepeat,
    Daily,
    Weekly { mask: Option<WeekdayMask> },
}

impl Recurrence {
    /// Does a series starting on `start_date` land on `date`?
    ///
    /// Range bounds are not checked here; callers walk only dates inside the
    /// series range.
    pub fn includes(self, start_date: NaiveDate, date: NaiveDate) -> bool {
        match self {
            Recurrence::NoRepeat => date == start_date,
            Recurrence::Daily => true,
            Recurrence::Weekly { mask } => mask.is_some_and(|m| m.contains(date.weekday())),
        }
    }

    /// True when no date can ever be included after `start_date`.
    pub(crate) fn ends_after_first_day(self) -> bool {
        matches!(self, Recurrence::NoRepeat)
    }

    /// True when no date can ever be included at all.
    pub(crate) fn is_void(self) -> bool {
        match self {
            Recurrence::Weekly { mask } => mask.is_none_or(WeekdayMask::is_empty),
            _ => false,
        }
    }
}

/// A stored booking for one car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDefinition {
    pub id: Uuid,
    pub resource_id: Uuid,
    /// Date of the first occurrence.
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub repeat_option: RepeatOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_until: Option<NaiveDate>,
    /// Only consulted for weekly bookings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_mask: Option<WeekdayMask>,
    pub requested_on: NaiveDateTime,
    /// Shared by every definition materialized from one create request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<Uuid>,
}

impl BookingDefinition {
    pub fn recurrence(&self) -> Recurrence {
        match self.repeat_option {
            RepeatOption::NoRepeat => Recurrence::NoRepeat,
            RepeatOption::Daily => Recurrence::Daily,
            RepeatOption::Weekly => Recurrence::Weekly {
                mask: self.weekday_mask,
            },
        }
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Last date the series may cover.
    ///
    /// A stored `repeat_until` always wins. Without one, `policy` decides:
    /// `ClampToQueryWindow` runs the series up to `horizon`, `StartDateOnly`
    /// stops at `start_date`.
    pub fn series_end(&self, policy: UnboundedHorizon, horizon: NaiveDate) -> NaiveDate {
        match (self.repeat_until, policy) {
            (Some(until), _) => until,
            (None, UnboundedHorizon::ClampToQueryWindow) => horizon,
            (None, UnboundedHorizon::StartDateOnly) => self.start_date,
        }
    }

    /// Whether this definition has an occurrence on `date`.
    ///
    /// Same answer as expanding over the one-day window `[date, date]`, without
    /// walking from `start_date`.
    pub fn occurs_on(&self, date: NaiveDate, policy: UnboundedHorizon) -> bool {
        date >= self.start_date
            && date <= self.series_end(policy, date)
            && self.recurrence().includes(self.start_date, date)
    }
}

/// Display fields for the booked car, attached after expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLabel {
    pub make: String,
    pub model: String,
}

impl ResourceLabel {
    /// Label used when the car record is missing.
    pub fn unknown() -> Self {
        ResourceLabel {
            make: "Unknown Make".to_string(),
            model: String::new(),
        }
    }

    /// "Make Model", as shown in calendar listings.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model).trim().to_string()
    }
}

/// A car that can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    pub make: String,
    pub model: String,
}

impl Car {
    pub fn label(&self) -> ResourceLabel {
        ResourceLabel {
            make: self.make.clone(),
            model: self.model.clone(),
        }
    }
}

/// One concrete day of a booking definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub definition_id: Uuid,
    pub resource_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub repeat_option: RepeatOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_mask: Option<WeekdayMask>,
    pub requested_on: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceLabel>,
}

impl Occurrence {
    pub(crate) fn of(definition: &BookingDefinition, date: NaiveDate) -> Self {
        Occurrence {
            definition_id: definition.id,
            resource_id: definition.resource_id,
            date,
            start_time: definition.start_time,
            end_time: definition.end_time,
            repeat_option: definition.repeat_option,
            repeat_until: definition.repeat_until,
            weekday_mask: definition.weekday_mask,
            requested_on: definition.requested_on,
            resource: None,
        }
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    pub fn with_label(mut self, label: ResourceLabel) -> Self {
        self.resource = Some(label);
        self
    }
}
