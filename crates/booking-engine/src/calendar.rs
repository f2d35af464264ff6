//! Calendar view -- many definitions expanded into one date-keyed map.
//!
//! The map is built in a single pass over all expanded occurrences and is not
//! modified afterwards. Within a day, occurrences are ordered by start time,
//! then end time, then definition id, so the view is deterministic regardless
//! of the order definitions were loaded in.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::UnboundedHorizon;
use crate::expander::{expand_with_horizon, DateWindow};
use crate::model::{BookingDefinition, Occurrence};

/// Occurrences grouped by date, in date order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calendar {
    days: BTreeMap<NaiveDate, Vec<Occurrence>>,
}

impl Calendar {
    /// Occurrences on `date`, empty if none.
    pub fn on(&self, date: NaiveDate) -> &[Occurrence] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that have at least one occurrence, with their occurrences.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[Occurrence])> {
        self.days.iter().map(|(date, occ)| (*date, occ.as_slice()))
    }

    /// All occurrences, ordered by date.
    pub fn occurrences(&self) -> impl Iterator<Item = &Occurrence> {
        self.days.values().flatten()
    }

    /// Number of occurrences across all days.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn into_occurrences(self) -> Vec<Occurrence> {
        self.days.into_values().flatten().collect()
    }
}

impl FromIterator<Occurrence> for Calendar {
    fn from_iter<I: IntoIterator<Item = Occurrence>>(iter: I) -> Self {
        let mut days = iter
            .into_iter()
            .fold(BTreeMap::<NaiveDate, Vec<Occurrence>>::new(), |mut days, occ| {
                days.entry(occ.date).or_default().push(occ);
                days
            });

        for occurrences in days.values_mut() {
            occurrences.sort_by_key(|o| (o.start_time, o.end_time, o.definition_id));
        }

        Calendar { days }
    }
}

/// Expand every definition over `window` and group the result by date.
pub fn build_calendar<'a, I>(definitions: I, window: DateWindow, policy: UnboundedHorizon) -> Calendar
where
    I: IntoIterator<Item = &'a BookingDefinition>,
{
    definitions
        .into_iter()
        .flat_map(|definition| expand_with_horizon(definition, window, policy))
        .collect()
}
