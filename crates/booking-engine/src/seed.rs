//! Sample cars and bookings for trying the engine out.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use uuid::Uuid;

use crate::model::{BookingDefinition, Car, RepeatOption, WeekdayMask};
use crate::store::Snapshot;

pub fn cars() -> Vec<Car> {
    [("Toyota", "Corolla"), ("Honda", "Civic"), ("Ford", "Focus")]
        .into_iter()
        .map(|(make, model)| Car {
            id: Uuid::new_v4(),
            make: make.to_string(),
            model: model.to_string(),
        })
        .collect()
}

struct Sample {
    car: usize,
    start: (i32, u32, u32),
    hours: ((u32, u32), (u32, u32)),
    repeat: RepeatOption,
    until: Option<(i32, u32, u32)>,
    weekday: Option<Weekday>,
}

const SAMPLES: [Sample; 6] = [
    Sample {
        car: 0,
        start: (2025, 2, 5),
        hours: ((10, 0), (12, 0)),
        repeat: RepeatOption::NoRepeat,
        until: None,
        weekday: None,
    },
    Sample {
        car: 1,
        start: (2025, 2, 10),
        hours: ((14, 0), (16, 0)),
        repeat: RepeatOption::Daily,
        until: Some((2025, 2, 20)),
        weekday: None,
    },
    Sample {
        car: 2,
        start: (2025, 2, 15),
        hours: ((9, 0), (10, 30)),
        repeat: RepeatOption::Weekly,
        until: Some((2025, 3, 31)),
        weekday: Some(Weekday::Mon),
    },
    Sample {
        car: 0,
        start: (2025, 3, 1),
        hours: ((11, 0), (13, 0)),
        repeat: RepeatOption::NoRepeat,
        until: None,
        weekday: None,
    },
    Sample {
        car: 1,
        start: (2025, 3, 7),
        hours: ((8, 0), (10, 0)),
        repeat: RepeatOption::Weekly,
        until: Some((2025, 3, 28)),
        weekday: Some(Weekday::Fri),
    },
    Sample {
        car: 2,
        start: (2025, 3, 15),
        hours: ((15, 0), (17, 0)),
        repeat: RepeatOption::Daily,
        until: Some((2025, 3, 20)),
        weekday: None,
    },
];

fn date((y, m, d): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn time((h, m): (u32, u32)) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

/// Sample bookings spread over `cars`, which must hold at least three cars.
pub fn bookings(cars: &[Car], requested_on: NaiveDateTime) -> Vec<BookingDefinition> {
    SAMPLES
        .iter()
        .filter_map(|s| {
            Some(BookingDefinition {
                id: Uuid::new_v4(),
                resource_id: cars.get(s.car)?.id,
                start_date: date(s.start)?,
                start_time: time(s.hours.0)?,
                end_time: time(s.hours.1)?,
                repeat_option: s.repeat,
                repeat_until: s.until.and_then(date),
                weekday_mask: s.weekday.map(|day| WeekdayMask::EMPTY.with(day)),
                requested_on,
                series_id: None,
            })
        })
        .collect()
}

/// A store snapshot holding the sample cars and bookings.
pub fn snapshot(requested_on: NaiveDateTime) -> Snapshot {
    let cars = cars();
    let bookings = bookings(&cars, requested_on);
    Snapshot { cars, bookings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_is_complete() {
        let snapshot = snapshot(NaiveDateTime::default());
        assert_eq!(snapshot.cars.len(), 3);
        assert_eq!(snapshot.bookings.len(), 6);
        assert!(snapshot.bookings.iter().all(|b| b.start_time < b.end_time));
    }

    #[test]
    fn too_few_cars_drops_their_bookings() {
        let cars = cars();
        let bookings = bookings(&cars[..1], NaiveDateTime::default());
        assert_eq!(bookings.len(), 2);
    }
}
