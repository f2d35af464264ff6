use booking_engine::{
    build_calendar, find_conflict, seed, BookingDefinition, DateWindow, RepeatOption,
    UnboundedHorizon,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn fleet(copies: usize) -> Vec<BookingDefinition> {
    let snapshot = seed::snapshot(NaiveDateTime::default());
    (0..copies)
        .flat_map(|_| seed::bookings(&snapshot.cars, NaiveDateTime::default()))
        .collect()
}

fn bench_calendar(c: &mut Criterion) {
    let definitions = fleet(100);
    let window = DateWindow::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    )
    .unwrap();

    c.bench_function("calendar_600_definitions_half_year", |b| {
        b.iter(|| build_calendar(black_box(&definitions), window, UnboundedHorizon::default()))
    });
}

fn bench_conflict(c: &mut Criterion) {
    let existing = fleet(50);
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let mut candidate = existing[0].clone();
    candidate.start_date = start;
    candidate.repeat_option = RepeatOption::Daily;
    candidate.repeat_until = Some(start + Duration::days(30));
    candidate.start_time = chrono::NaiveTime::from_hms_opt(20, 0, 0).unwrap();
    candidate.end_time = chrono::NaiveTime::from_hms_opt(21, 0, 0).unwrap();

    c.bench_function("conflict_daily_month_no_hit", |b| {
        b.iter(|| find_conflict(black_box(&candidate), black_box(&existing), None))
    });
}

criterion_group!(benches, bench_calendar, bench_conflict);
criterion_main!(benches);
