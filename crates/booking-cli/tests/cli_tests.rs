//! Integration tests for the `carbook` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the seed, cars,
//! calendar, book and check subcommands through the actual binary, against a
//! copy of the fixture store written to /tmp.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

const COROLLA: &str = "00000000-0000-0000-0000-000000000001";
const CIVIC: &str = "00000000-0000-0000-0000-000000000002";

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: copy the fixture store to a per-test path and return that path.
fn temp_store(test: &str) -> String {
    let path = format!("/tmp/carbook-test-{}.json", test);
    std::fs::copy(fixture("store.json"), &path).expect("store.json fixture must exist");
    path
}

fn carbook() -> Command {
    Command::cargo_bin("carbook").unwrap()
}

/// Helper: run `calendar` for February and parse the JSON output.
fn february(store: &str, car: Option<&str>) -> Vec<serde_json::Value> {
    let mut cmd = carbook();
    cmd.args([
        "--store",
        store,
        "calendar",
        "--from",
        "2025-02-01",
        "--to",
        "2025-02-28",
    ]);
    if let Some(car) = car {
        cmd.args(["--car", car]);
    }
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("calendar output must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// calendar
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn calendar_lists_all_occurrences() {
    let store = temp_store("calendar-all");
    let occurrences = february(&store, None);

    assert_eq!(occurrences.len(), 5, "one single booking plus four Mondays");
    let dates: Vec<&str> = occurrences
        .iter()
        .map(|o| o["date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2025-02-03", "2025-02-05", "2025-02-10", "2025-02-17", "2025-02-24"]
    );
}

#[test]
fn calendar_filters_by_car_and_labels() {
    let store = temp_store("calendar-car");
    let occurrences = february(&store, Some(CIVIC));

    assert_eq!(occurrences.len(), 4);
    for occ in &occurrences {
        assert_eq!(occ["resource_id"], CIVIC);
        assert_eq!(occ["resource"]["make"], "Honda");
        assert_eq!(occ["resource"]["model"], "Civic");
    }
}

#[test]
fn calendar_reversed_range_fails() {
    let store = temp_store("calendar-reversed");
    carbook()
        .args([
            "--store",
            &store,
            "calendar",
            "--from",
            "2025-03-01",
            "--to",
            "2025-02-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Start date cannot be greater than end date.",
        ));
}

#[test]
fn calendar_empty_range_reports_no_bookings() {
    let store = temp_store("calendar-empty");
    carbook()
        .args([
            "--store",
            &store,
            "calendar",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No bookings found"));
}

#[test]
fn calendar_rejects_bad_date() {
    carbook()
        .args(["calendar", "--from", "2025-02-30", "--to", "2025-03-01"])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_reports_conflict_date() {
    let store = temp_store("check-conflict");
    carbook()
        .args(["--store", &store, "check", "-i", &fixture("conflicting_request.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Booking conflict on 2025-02-05."));
}

#[test]
fn check_touching_booking_is_free() {
    let store = temp_store("check-free");
    carbook()
        .args(["--store", &store, "check", "-i", &fixture("free_request.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflict."));
}

#[test]
fn check_invalid_request_lists_errors() {
    let store = temp_store("check-invalid");
    carbook()
        .args(["--store", &store, "check", "-i", &fixture("invalid_request.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Start time must be earlier than end time."))
        .stderr(predicate::str::contains(
            "Repeat-until date is required for recurring bookings.",
        ));
}

// ─────────────────────────────────────────────────────────────────────────────
// book
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn book_from_stdin_saves_store() {
    let store = temp_store("book-stdin");
    let request = std::fs::read_to_string(fixture("free_request.json")).unwrap();

    carbook()
        .args(["--store", &store, "book"])
        .write_stdin(request)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"created\""));

    let occurrences = february(&store, Some(COROLLA));
    assert_eq!(occurrences.len(), 2);
}

#[test]
fn book_conflict_leaves_store_untouched() {
    let store = temp_store("book-conflict");
    let before = std::fs::read_to_string(&store).unwrap();

    carbook()
        .args(["--store", &store, "book", "-i", &fixture("conflicting_request.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Booking conflict on 2025-02-05."));

    let after = std::fs::read_to_string(&store).unwrap();
    assert_eq!(before, after);
}

#[test]
fn book_update_of_unknown_id_fails() {
    let store = temp_store("book-unknown");
    let request = r#"{
        "id": "00000000-0000-0000-0000-000000000999",
        "resource_id": "00000000-0000-0000-0000-000000000001",
        "start_date": "2025-02-07",
        "start_time": "10:00:00",
        "end_time": "11:00:00"
    }"#;

    carbook()
        .args(["--store", &store, "book"])
        .write_stdin(request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Booking not found"));
}

#[test]
fn book_daily_with_series_config_stores_one_definition() {
    let store = temp_store("book-series");
    let request = r#"{
        "resource_id": "00000000-0000-0000-0000-000000000001",
        "start_date": "2025-02-10",
        "start_time": "08:00:00",
        "end_time": "09:00:00",
        "repeat_option": "Daily",
        "repeat_until": "2025-02-12"
    }"#;

    let output = carbook()
        .args([
            "--store",
            &store,
            "--config",
            &fixture("start_date_only.toml"),
            "book",
        ])
        .write_stdin(request)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let outcome: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(outcome["ids"].as_array().unwrap().len(), 1);

    // The stored series still expands to three days.
    assert_eq!(february(&store, Some(COROLLA)).len(), 4);
}

#[test]
fn invalid_request_json_fails() {
    let store = temp_store("book-bad-json");
    carbook()
        .args(["--store", &store, "book"])
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid booking request JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// seed / cars
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn seed_fills_empty_store_once() {
    let path = "/tmp/carbook-test-seed.json";
    let _ = std::fs::remove_file(path);

    carbook()
        .args(["--store", path, "seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 3 cars and 6 bookings."));

    carbook()
        .args(["--store", path, "seed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already has data"));
}

#[test]
fn cars_lists_fixture_cars() {
    let store = temp_store("cars");
    carbook()
        .args(["--store", &store, "cars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Corolla"))
        .stdout(predicate::str::contains("Civic"));
}

#[test]
fn missing_config_file_fails() {
    let store = temp_store("bad-config");
    carbook()
        .args([
            "--store",
            &store,
            "--config",
            "/tmp/carbook-does-not-exist.toml",
            "cars",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn no_subcommand_shows_usage() {
    carbook()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
