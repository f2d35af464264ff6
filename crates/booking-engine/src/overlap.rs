//! The time-of-day overlap rule used everywhere two bookings are compared.
//!
//! Two ranges on the same day overlap when `a.start < b.end && a.end > b.start`.
//! Touching ranges (one ends exactly when the other starts) do NOT overlap.
//! Identical ranges always overlap, which only matters for zero-length ranges.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A time-of-day range within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        TimeRange { start, end }
    }

    /// Whether the two ranges collide. Symmetric in `self` and `other`.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        (self.start < other.end && self.end > other.start)
            || (self.start == other.start && self.end == other.end)
    }

    /// Minutes shared by both ranges, 0 when they do not overlap.
    pub fn overlap_minutes(&self, other: &TimeRange) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            (end - start).num_minutes()
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start_hour: u32, end_hour: u32) -> TimeRange {
        TimeRange::new(
            NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn partial_overlap() {
        assert!(range(10, 12).overlaps(&range(11, 13)));
        assert_eq!(range(10, 12).overlap_minutes(&range(11, 13)), 60);
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        assert!(!range(10, 12).overlaps(&range(12, 14)));
        assert!(!range(12, 14).overlaps(&range(10, 12)));
        assert_eq!(range(10, 12).overlap_minutes(&range(12, 14)), 0);
    }

    #[test]
    fn identical_zero_length_ranges_overlap() {
        assert!(range(9, 9).overlaps(&range(9, 9)));
        assert!(!range(9, 9).overlaps(&range(10, 10)));
    }

    #[test]
    fn contained_range_overlaps() {
        assert!(range(8, 18).overlaps(&range(12, 13)));
        assert!(range(12, 13).overlaps(&range(8, 18)));
    }
}
