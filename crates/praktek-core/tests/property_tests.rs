//! Property tests for the allocator, overlap test and time validation.

use std::collections::BTreeSet;

use chrono::NaiveTime;
use proptest::prelude::*;
use praktek_core::models::{Schedule, Weekday};
use praktek_core::queue::allocate;
use praktek_core::schedule::validate_time_range;
use praktek_core::ClinicError;

fn minutes_to_time(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

fn hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn slot(start: u32, end: u32) -> Schedule {
    Schedule {
        id: "J001".into(),
        doctor_id: "D001".into(),
        day: Weekday::Senin,
        start: minutes_to_time(start),
        end: minutes_to_time(end),
        quota: 10,
    }
}

/// A valid `[start, end)` range within one day, in minutes.
fn range() -> impl Strategy<Value = (u32, u32)> {
    (0u32..1439).prop_flat_map(|start| (Just(start), (start + 1)..1440))
}

proptest! {
    #[test]
    fn allocate_returns_smallest_free(quota in 1u32..=50, numbers in prop::collection::vec(1u32..=60, 0..80)) {
        let occupied: BTreeSet<u32> = numbers.into_iter().collect();
        match allocate(quota, &occupied) {
            Ok(n) => {
                prop_assert!(n >= 1 && n <= quota);
                prop_assert!(!occupied.contains(&n));
                prop_assert!((1..n).all(|m| occupied.contains(&m)));
            }
            Err(ClinicError::QuotaExhausted { .. }) => {
                prop_assert!((1..=quota).all(|m| occupied.contains(&m)));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn allocate_ignores_insertion_order(quota in 1u32..=20, numbers in prop::collection::vec(1u32..=20, 0..20)) {
        let forward: BTreeSet<u32> = numbers.iter().copied().collect();
        let backward: BTreeSet<u32> = numbers.iter().rev().copied().collect();
        prop_assert_eq!(allocate(quota, &forward).ok(), allocate(quota, &backward).ok());
    }

    #[test]
    fn releasing_a_number_makes_it_reachable(quota in 1u32..=20, released in 1u32..=20) {
        prop_assume!(released <= quota);
        let mut occupied: BTreeSet<u32> = (1..=quota).collect();
        occupied.remove(&released);
        prop_assert_eq!(allocate(quota, &occupied).ok(), Some(released));
    }

    #[test]
    fn overlap_is_symmetric(a in range(), b in range()) {
        let (sa, ea) = a;
        let (sb, eb) = b;
        prop_assert_eq!(
            slot(sa, ea).overlaps(minutes_to_time(sb), minutes_to_time(eb)),
            slot(sb, eb).overlaps(minutes_to_time(sa), minutes_to_time(ea))
        );
    }

    #[test]
    fn overlap_matches_interval_intersection(a in range(), b in range()) {
        let (sa, ea) = a;
        let (sb, eb) = b;
        prop_assert_eq!(
            slot(sa, ea).overlaps(minutes_to_time(sb), minutes_to_time(eb)),
            sb < ea && sa < eb
        );
    }

    #[test]
    fn touching_ranges_never_overlap(start in 0u32..1000, first in 1u32..200, second in 1u32..200) {
        let middle = start + first;
        let end = middle + second;
        prop_assume!(end < 1440);
        prop_assert!(!slot(start, middle).overlaps(minutes_to_time(middle), minutes_to_time(end)));
        prop_assert!(!slot(middle, end).overlaps(minutes_to_time(start), minutes_to_time(middle)));
    }

    #[test]
    fn ordered_ranges_validate(a in range()) {
        let (start, end) = a;
        let parsed = validate_time_range(&hhmm(start), &hhmm(end));
        prop_assert_eq!(parsed.ok(), Some((minutes_to_time(start), minutes_to_time(end))));
    }

    #[test]
    fn unordered_ranges_are_rejected(a in range()) {
        let (start, end) = a;
        prop_assert!(matches!(
            validate_time_range(&hhmm(end), &hhmm(start)),
            Err(ClinicError::InvalidTimeOrder { .. })
        ), "reversed range must be rejected with InvalidTimeOrder");
        prop_assert!(matches!(
            validate_time_range(&hhmm(start), &hhmm(start)),
            Err(ClinicError::InvalidTimeOrder { .. })
        ), "empty range must be rejected with InvalidTimeOrder");
    }
}
