// Property-based tests for overlap detection

use calendar_engine::models::event::{Event, EventDraft};
use calendar_engine::services::event::overlap::{find_overlapping, overlaps};
use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;

fn event(id: &str, day: u32, start: u32, end: u32) -> Event {
    let minute = |m: u32| NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap();
    Event::from_draft(
        id,
        EventDraft::new(
            id,
            NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
            minute(start),
            minute(end),
        ),
    )
}

proptest! {
    /// Property: overlap is symmetric
    #[test]
    fn prop_overlap_is_symmetric(
        day_a in 10..12u32, start_a in 0..1439u32, len_a in 0..240u32,
        day_b in 10..12u32, start_b in 0..1439u32, len_b in 0..240u32,
    ) {
        let a = event("a", day_a, start_a, (start_a + len_a).min(1439));
        let b = event("b", day_b, start_b, (start_b + len_b).min(1439));
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    /// Property: ranges that only touch at an endpoint never overlap
    #[test]
    fn prop_touching_ranges_do_not_overlap(
        start in 0..1000u32,
        first_len in 1..200u32,
        second_len in 1..200u32,
    ) {
        let boundary = start + first_len;
        let a = event("a", 10, start, boundary);
        let b = event("b", 10, boundary, boundary + second_len);
        prop_assert!(!overlaps(&a, &b));
        prop_assert!(!overlaps(&b, &a));
    }

    /// Property: a non-empty range always overlaps itself under another id
    #[test]
    fn prop_identical_ranges_overlap(start in 0..1300u32, len in 1..120u32) {
        let a = event("a", 10, start, start + len);
        let b = event("b", 10, start, start + len);
        prop_assert!(overlaps(&a, &b));
        prop_assert_eq!(find_overlapping(&a, &[a.clone(), b.clone()]).len(), 1);
    }

    /// Property: different dates never overlap
    #[test]
    fn prop_different_days_never_overlap(start in 0..1300u32, len in 1..120u32) {
        let a = event("a", 10, start, start + len);
        let b = event("b", 11, start, start + len);
        prop_assert!(!overlaps(&a, &b));
    }
}

#[test]
fn test_overlap_examples() {
    let existing = event("1", 10, 600, 720);
    assert!(overlaps(&existing, &event("2", 10, 660, 780)));
    assert!(!overlaps(&existing, &event("3", 10, 720, 780)));
}
