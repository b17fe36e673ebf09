// Property-based tests for recurrence expansion
// Checks determinism, bounds and month-skip behavior with random inputs

use calendar_engine::models::recurrence::{RepeatDescriptor, RepeatType};
use calendar_engine::services::event::recurrence::{expand, ExpansionPolicy, Horizon};
use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = RepeatType> {
    prop_oneof![
        Just(RepeatType::Daily),
        Just(RepeatType::Weekly),
        Just(RepeatType::Monthly),
        Just(RepeatType::Yearly),
    ]
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000..2040i32, 1..=12u32, 1..=31u32).prop_map(|(year, month, day)| {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap())
    })
}

proptest! {
    /// Property: the same inputs always produce the same occurrences
    #[test]
    fn prop_expansion_is_deterministic(
        anchor in date_strategy(),
        kind in kind_strategy(),
        interval in 1..6u32,
        span in 0..800i64,
    ) {
        let end = anchor + chrono::Duration::days(span);
        let repeat = RepeatDescriptor::new(kind, interval).with_end_date(end).with_series_id("s");
        let policy = ExpansionPolicy::default();

        let first = expand(anchor, &repeat, &policy).unwrap();
        let second = expand(anchor, &repeat, &policy).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: every occurrence lies in [anchor, end], ascending, and an
    /// explicit end date is never cut short by the ceiling
    #[test]
    fn prop_end_bounded_expansion_reaches_end(
        anchor in date_strategy(),
        interval in 1..4u32,
        span in 0..2000i64,
    ) {
        let end = anchor + chrono::Duration::days(span);
        let repeat = RepeatDescriptor::new(RepeatType::Daily, interval).with_end_date(end);
        let policy = ExpansionPolicy::new(None, 1);

        let occurrences = expand(anchor, &repeat, &policy).unwrap();

        prop_assert_eq!(occurrences.len() as i64, span / i64::from(interval) + 1);
        prop_assert_eq!(occurrences[0].date, anchor);
        prop_assert!(occurrences.iter().all(|o| o.date >= anchor && o.date <= end));
        prop_assert!(occurrences.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    /// Property: an open-ended rule never exceeds the ceiling or the horizon
    #[test]
    fn prop_open_ended_expansion_is_bounded(
        anchor in date_strategy(),
        kind in kind_strategy(),
        interval in 1..6u32,
        horizon_days in 1..2000u32,
        cap in 1..200usize,
    ) {
        let horizon = Horizon::new(anchor, horizon_days);
        let repeat = RepeatDescriptor::new(kind, interval);
        let policy = ExpansionPolicy::new(Some(horizon), cap);

        let occurrences = expand(anchor, &repeat, &policy).unwrap();

        prop_assert!(!occurrences.is_empty());
        prop_assert!(occurrences.len() <= cap);
        prop_assert!(occurrences.iter().all(|o| o.date >= anchor && o.date <= horizon.end_for(anchor)));
        prop_assert!(occurrences.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    /// Property: monthly and yearly occurrences keep the anchor's day of month
    #[test]
    fn prop_calendar_rules_keep_day_of_month(
        anchor in date_strategy(),
        monthly in any::<bool>(),
        interval in 1..4u32,
    ) {
        let kind = if monthly { RepeatType::Monthly } else { RepeatType::Yearly };
        let end = NaiveDate::from_ymd_opt(anchor.year() + 12, 12, 31).unwrap();
        let repeat = RepeatDescriptor::new(kind, interval).with_end_date(end);

        let occurrences = expand(anchor, &repeat, &ExpansionPolicy::default()).unwrap();

        prop_assert!(occurrences.iter().all(|o| o.date.day() == anchor.day()));
        if !monthly {
            prop_assert!(occurrences.iter().all(|o| o.date.month() == anchor.month()));
        }
    }

    /// Property: fixed-stride rules step by exactly interval days or weeks
    #[test]
    fn prop_fixed_stride_spacing(
        anchor in date_strategy(),
        weekly in any::<bool>(),
        interval in 1..10u32,
    ) {
        let (kind, stride) = if weekly {
            (RepeatType::Weekly, 7 * i64::from(interval))
        } else {
            (RepeatType::Daily, i64::from(interval))
        };
        let repeat = RepeatDescriptor::new(kind, interval);

        let occurrences = expand(anchor, &repeat, &ExpansionPolicy::new(None, 50)).unwrap();

        prop_assert_eq!(occurrences.len(), 50);
        prop_assert!(occurrences
            .windows(2)
            .all(|pair| (pair[1].date - pair[0].date).num_days() == stride));
    }
}

#[test]
fn test_month_end_anchor_skips_february() {
    let anchor = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let repeat = RepeatDescriptor::new(RepeatType::Monthly, 1)
        .with_end_date(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap());

    let occurrences = expand(anchor, &repeat, &ExpansionPolicy::default()).unwrap();

    assert_eq!(occurrences.len(), 2);
    assert_eq!(occurrences[1].date, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
}
