// Unit tests for RepeatType and RepeatDescriptor
// Parameterized over every repeat kind

use calendar_engine::error::EngineError;
use calendar_engine::models::recurrence::{RepeatDescriptor, RepeatType};
use chrono::NaiveDate;
use test_case::test_case;

#[test_case("none", RepeatType::None ; "none")]
#[test_case("daily", RepeatType::Daily ; "daily")]
#[test_case("weekly", RepeatType::Weekly ; "weekly")]
#[test_case("monthly", RepeatType::Monthly ; "monthly")]
#[test_case("yearly", RepeatType::Yearly ; "yearly")]
#[test_case("  Weekly ", RepeatType::Weekly ; "trims and ignores case")]
#[test_case("", RepeatType::None ; "empty means none")]
fn test_parse_repeat_type(input: &str, expected: RepeatType) {
    assert_eq!(input.parse::<RepeatType>().unwrap(), expected);
}

#[test_case("hourly" ; "unsupported unit")]
#[test_case("fortnightly" ; "alias not accepted")]
fn test_parse_unknown_repeat_type(input: &str) {
    assert!(matches!(
        input.parse::<RepeatType>(),
        Err(EngineError::InvalidRecurrence(_))
    ));
}

#[test_case(RepeatType::Daily, 1, "every day" ; "daily")]
#[test_case(RepeatType::Weekly, 2, "every 2 weeks" ; "biweekly")]
#[test_case(RepeatType::Monthly, 3, "every 3 months" ; "quarterly")]
#[test_case(RepeatType::Yearly, 1, "every year" ; "yearly")]
fn test_describe(kind: RepeatType, interval: u32, expected: &str) {
    assert_eq!(RepeatDescriptor::new(kind, interval).describe(), expected);
}

#[test]
fn test_describe_with_end_date() {
    let repeat = RepeatDescriptor::new(RepeatType::Weekly, 2)
        .with_end_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    assert_eq!(repeat.describe(), "every 2 weeks until 2025-12-31");
    assert_eq!(RepeatDescriptor::none().describe(), "does not repeat");
}

#[test_case(RepeatType::Daily ; "daily")]
#[test_case(RepeatType::Weekly ; "weekly")]
#[test_case(RepeatType::Monthly ; "monthly")]
#[test_case(RepeatType::Yearly ; "yearly")]
fn test_repeating_kinds_need_positive_interval(kind: RepeatType) {
    assert!(RepeatDescriptor::new(kind, 0).validate().is_err());
    assert!(RepeatDescriptor::new(kind, 1).validate().is_ok());
    assert!(RepeatDescriptor::new(kind, 1).is_recurring());
}

#[test]
fn test_descriptor_json_shape() {
    let repeat = RepeatDescriptor::new(RepeatType::Weekly, 1)
        .with_end_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())
        .with_series_id("abc");

    let json = serde_json::to_value(&repeat).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "weekly", "interval": 1, "endDate": "2025-12-31", "id": "abc"})
    );

    let plain = serde_json::to_value(RepeatDescriptor::none()).unwrap();
    assert_eq!(plain, serde_json::json!({"type": "none", "interval": 0}));
}
