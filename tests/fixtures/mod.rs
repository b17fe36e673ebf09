// Test fixtures - reusable test data
// Provides consistent test data across all test files
#![allow(dead_code)]

use calendar_engine::models::event::{Event, EventDraft};
use calendar_engine::models::recurrence::{RepeatDescriptor, RepeatType};
use chrono::{NaiveDate, NaiveTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    pub fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    /// Monday Nov 10, 2025
    pub fn monday_nov_10() -> NaiveDate {
        ymd(2025, 11, 10)
    }
}

/// Sample events for testing
pub mod events {
    use super::dates::{hm, ymd};
    use super::*;

    /// A one-off meeting from 10:00 to 12:00 on Nov 10, 2025
    pub fn simple_draft() -> EventDraft {
        let mut draft = EventDraft::new("Project review", ymd(2025, 11, 10), hm(10, 0), hm(12, 0));
        draft.description = "Quarterly project review".to_string();
        draft.location = "Room 2".to_string();
        draft.category = "Work".to_string();
        draft
    }

    /// Bi-weekly standup until the end of 2025
    pub fn fortnightly_standup() -> EventDraft {
        let mut draft = EventDraft::new("Team standup", ymd(2025, 11, 10), hm(9, 0), hm(9, 30));
        draft.repeat = RepeatDescriptor::new(RepeatType::Weekly, 2).with_end_date(ymd(2025, 12, 31));
        draft
    }

    /// Stored weekly instances sharing `series_id`, one per date.
    pub fn weekly_series(series_id: &str, dates: &[NaiveDate]) -> Vec<Event> {
        dates
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let mut draft = EventDraft::new("Weekly sync", *date, hm(14, 0), hm(15, 0));
                draft.repeat = RepeatDescriptor::new(RepeatType::Weekly, 1).with_series_id(series_id);
                Event::from_draft(format!("{}-{}", series_id, i), draft)
            })
            .collect()
    }
}
