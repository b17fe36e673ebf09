//! Upcoming-event reminders.
//!
//! An event is due once "now" is within its `notification_time` minutes
//! before the start, and until it starts. The caller passes "now" and the ids
//! it has already announced, so the computation stays deterministic.

use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime};

use crate::models::event::Event;

/// One reminder to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub event_id: String,
    pub message: String,
}

/// True when `event` starts after `now` but no more than its lead time later.
pub fn is_due(event: &Event, now: NaiveDateTime) -> bool {
    let until_start = event.starts_at() - now;
    until_start > Duration::zero() && until_start <= Duration::minutes(i64::from(event.notification_time))
}

/// Events that are due and not yet in `already_notified`, in input order.
pub fn upcoming_events<'a>(
    events: &'a [Event],
    now: NaiveDateTime,
    already_notified: &HashSet<String>,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| !already_notified.contains(&event.id))
        .filter(|event| is_due(event, now))
        .collect()
}

/// Reminder messages for [`upcoming_events`].
pub fn upcoming_notifications(
    events: &[Event],
    now: NaiveDateTime,
    already_notified: &HashSet<String>,
) -> Vec<Notification> {
    upcoming_events(events, now, already_notified)
        .into_iter()
        .map(|event| Notification {
            event_id: event.id.clone(),
            message: format!(
                "{} starts in {} minutes",
                event.title, event.notification_time
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventDraft;
    use chrono::{NaiveDate, NaiveTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn meeting(id: &str, lead: u32) -> Event {
        let mut draft = EventDraft::new(
            "Team meeting",
            NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
        );
        draft.notification_time = lead;
        Event::from_draft(id, draft)
    }

    #[test]
    fn test_due_inside_lead_time() {
        let event = meeting("1", 10);
        assert!(is_due(&event, at(13, 50)));
        assert!(is_due(&event, at(13, 59)));
    }

    #[test]
    fn test_not_due_before_window_or_after_start() {
        let event = meeting("1", 10);
        assert!(!is_due(&event, at(13, 49)));
        assert!(!is_due(&event, at(14, 0)));
        assert!(!is_due(&event, at(14, 30)));
    }

    #[test]
    fn test_one_day_lead_time() {
        let event = meeting("1", 1440);
        let day_before = NaiveDate::from_ymd_opt(2025, 11, 14)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        assert!(is_due(&event, day_before));
    }

    #[test]
    fn test_already_notified_skipped() {
        let events = vec![meeting("1", 10), meeting("2", 60)];
        let notified: HashSet<String> = ["1".to_string()].into_iter().collect();

        let result = upcoming_notifications(&events, at(13, 55), &notified);
        assert_eq!(
            result,
            vec![Notification {
                event_id: "2".to_string(),
                message: "Team meeting starts in 60 minutes".to_string(),
            }]
        );
    }
}
