// Event module
// Flat event records exchanged with the UI and storage collaborators.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::recurrence::RepeatDescriptor;

/// Minutes of advance notice used when a record omits `notificationTime`.
pub const DEFAULT_NOTIFICATION_MINUTES: u32 = 10;

fn default_notification_time() -> u32 {
    DEFAULT_NOTIFICATION_MINUTES
}

/// One concrete calendar event, possibly an instance of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repeat: RepeatDescriptor,
    #[serde(default = "default_notification_time")]
    pub notification_time: u32,
}

/// An event as submitted by a form, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repeat: RepeatDescriptor,
    #[serde(default = "default_notification_time")]
    pub notification_time: u32,
}

/// Error for a time range whose end is not after its start.
pub fn time_range_error(start: NaiveTime, end: NaiveTime) -> Option<EngineError> {
    if end <= start {
        Some(EngineError::InvalidTimeRange { start, end })
    } else {
        None
    }
}

impl Event {
    /// Attach an id to a draft.
    pub fn from_draft(id: impl Into<String>, draft: EventDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            description: draft.description,
            location: draft.location,
            category: draft.category,
            repeat: draft.repeat,
            notification_time: draft.notification_time,
        }
    }

    /// Create a builder for constructing event drafts with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// The record without its id.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            repeat: self.repeat.clone(),
            notification_time: self.notification_time,
        }
    }

    /// Check the time range and repeat rule before persistence.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(err) = time_range_error(self.start_time, self.end_time) {
            return Err(err);
        }
        self.repeat.validate()
    }

    /// Check if this is a recurring event
    pub fn is_recurring(&self) -> bool {
        self.repeat.is_recurring()
    }

    /// Series id shared with sibling instances, if any.
    pub fn series_id(&self) -> Option<&str> {
        self.repeat.series()
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }
}

impl EventDraft {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            title: title.into(),
            date,
            start_time,
            end_time,
            description: String::new(),
            location: String::new(),
            category: String::new(),
            repeat: RepeatDescriptor::none(),
            notification_time: DEFAULT_NOTIFICATION_MINUTES,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if let Some(err) = time_range_error(self.start_time, self.end_time) {
            return Err(err);
        }
        self.repeat.validate()
    }

    pub fn is_recurring(&self) -> bool {
        self.repeat.is_recurring()
    }
}

/// Builder for creating event drafts with optional fields
pub struct EventBuilder {
    title: Option<String>,
    date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    description: String,
    location: String,
    category: String,
    repeat: RepeatDescriptor,
    notification_time: u32,
}

impl EventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self {
            title: None,
            date: None,
            start_time: None,
            end_time: None,
            description: String::new(),
            location: String::new(),
            category: String::new(),
            repeat: RepeatDescriptor::none(),
            notification_time: DEFAULT_NOTIFICATION_MINUTES,
        }
    }

    /// Set the event title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the start and end times of day
    pub fn times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Set the event description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the event location
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the event category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn repeat(mut self, repeat: RepeatDescriptor) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn notification_time(mut self, minutes: u32) -> Self {
        self.notification_time = minutes;
        self
    }

    /// Build the draft, checking required fields and the time range
    pub fn build(self) -> Result<EventDraft, String> {
        let title = self.title.ok_or("Event title is required")?;
        if title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }
        let date = self.date.ok_or("Event date is required")?;
        let start_time = self.start_time.ok_or("Event start time is required")?;
        let end_time = self.end_time.ok_or("Event end time is required")?;

        let draft = EventDraft {
            title,
            date,
            start_time,
            end_time,
            description: self.description,
            location: self.location,
            category: self.category,
            repeat: self.repeat,
            notification_time: self.notification_time,
        };

        draft.validate().map_err(|e| e.to_string())?;
        Ok(draft)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serde adapter for `HH:MM` times of day.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::utils::date::{format_time, parse_time};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse_time(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recurrence::RepeatType;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 10).unwrap()
    }

    #[test]
    fn test_builder_basic() {
        let draft = Event::builder()
            .title("Team Standup")
            .date(day())
            .times(t(9, 0), t(9, 30))
            .build()
            .unwrap();

        assert_eq!(draft.title, "Team Standup");
        assert_eq!(draft.notification_time, DEFAULT_NOTIFICATION_MINUTES);
        assert!(!draft.is_recurring());
    }

    #[test]
    fn test_builder_missing_title() {
        let result = Event::builder().date(day()).times(t(9, 0), t(10, 0)).build();
        assert_eq!(result.unwrap_err(), "Event title is required");
    }

    #[test]
    fn test_builder_whitespace_title() {
        let result = Event::builder()
            .title("   ")
            .date(day())
            .times(t(9, 0), t(10, 0))
            .build();
        assert_eq!(result.unwrap_err(), "Event title cannot be empty");
    }

    #[test]
    fn test_builder_missing_times() {
        let result = Event::builder().title("Meeting").date(day()).build();
        assert_eq!(result.unwrap_err(), "Event start time is required");
    }

    #[test]
    fn test_builder_rejects_inverted_times() {
        let result = Event::builder()
            .title("Meeting")
            .date(day())
            .times(t(11, 0), t(10, 0))
            .build();
        assert!(result.unwrap_err().contains("must be after start time"));
    }

    #[test]
    fn test_time_range_error() {
        assert!(time_range_error(t(10, 0), t(11, 0)).is_none());
        assert_eq!(
            time_range_error(t(10, 0), t(10, 0)),
            Some(EngineError::InvalidTimeRange {
                start: t(10, 0),
                end: t(10, 0)
            })
        );
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut event = Event::from_draft("1", EventDraft::new("Sync", day(), t(9, 0), t(10, 0)));
        event.repeat = RepeatDescriptor::new(RepeatType::Daily, 0);
        assert!(matches!(event.validate(), Err(EngineError::InvalidRecurrence(_))));
    }

    #[test]
    fn test_starts_at() {
        let event = Event::from_draft("1", EventDraft::new("Sync", day(), t(9, 0), t(10, 30)));
        assert_eq!(event.starts_at(), day().and_time(t(9, 0)));
    }

    #[test]
    fn test_draft_round_trip() {
        let draft = EventDraft::new("Review", day(), t(14, 0), t(15, 0));
        let event = Event::from_draft("abc", draft.clone());
        assert_eq!(event.to_draft(), draft);
    }

    #[test]
    fn test_json_record_shape() {
        let json = r#"{
            "id": "42",
            "title": "Weekly sync",
            "date": "2025-11-10",
            "startTime": "10:00",
            "endTime": "11:00",
            "description": "Planning",
            "location": "Room A",
            "category": "Work",
            "repeat": {"type": "weekly", "interval": 1, "id": "s-1"},
            "notificationTime": 60
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.start_time, t(10, 0));
        assert_eq!(event.series_id(), Some("s-1"));
        assert_eq!(event.notification_time, 60);

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["startTime"], "10:00");
        assert_eq!(value["date"], "2025-11-10");
        let back: Event = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_json_rejects_bad_time() {
        let json = r#"{"id":"1","title":"x","date":"2025-11-10","startTime":"9am","endTime":"10:00"}"#;
        let result: Result<Event, _> = serde_json::from_str(json);
        assert!(result.unwrap_err().to_string().contains("Invalid date"));
    }
}
