// Recurrence module
// Repeat descriptors attached to every event instance.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Unit a series advances by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RepeatType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatType::None => "none",
            RepeatType::Daily => "daily",
            RepeatType::Weekly => "weekly",
            RepeatType::Monthly => "monthly",
            RepeatType::Yearly => "yearly",
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            RepeatType::None => "",
            RepeatType::Daily => "day",
            RepeatType::Weekly => "week",
            RepeatType::Monthly => "month",
            RepeatType::Yearly => "year",
        }
    }
}

impl fmt::Display for RepeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepeatType {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(RepeatType::None),
            "daily" => Ok(RepeatType::Daily),
            "weekly" => Ok(RepeatType::Weekly),
            "monthly" => Ok(RepeatType::Monthly),
            "yearly" => Ok(RepeatType::Yearly),
            other => Err(EngineError::InvalidRecurrence(format!(
                "unknown repeat type '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for RepeatType {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepeatType> for String {
    fn from(value: RepeatType) -> Self {
        value.as_str().to_string()
    }
}

/// How an event repeats and which series it belongs to.
///
/// Serialized as `{"type", "interval", "endDate"?, "id"?}` where `id` is the
/// series id shared by all generated instances.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatDescriptor {
    #[serde(rename = "type")]
    pub kind: RepeatType,
    #[serde(default)]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
}

impl RepeatDescriptor {
    /// A descriptor for a one-off event.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(kind: RepeatType, interval: u32) -> Self {
        Self {
            kind,
            interval,
            end_date: None,
            series_id: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_series_id(mut self, series_id: impl Into<String>) -> Self {
        self.series_id = Some(series_id.into());
        self
    }

    /// True for a repeating kind with a positive interval.
    pub fn is_recurring(&self) -> bool {
        self.kind != RepeatType::None && self.interval > 0
    }

    /// Series id, only for descriptors that actually repeat.
    pub fn series(&self) -> Option<&str> {
        if self.kind == RepeatType::None {
            return None;
        }
        self.series_id.as_deref()
    }

    /// Reject a repeating kind without a positive interval.
    pub fn validate(&self) -> EngineResult<()> {
        if self.kind != RepeatType::None && self.interval == 0 {
            return Err(EngineError::InvalidRecurrence(format!(
                "{} repeat requires a positive interval",
                self.kind
            )));
        }
        Ok(())
    }

    /// Human readable summary, e.g. `every 2 weeks until 2025-12-31`.
    pub fn describe(&self) -> String {
        if self.kind == RepeatType::None {
            return "does not repeat".to_string();
        }

        let mut text = if self.interval <= 1 {
            format!("every {}", self.kind.unit())
        } else {
            format!("every {} {}s", self.interval, self.kind.unit())
        };

        if let Some(end) = self.end_date {
            text.push_str(&format!(" until {}", end.format("%Y-%m-%d")));
        }

        text
    }
}
