// Settings module
// User-tunable policy knobs, persisted as TOML.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::event::DEFAULT_NOTIFICATION_MINUTES;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub recurrence: RecurrenceSettings,
    pub search: SearchSettings,
    pub notifications: NotificationSettings,
    pub storage: StorageSettings,
}

/// How far ahead open-ended series are materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrenceSettings {
    /// Days an open-ended series runs past today, or past its first date
    /// when that is later.
    pub horizon_days: u32,
    /// Hard ceiling on instances generated from one rule.
    pub max_occurrences: usize,
}

impl Default for RecurrenceSettings {
    fn default() -> Self {
        Self {
            horizon_days: 365,
            max_occurrences: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Lead time applied to events created without an explicit one.
    pub default_minutes: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            default_minutes: DEFAULT_NOTIFICATION_MINUTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite file; the platform data directory is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.recurrence.horizon_days == 0 {
            return Err("recurrence.horizon_days must be at least 1".to_string());
        }
        if self.recurrence.max_occurrences == 0 {
            return Err("recurrence.max_occurrences must be at least 1".to_string());
        }
        Ok(())
    }
}
