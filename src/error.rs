//! Error types raised by the calendar engine.
//!
//! Only malformed input is an error here. A series-scope mutation that cannot
//! find its siblings is reported through `MutationPlan::degraded` instead.

use chrono::NaiveTime;
use thiserror::Error;

/// Errors that abort an engine operation before any state is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Unparsable or out-of-range date/time string.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Zero interval or unrecognized repeat type.
    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),

    #[error("End time {end} must be after start time {start}")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
