//! Recurrence expansion.
//!
//! Turns one anchor date plus a [`RepeatDescriptor`] into the ordered, finite
//! list of dates the series occupies. Expansion is pure: the same inputs
//! always yield the same occurrences, and series ids are supplied by the
//! caller rather than generated here.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::event::EventDraft;
use crate::models::recurrence::{RepeatDescriptor, RepeatType};
use crate::models::settings::Settings;
use crate::utils::date::add_days;

mod daily;
mod monthly;
mod utils;
mod weekly;
mod yearly;

use utils::Bound;

/// Ceiling used when no settings are supplied.
pub const DEFAULT_MAX_OCCURRENCES: usize = 500;

/// Materialization window for open-ended rules: `days` after the later of
/// `from` and the series anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    pub from: NaiveDate,
    pub days: u32,
}

impl Horizon {
    pub fn new(from: NaiveDate, days: u32) -> Self {
        Self { from, days }
    }

    /// Last date an open-ended series anchored at `anchor` may reach.
    pub fn end_for(&self, anchor: NaiveDate) -> NaiveDate {
        add_days(self.from.max(anchor), i64::from(self.days))
    }
}

/// Caller-owned limits on how far an open-ended series is materialized.
///
/// A rule with its own end date runs to that date; neither the horizon nor
/// the ceiling applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionPolicy {
    pub horizon: Option<Horizon>,
    /// Maximum number of occurrences produced from one open-ended rule.
    pub max_occurrences: usize,
}

impl Default for ExpansionPolicy {
    fn default() -> Self {
        Self {
            horizon: None,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

impl ExpansionPolicy {
    pub fn new(horizon: Option<Horizon>, max_occurrences: usize) -> Self {
        Self {
            horizon,
            max_occurrences,
        }
    }

    /// Horizon of `horizon_days` from `today`, ceiling from settings.
    pub fn from_settings(settings: &Settings, today: NaiveDate) -> Self {
        Self {
            horizon: Some(Horizon::new(today, settings.recurrence.horizon_days)),
            max_occurrences: settings.recurrence.max_occurrences,
        }
    }

    fn bound_for(&self, anchor: NaiveDate, repeat: &RepeatDescriptor) -> Bound {
        match repeat.end_date {
            Some(end) => Bound {
                until: Some(end),
                max_occurrences: usize::MAX,
            },
            None => Bound {
                until: self.horizon.map(|horizon| horizon.end_for(anchor)),
                max_occurrences: self.max_occurrences,
            },
        }
    }
}

/// One date produced by expansion, tagged with its series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub series_id: Option<String>,
}

/// Expand `repeat` anchored at `anchor` into its occurrences.
///
/// `RepeatType::None` yields the anchor alone with no series id. A repeating
/// kind with a zero interval fails before anything is generated. An end date
/// earlier than the anchor yields no occurrences. Without an end date the
/// policy's horizon and ceiling bound the series.
pub fn expand(
    anchor: NaiveDate,
    repeat: &RepeatDescriptor,
    policy: &ExpansionPolicy,
) -> EngineResult<Vec<Occurrence>> {
    repeat.validate()?;

    if repeat.kind == RepeatType::None {
        return Ok(vec![Occurrence {
            date: anchor,
            series_id: None,
        }]);
    }

    let bound = policy.bound_for(anchor, repeat);

    let dates = match repeat.kind {
        RepeatType::Daily => daily::generate(anchor, repeat.interval, &bound),
        RepeatType::Weekly => weekly::generate(anchor, repeat.interval, &bound),
        RepeatType::Monthly => monthly::generate(anchor, repeat.interval, &bound),
        RepeatType::Yearly => yearly::generate(anchor, repeat.interval, &bound),
        RepeatType::None => Vec::new(),
    };

    log::debug!(
        "Expanded {} repeat from {} into {} occurrences (until {:?})",
        repeat.kind,
        anchor,
        dates.len(),
        bound.until
    );

    Ok(dates
        .into_iter()
        .map(|date| Occurrence {
            date,
            series_id: repeat.series_id.clone(),
        })
        .collect())
}

/// Materialize one draft per occurrence of `draft`'s repeat rule.
///
/// Every copy keeps the shared fields and the full repeat descriptor; only the
/// date differs.
pub fn expand_draft(draft: &EventDraft, policy: &ExpansionPolicy) -> EngineResult<Vec<EventDraft>> {
    let occurrences = expand(draft.date, &draft.repeat, policy)?;

    Ok(occurrences
        .into_iter()
        .map(|occurrence| EventDraft {
            date: occurrence.date,
            ..draft.clone()
        })
        .collect())
}
