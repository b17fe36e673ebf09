//! Series membership and scoped mutations.
//!
//! Instances of one recurrence definition are flat records linked by the
//! series id in their repeat descriptor. Edits, deletes and moves take an
//! explicit [`Scope`]: `Single` touches one instance and detaches it from its
//! series, `Series` touches every instance sharing the series id.
//!
//! Nothing here mutates the caller's collection. Each operation returns a
//! [`MutationPlan`] the caller persists (or applies in memory with
//! [`MutationPlan::apply`]).

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use crate::models::event::Event;
use crate::models::recurrence::RepeatDescriptor;
use crate::utils::date::{add_days, days_between};

/// How far a mutation of a recurring instance propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Single,
    Series,
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" | "one" => Ok(Scope::Single),
            "series" | "all" => Ok(Scope::Series),
            other => Err(format!("Unknown scope '{}', expected 'single' or 'series'", other)),
        }
    }
}

/// Field replacements for an edit. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub notification_time: Option<u32>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    /// Apply every field except the date.
    fn apply_shared(&self, event: &mut Event) {
        if let Some(ref title) = self.title {
            event.title = title.clone();
        }
        if let Some(start) = self.start_time {
            event.start_time = start;
        }
        if let Some(end) = self.end_time {
            event.end_time = end;
        }
        if let Some(ref description) = self.description {
            event.description = description.clone();
        }
        if let Some(ref location) = self.location {
            event.location = location.clone();
        }
        if let Some(ref category) = self.category {
            event.category = category.clone();
        }
        if let Some(minutes) = self.notification_time {
            event.notification_time = minutes;
        }
    }

    fn apply_all(&self, event: &mut Event) {
        self.apply_shared(event);
        if let Some(date) = self.date {
            event.date = date;
        }
    }

    /// Preview `event` with every field of the patch applied.
    pub fn applied_to(&self, event: &Event) -> Event {
        let mut updated = event.clone();
        self.apply_all(&mut updated);
        updated
    }
}

/// Records to write and ids to delete for one logical mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationPlan {
    /// Full replacement records, matched to stored events by id.
    pub upserts: Vec<Event>,
    pub removals: Vec<String>,
    /// Set when a series-scope request found no siblings and fell back to
    /// touching only the given instance.
    pub degraded: bool,
}

impl MutationPlan {
    fn upsert(events: Vec<Event>) -> Self {
        Self {
            upserts: events,
            ..Self::default()
        }
    }

    fn remove(ids: Vec<String>) -> Self {
        Self {
            removals: ids,
            ..Self::default()
        }
    }

    fn degraded(mut self) -> Self {
        self.degraded = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.removals.is_empty()
    }

    /// The full event set after this plan, in original order.
    ///
    /// Removed ids are dropped, upserts replace records with the same id and
    /// upserts for unknown ids are appended.
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        let removed: HashSet<&str> = self.removals.iter().map(String::as_str).collect();
        let replacements: HashMap<&str, &Event> =
            self.upserts.iter().map(|event| (event.id.as_str(), event)).collect();
        let known: HashSet<&str> = events.iter().map(|event| event.id.as_str()).collect();

        let mut result: Vec<Event> = events
            .iter()
            .filter(|event| !removed.contains(event.id.as_str()))
            .map(|event| {
                replacements
                    .get(event.id.as_str())
                    .map(|updated| (*updated).clone())
                    .unwrap_or_else(|| event.clone())
            })
            .collect();

        result.extend(
            self.upserts
                .iter()
                .filter(|event| !known.contains(event.id.as_str()))
                .filter(|event| !removed.contains(event.id.as_str()))
                .cloned(),
        );

        result
    }
}

/// Series id → positions lookup over a slice of events.
pub struct SeriesIndex<'a> {
    events: &'a [Event],
    by_series: HashMap<&'a str, Vec<usize>>,
}

impl<'a> SeriesIndex<'a> {
    pub fn build(events: &'a [Event]) -> Self {
        let mut by_series: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (position, event) in events.iter().enumerate() {
            if let Some(series_id) = event.series_id() {
                by_series.entry(series_id).or_default().push(position);
            }
        }
        Self { events, by_series }
    }

    /// Instances of `series_id`, in slice order.
    pub fn members(&self, series_id: &str) -> Vec<&'a Event> {
        let events = self.events;
        self.by_series
            .get(series_id)
            .map(|positions| positions.iter().map(|&position| &events[position]).collect())
            .unwrap_or_default()
    }
}

/// True iff the event repeats with a positive interval.
pub fn is_recurring(event: &Event) -> bool {
    event.is_recurring()
}

/// Every instance sharing `event`'s series id, the event's own stored copy
/// included. Empty when the event carries no series id.
pub fn related_instances<'a>(event: &Event, all: &'a [Event]) -> Vec<&'a Event> {
    match event.series_id() {
        Some(series_id) => SeriesIndex::build(all).members(series_id),
        None => Vec::new(),
    }
}

/// Turn an instance into a standalone event.
pub fn detach(event: &mut Event) {
    event.repeat = RepeatDescriptor::none();
}

/// Edit `event` with `patch`.
///
/// `Single` applies the whole patch (date included) and detaches the
/// instance. `Series` applies everything but the date to each instance so
/// every sibling keeps its own date.
pub fn apply_edit(event: &Event, all: &[Event], patch: &EventPatch, scope: Scope) -> MutationPlan {
    if !is_recurring(event) {
        return MutationPlan::upsert(vec![patch.applied_to(event)]);
    }

    match scope {
        Scope::Single => {
            let mut updated = patch.applied_to(event);
            detach(&mut updated);
            MutationPlan::upsert(vec![updated])
        }
        Scope::Series => {
            let related = related_instances(event, all);
            if related.is_empty() {
                return MutationPlan::upsert(vec![patch.applied_to(event)]).degraded();
            }

            let updated = related
                .into_iter()
                .map(|sibling| {
                    let mut sibling = sibling.clone();
                    patch.apply_shared(&mut sibling);
                    sibling
                })
                .collect();
            MutationPlan::upsert(updated)
        }
    }
}

/// Delete `event`, or its whole series.
pub fn apply_delete(event: &Event, all: &[Event], scope: Scope) -> MutationPlan {
    if !is_recurring(event) || scope == Scope::Single {
        return MutationPlan::remove(vec![event.id.clone()]);
    }

    let related = related_instances(event, all);
    if related.is_empty() {
        return MutationPlan::remove(vec![event.id.clone()]).degraded();
    }

    MutationPlan::remove(related.into_iter().map(|sibling| sibling.id.clone()).collect())
}

/// Move `event` to `new_date`.
///
/// `Single` changes only this instance and detaches it. `Series` shifts
/// every sibling by the same number of days, preserving their spacing.
/// Moving to the current date is a no-op.
pub fn apply_move(event: &Event, all: &[Event], new_date: NaiveDate, scope: Scope) -> MutationPlan {
    if new_date == event.date {
        return MutationPlan::default();
    }

    let mut moved = event.clone();
    moved.date = new_date;

    if !is_recurring(event) {
        return MutationPlan::upsert(vec![moved]);
    }

    match scope {
        Scope::Single => {
            detach(&mut moved);
            MutationPlan::upsert(vec![moved])
        }
        Scope::Series => {
            let related = related_instances(event, all);
            if related.is_empty() {
                return MutationPlan::upsert(vec![moved]).degraded();
            }

            let offset = days_between(event.date, new_date);
            let shifted = related
                .into_iter()
                .map(|sibling| {
                    let mut sibling = sibling.clone();
                    sibling.date = add_days(sibling.date, offset);
                    sibling
                })
                .collect();
            MutationPlan::upsert(shifted)
        }
    }
}
