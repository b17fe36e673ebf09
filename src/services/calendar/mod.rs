//! Calendar facade.
//!
//! Plays the part of the form, drag-and-drop and dialog callbacks: it loads a
//! snapshot from the [`EventStore`], asks the pure engine what should change,
//! and writes the resulting plan back. Conflicts are reported to the caller
//! instead of being written unless `force` is set.

use std::collections::HashSet;

use anyhow::{anyhow, bail, Result};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::models::event::{Event, EventDraft};
use crate::models::settings::Settings;
use crate::models::ui::ViewType;
use crate::services::event::overlap::{find_overlapping, find_overlapping_draft};
use crate::services::event::queries::{project, CaseMatching, ViewWindow};
use crate::services::event::recurrence::{expand_draft, ExpansionPolicy};
use crate::services::event::series::{apply_delete, apply_edit, apply_move, EventPatch, MutationPlan, Scope};
use crate::services::event::EventStore;
use crate::services::notification::{upcoming_notifications, Notification};

/// Result of creating an event or a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Stored records, one per generated instance.
    Saved(Vec<Event>),
    /// Nothing was written; these stored events collide with the draft.
    Conflicts(Vec<Event>),
}

/// Result of an edit or a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied(MutationPlan),
    Conflicts(Vec<Event>),
    /// The request changes nothing (e.g. a move onto the current date).
    Unchanged,
}

pub struct Calendar<S: EventStore> {
    store: S,
    settings: Settings,
}

impl<S: EventStore> Calendar<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self { store, settings }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn events(&self) -> Result<Vec<Event>> {
        self.store.list_all()
    }

    fn require(&self, id: &str) -> Result<Event> {
        self.store
            .get(id)?
            .ok_or_else(|| anyhow!("Event with id {} not found", id))
    }

    /// Store a new event, or a whole series when the draft repeats.
    ///
    /// A recurring draft gets a fresh series id and is expanded to its end
    /// date, or for an open-ended rule to the configured horizon past the
    /// later of `today` and its anchor. Series creation does not check for
    /// overlaps. A one-off draft is checked against the stored events.
    pub fn add_event(&self, mut draft: EventDraft, today: NaiveDate, force: bool) -> Result<SaveOutcome> {
        draft.validate()?;

        if draft.is_recurring() {
            draft.repeat.series_id = Some(Uuid::new_v4().to_string());
            let policy = ExpansionPolicy::from_settings(&self.settings, today);
            let instances = expand_draft(&draft, &policy)?;
            if instances.is_empty() {
                bail!(
                    "Repeat rule starting {} ends before its first occurrence",
                    draft.date
                );
            }

            let created = self.store.create_many(instances)?;
            log::info!(
                "Created series {} with {} instances ({})",
                draft.repeat.series_id.as_deref().unwrap_or_default(),
                created.len(),
                draft.repeat.describe()
            );
            return Ok(SaveOutcome::Saved(created));
        }

        if !force {
            let all = self.store.list_all()?;
            let conflicts = find_overlapping_draft(&draft, None, &all);
            if !conflicts.is_empty() {
                log::info!("'{}' overlaps {} events", draft.title, conflicts.len());
                return Ok(SaveOutcome::Conflicts(conflicts.into_iter().cloned().collect()));
            }
        }

        let created = self.store.create(draft)?;
        Ok(SaveOutcome::Saved(vec![created]))
    }

    /// Edit an event, or every instance of its series.
    pub fn edit_event(&self, id: &str, patch: &EventPatch, scope: Scope, force: bool) -> Result<MutationOutcome> {
        let event = self.require(id)?;
        if patch.is_empty() {
            return Ok(MutationOutcome::Unchanged);
        }

        let all = self.store.list_all()?;
        let plan = apply_edit(&event, &all, patch, scope);
        self.commit(plan, &all, force)
    }

    /// Delete an event, or every instance of its series.
    pub fn delete_event(&self, id: &str, scope: Scope) -> Result<MutationPlan> {
        let event = self.require(id)?;
        let all = self.store.list_all()?;
        let plan = apply_delete(&event, &all, scope);

        if plan.degraded {
            log::warn!("Series of event {} has no stored instances; deleting only this one", id);
        }

        self.store.apply_plan(&plan)?;
        Ok(plan)
    }

    /// Move an event to `new_date`, or shift its whole series by the same
    /// number of days.
    pub fn move_event(&self, id: &str, new_date: NaiveDate, scope: Scope, force: bool) -> Result<MutationOutcome> {
        let event = self.require(id)?;
        let all = self.store.list_all()?;
        let plan = apply_move(&event, &all, new_date, scope);
        self.commit(plan, &all, force)
    }

    /// Overlap-gate and persist a plan. Only a plan touching a single event
    /// is checked; series-wide changes are written as they are.
    fn commit(&self, plan: MutationPlan, all: &[Event], force: bool) -> Result<MutationOutcome> {
        if plan.is_empty() {
            return Ok(MutationOutcome::Unchanged);
        }

        if plan.degraded {
            log::warn!("Series scope found no sibling instances; applying to one event only");
        }

        if !force {
            if let [single] = plan.upserts.as_slice() {
                let conflicts = find_overlapping(single, all);
                if !conflicts.is_empty() {
                    return Ok(MutationOutcome::Conflicts(conflicts.into_iter().cloned().collect()));
                }
            }
        }

        self.store.apply_plan(&plan)?;
        Ok(MutationOutcome::Applied(plan))
    }

    /// Stored events overlapping the event with `id`.
    pub fn conflicts_for(&self, id: &str) -> Result<Vec<Event>> {
        let event = self.require(id)?;
        let all = self.store.list_all()?;
        Ok(find_overlapping(&event, &all).into_iter().cloned().collect())
    }

    /// Events inside the `view` window around `date` matching `query`.
    pub fn visible_events(&self, view: ViewType, date: NaiveDate, query: &str) -> Result<Vec<Event>> {
        let all = self.store.list_all()?;
        let window = ViewWindow::new(view, date);
        Ok(project(&all, &window, query, CaseMatching::from_settings(&self.settings)))
    }

    pub fn due_notifications(
        &self,
        now: NaiveDateTime,
        already_notified: &HashSet<String>,
    ) -> Result<Vec<Notification>> {
        let all = self.store.list_all()?;
        Ok(upcoming_notifications(&all, now, already_notified))
    }

    /// Store every record as given, keeping ids and series links.
    pub fn import(&self, events: Vec<Event>) -> Result<usize> {
        for event in &events {
            event.validate()?;
        }

        let count = events.len();
        let plan = MutationPlan {
            upserts: events,
            ..MutationPlan::default()
        };
        self.store.apply_plan(&plan)?;
        log::info!("Imported {} events", count);
        Ok(count)
    }

    pub fn reset(&self) -> Result<()> {
        self.store.reset()
    }
}
