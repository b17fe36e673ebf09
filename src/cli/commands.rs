use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use calendar_engine::models::event::{Event, EventDraft};
use calendar_engine::models::recurrence::{RepeatDescriptor, RepeatType};
use calendar_engine::models::ui::{NavigationDirection, ViewType};
use calendar_engine::services::calendar::{Calendar, MutationOutcome, SaveOutcome};
use calendar_engine::services::event::queries::{events_for_day, ViewWindow};
use calendar_engine::services::event::series::{EventPatch, Scope};
use calendar_engine::services::event::EventStore;
use calendar_engine::utils::date::{month_grid, navigate};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use super::render::{print_conflicts, print_events, Render};
use super::EventArgs;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn add<S: EventStore>(
    calendar: &Calendar<S>,
    title: String,
    fields: EventArgs,
    repeat: RepeatType,
    interval: u32,
    until: Option<NaiveDate>,
    force: bool,
) -> Result<()> {
    let mut draft = EventDraft::new(title, fields.date, fields.start, fields.end);
    draft.description = fields.description;
    draft.location = fields.location;
    draft.category = fields.category;
    draft.notification_time = fields
        .notify
        .unwrap_or(calendar.settings().notifications.default_minutes);

    if repeat != RepeatType::None {
        let mut descriptor = RepeatDescriptor::new(repeat, interval);
        descriptor.end_date = until;
        draft.repeat = descriptor;
    }

    match calendar.add_event(draft, today(), force)? {
        SaveOutcome::Saved(events) => {
            println!("Saved {} event(s):", events.len());
            print_events(&events);
        }
        SaveOutcome::Conflicts(conflicts) => print_conflicts(&conflicts),
    }
    Ok(())
}

pub fn list<S: EventStore>(
    calendar: &Calendar<S>,
    view: ViewType,
    date: Option<NaiveDate>,
    query: &str,
    json: bool,
) -> Result<()> {
    let events = calendar.visible_events(view, date.unwrap_or_else(today), query)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&events).context("Failed to serialize events")?
        );
    } else {
        print_events(&events);
    }
    Ok(())
}

pub fn conflicts<S: EventStore>(calendar: &Calendar<S>, id: &str) -> Result<()> {
    let overlapping = calendar.conflicts_for(id)?;
    if overlapping.is_empty() {
        println!("No conflicts.");
    } else {
        print_events(&overlapping);
    }
    Ok(())
}

fn report(outcome: MutationOutcome) {
    match outcome {
        MutationOutcome::Applied(plan) => println!("{}", plan.render()),
        MutationOutcome::Conflicts(conflicts) => print_conflicts(&conflicts),
        MutationOutcome::Unchanged => println!("Nothing to change."),
    }
}

pub fn edit<S: EventStore>(
    calendar: &Calendar<S>,
    id: &str,
    patch: EventPatch,
    scope: Scope,
    force: bool,
) -> Result<()> {
    if scope == Scope::Series && patch.date.is_some() {
        log::warn!("--date is ignored for series edits; use `move --scope series`");
    }
    report(calendar.edit_event(id, &patch, scope, force)?);
    Ok(())
}

pub fn delete<S: EventStore>(calendar: &Calendar<S>, id: &str, scope: Scope) -> Result<()> {
    let plan = calendar.delete_event(id, scope)?;
    println!("{}", plan.render());
    Ok(())
}

pub fn move_event<S: EventStore>(
    calendar: &Calendar<S>,
    id: &str,
    to: NaiveDate,
    scope: Scope,
    force: bool,
) -> Result<()> {
    report(calendar.move_event(id, to, scope, force)?);
    Ok(())
}

pub fn notify<S: EventStore>(calendar: &Calendar<S>, now: Option<NaiveDateTime>) -> Result<()> {
    let now = now.unwrap_or_else(|| Local::now().naive_local());
    let due = calendar.due_notifications(now, &HashSet::new())?;

    if due.is_empty() {
        println!("No reminders due.");
    }
    for notification in due {
        println!("{}", notification.message);
    }
    Ok(())
}

pub fn import<S: EventStore>(calendar: &Calendar<S>, path: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let events: Vec<Event> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse events from {}", path.display()))?;

    let count = calendar.import(events)?;
    println!("Imported {} event(s).", count);
    Ok(())
}

pub fn reset<S: EventStore>(calendar: &Calendar<S>, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete all events without --yes");
    }
    calendar.reset()?;
    println!("All events removed.");
    Ok(())
}

pub fn grid<S: EventStore>(
    calendar: &Calendar<S>,
    date: Option<NaiveDate>,
    prev: bool,
    next: bool,
) -> Result<()> {
    let mut date = date.unwrap_or_else(today);
    if prev {
        date = navigate(date, ViewType::Month, NavigationDirection::Previous);
    } else if next {
        date = navigate(date, ViewType::Month, NavigationDirection::Next);
    }

    let window = ViewWindow::new(ViewType::Month, date);
    let events = calendar.visible_events(ViewType::Month, date, "")?;

    println!("{}", date.format("%B %Y"));
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in month_grid(date) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let busy = window
                        .start
                        .with_day(*day)
                        .is_some_and(|d| !events_for_day(&events, d).is_empty());
                    format!("{:>3}{}", day, if busy { "*" } else { " " })
                }
                None => "    ".to_string(),
            })
            .collect();
        println!("{}", row.join(""));
    }
    Ok(())
}
