//! Calendar event service entry point.
//!
//! The pure engine lives in [`recurrence`], [`overlap`], [`series`] and
//! [`queries`]. [`EventStore`] is the persistence seam the calendar facade
//! talks to; [`EventService`] implements it on SQLite.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::event::{Event, EventDraft};

pub mod crud;
pub mod overlap;
pub mod queries;
pub mod recurrence;
pub mod series;
mod shared;

use series::MutationPlan;

/// Storage collaborator holding the flat event list.
#[cfg_attr(test, mockall::automock)]
pub trait EventStore {
    /// Every stored event, in insertion order.
    fn list_all(&self) -> Result<Vec<Event>>;

    fn get(&self, id: &str) -> Result<Option<Event>>;

    /// Persist a draft under a freshly generated id.
    fn create(&self, draft: EventDraft) -> Result<Event>;

    /// Persist several drafts atomically.
    fn create_many(&self, drafts: Vec<EventDraft>) -> Result<Vec<Event>>;

    /// Replace a stored event. Fails if the id is unknown.
    fn update(&self, event: &Event) -> Result<()>;

    fn update_many(&self, events: &[Event]) -> Result<()>;

    /// Remove a stored event. Fails if the id is unknown.
    fn delete(&self, id: &str) -> Result<()>;

    fn delete_many(&self, ids: &[String]) -> Result<()>;

    /// Write every upsert and removal of `plan` in one transaction.
    fn apply_plan(&self, plan: &MutationPlan) -> Result<()>;

    /// Remove all events.
    fn reset(&self) -> Result<()>;
}

/// Service for managing calendar events stored in SQLite.
pub struct EventService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> EventService<'a> {
    /// Create a new EventService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
