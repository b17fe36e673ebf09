use super::series::MutationPlan;
use super::shared::{format_optional_date, row_to_event, EVENT_COLUMNS};
use super::{EventService, EventStore};
use crate::models::event::{Event, EventDraft};
use crate::utils::date::{format_date, format_time};
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}

fn insert_event(conn: &Connection, event: &Event, now: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO events (
            id, title, date, start_time, end_time, description, location, category,
            repeat_type, repeat_interval, repeat_end_date, series_id, notification_time,
            created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            date = excluded.date,
            start_time = excluded.start_time,
            end_time = excluded.end_time,
            description = excluded.description,
            location = excluded.location,
            category = excluded.category,
            repeat_type = excluded.repeat_type,
            repeat_interval = excluded.repeat_interval,
            repeat_end_date = excluded.repeat_end_date,
            series_id = excluded.series_id,
            notification_time = excluded.notification_time,
            updated_at = excluded.updated_at",
        params![
            event.id,
            event.title,
            format_date(event.date),
            format_time(event.start_time),
            format_time(event.end_time),
            event.description,
            event.location,
            event.category,
            event.repeat.kind.as_str(),
            event.repeat.interval,
            format_optional_date(event.repeat.end_date),
            event.repeat.series_id,
            event.notification_time,
            now,
        ],
    )
    .with_context(|| format!("Failed to write event {}", event.id))?;

    Ok(())
}

fn update_event(conn: &Connection, event: &Event, now: &str) -> Result<()> {
    event.validate()?;

    let rows_affected = conn
        .execute(
            "UPDATE events SET
                title = ?, date = ?, start_time = ?, end_time = ?, description = ?,
                location = ?, category = ?, repeat_type = ?, repeat_interval = ?,
                repeat_end_date = ?, series_id = ?, notification_time = ?, updated_at = ?
             WHERE id = ?",
            params![
                event.title,
                format_date(event.date),
                format_time(event.start_time),
                format_time(event.end_time),
                event.description,
                event.location,
                event.category,
                event.repeat.kind.as_str(),
                event.repeat.interval,
                format_optional_date(event.repeat.end_date),
                event.repeat.series_id,
                event.notification_time,
                now,
                event.id,
            ],
        )
        .context("Failed to update event")?;

    if rows_affected == 0 {
        return Err(anyhow!("Event with id {} not found", event.id));
    }

    Ok(())
}

fn delete_event(conn: &Connection, id: &str) -> Result<()> {
    let rows_affected = conn
        .execute("DELETE FROM events WHERE id = ?", [id])
        .context("Failed to delete event")?;

    if rows_affected == 0 {
        return Err(anyhow!("Event with id {} not found", id));
    }

    Ok(())
}

impl EventStore for EventService<'_> {
    fn list_all(&self) -> Result<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM events ORDER BY rowid", EVENT_COLUMNS))?;

        let events = stmt
            .query_map([], row_to_event)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load events")?;

        Ok(events)
    }

    fn get(&self, id: &str) -> Result<Option<Event>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS),
                [id],
                row_to_event,
            )
            .optional()
            .with_context(|| format!("Failed to load event {}", id))
    }

    fn create(&self, draft: EventDraft) -> Result<Event> {
        draft.validate()?;

        let event = Event::from_draft(new_event_id(), draft);
        insert_event(self.conn, &event, &Local::now().to_rfc3339())?;
        log::debug!("Created event {} on {}", event.id, event.date);

        Ok(event)
    }

    fn create_many(&self, drafts: Vec<EventDraft>) -> Result<Vec<Event>> {
        for draft in &drafts {
            draft.validate()?;
        }

        let now = Local::now().to_rfc3339();
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin transaction")?;

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let event = Event::from_draft(new_event_id(), draft);
            insert_event(&tx, &event, &now)?;
            created.push(event);
        }

        tx.commit().context("Failed to commit new events")?;
        log::debug!("Created {} events", created.len());

        Ok(created)
    }

    fn update(&self, event: &Event) -> Result<()> {
        update_event(self.conn, event, &Local::now().to_rfc3339())
    }

    fn update_many(&self, events: &[Event]) -> Result<()> {
        let now = Local::now().to_rfc3339();
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin transaction")?;

        for event in events {
            update_event(&tx, event, &now)?;
        }

        tx.commit().context("Failed to commit event updates")?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        delete_event(self.conn, id)
    }

    fn delete_many(&self, ids: &[String]) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin transaction")?;

        for id in ids {
            delete_event(&tx, id)?;
        }

        tx.commit().context("Failed to commit event deletes")?;
        Ok(())
    }

    fn apply_plan(&self, plan: &MutationPlan) -> Result<()> {
        for event in &plan.upserts {
            event.validate()?;
        }

        let now = Local::now().to_rfc3339();
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin transaction")?;

        for id in &plan.removals {
            tx.execute("DELETE FROM events WHERE id = ?", [id])
                .with_context(|| format!("Failed to delete event {}", id))?;
        }
        for event in &plan.upserts {
            insert_event(&tx, event, &now)?;
        }

        tx.commit().context("Failed to commit mutation")?;
        log::debug!(
            "Applied plan: {} upserts, {} removals",
            plan.upserts.len(),
            plan.removals.len()
        );

        Ok(())
    }

    fn reset(&self) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM events", [])
            .context("Failed to clear events")?;
        log::info!("Removed {} events", removed);
        Ok(())
    }
}
