use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_events_table(conn)?;
    run_events_migrations(conn)?;
    create_events_indexes(conn)?;
    Ok(())
}

fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT '',
            repeat_type TEXT NOT NULL DEFAULT 'none',
            repeat_interval INTEGER NOT NULL DEFAULT 0,
            repeat_end_date TEXT,
            series_id TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create events table")?;

    Ok(())
}

fn run_events_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "events",
        "notification_time",
        "ALTER TABLE events ADD COLUMN notification_time INTEGER NOT NULL DEFAULT 10",
    )?;

    Ok(())
}

fn create_events_indexes(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_series_id ON events(series_id)",
        [],
    )
    .context("Failed to create series index")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_date ON events(date)",
        [],
    )
    .context("Failed to create date index")?;

    Ok(())
}
