//! Argument definitions and dispatch for the `calendar-engine` binary.
//!
//! The binary is a thin caller: it turns flags into drafts, patches and
//! scopes, and hands them to the [`Calendar`] facade.

mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use calendar_engine::models::recurrence::RepeatType;
use calendar_engine::models::ui::ViewType;
use calendar_engine::services::calendar::Calendar;
use calendar_engine::services::database::Database;
use calendar_engine::services::event::series::{EventPatch, Scope};
use calendar_engine::services::event::EventService;
use calendar_engine::services::settings::SettingsService;
use calendar_engine::utils::date::{parse_date, parse_time};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "calendar-engine")]
#[command(about = "Manage recurring events, detect conflicts and search your calendar")]
pub struct Cli {
    /// Settings file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file, overriding the configured one
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an event, or a series when --repeat is given
    Add {
        title: String,

        #[command(flatten)]
        fields: EventArgs,

        /// none, daily, weekly, monthly or yearly
        #[arg(long, default_value = "none")]
        repeat: RepeatType,

        /// Repeat every N days/weeks/months/years
        #[arg(long, default_value_t = 1)]
        interval: u32,

        /// Last date (inclusive) of the series (YYYY-MM-DD)
        #[arg(long, value_parser = date_arg)]
        until: Option<NaiveDate>,

        /// Save even if the event overlaps others
        #[arg(long)]
        force: bool,
    },
    /// Show events in a week or month window
    List {
        #[arg(long, default_value = "month")]
        view: ViewType,

        /// Any date inside the window (defaults to today)
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,

        /// Only events whose title or description contains this text
        #[arg(short, long, default_value = "")]
        query: String,

        /// Print JSON records instead of lines
        #[arg(long)]
        json: bool,
    },
    /// List events that overlap the given one
    Conflicts { id: String },
    /// Change fields of an event or its whole series
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// New date (single scope only)
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,

        #[arg(long, value_parser = time_arg)]
        start: Option<NaiveTime>,

        #[arg(long, value_parser = time_arg)]
        end: Option<NaiveTime>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Minutes of advance notice
        #[arg(long)]
        notify: Option<u32>,

        /// single or series
        #[arg(long, default_value = "single")]
        scope: Scope,

        #[arg(long)]
        force: bool,
    },
    /// Delete an event or its whole series
    Delete {
        id: String,

        #[arg(long, default_value = "single")]
        scope: Scope,
    },
    /// Move an event (or shift its series) to another date
    Move {
        id: String,

        #[arg(long, value_parser = date_arg)]
        to: NaiveDate,

        #[arg(long, default_value = "single")]
        scope: Scope,

        #[arg(long)]
        force: bool,
    },
    /// Print reminders that are due
    Notify {
        /// Reference time (YYYY-MM-DDTHH:MM, defaults to now)
        #[arg(long, value_parser = datetime_arg)]
        now: Option<NaiveDateTime>,
    },
    /// Load events from a JSON file, keeping ids and series links
    Import { path: PathBuf },
    /// Remove every stored event
    Reset {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Print a month grid, marking days with events
    Grid {
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,

        /// Step to the previous month
        #[arg(long, conflicts_with = "next")]
        prev: bool,

        /// Step to the next month
        #[arg(long)]
        next: bool,
    },
}

/// Fields shared by every new event.
#[derive(Args)]
struct EventArgs {
    /// YYYY-MM-DD
    #[arg(long, value_parser = date_arg)]
    date: NaiveDate,

    /// HH:MM
    #[arg(long, value_parser = time_arg)]
    start: NaiveTime,

    /// HH:MM
    #[arg(long, value_parser = time_arg)]
    end: NaiveTime,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, default_value = "")]
    location: String,

    #[arg(long, default_value = "")]
    category: String,

    /// Minutes of advance notice (defaults to the configured value)
    #[arg(long)]
    notify: Option<u32>,
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

fn time_arg(value: &str) -> Result<NaiveTime, String> {
    parse_time(value).map_err(|e| e.to_string())
}

fn datetime_arg(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .map_err(|e| format!("Invalid date-time '{}': {}", value, e))
}

pub fn run(cli: Cli) -> Result<()> {
    let settings_service = match cli.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_environment()?,
    };
    let settings = settings_service.get()?;

    let db_path = cli
        .database
        .unwrap_or_else(|| SettingsService::database_path(&settings));
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let db_path = db_path.to_string_lossy().into_owned();
    let db = Database::new(&db_path)?;
    db.initialize_schema()?;
    log::debug!("Using database {}", db_path);

    let calendar = Calendar::new(EventService::new(db.connection()), settings);

    match cli.command {
        Commands::Add {
            title,
            fields,
            repeat,
            interval,
            until,
            force,
        } => commands::add(&calendar, title, fields, repeat, interval, until, force),
        Commands::List {
            view,
            date,
            query,
            json,
        } => commands::list(&calendar, view, date, &query, json),
        Commands::Conflicts { id } => commands::conflicts(&calendar, &id),
        Commands::Edit {
            id,
            title,
            date,
            start,
            end,
            description,
            location,
            category,
            notify,
            scope,
            force,
        } => {
            let patch = EventPatch {
                title,
                date,
                start_time: start,
                end_time: end,
                description,
                location,
                category,
                notification_time: notify,
            };
            commands::edit(&calendar, &id, patch, scope, force)
        }
        Commands::Delete { id, scope } => commands::delete(&calendar, &id, scope),
        Commands::Move {
            id,
            to,
            scope,
            force,
        } => commands::move_event(&calendar, &id, to, scope, force),
        Commands::Notify { now } => commands::notify(&calendar, now),
        Commands::Import { path } => commands::import(&calendar, &path),
        Commands::Reset { yes } => commands::reset(&calendar, yes),
        Commands::Grid { date, prev, next } => commands::grid(&calendar, date, prev, next),
    }
}
