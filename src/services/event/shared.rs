use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{self, Result, Row};

use crate::models::event::Event;
use crate::models::recurrence::{RepeatDescriptor, RepeatType};
use crate::utils::date::{DATE_FORMAT, TIME_FORMAT};

pub(crate) const EVENT_COLUMNS: &str = "id, title, date, start_time, end_time, description, \
     location, category, repeat_type, repeat_interval, repeat_end_date, series_id, notification_time";

fn conversion_error<E>(index: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

pub(crate) fn to_date(index: usize, value: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|e| conversion_error(index, e))
}

pub(crate) fn to_time(index: usize, value: String) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(&value, TIME_FORMAT).map_err(|e| conversion_error(index, e))
}

/// Map a row selected with [`EVENT_COLUMNS`] back into an event.
pub(crate) fn row_to_event(row: &Row<'_>) -> Result<Event> {
    let kind = RepeatType::from_str(&row.get::<_, String>(8)?).map_err(|e| conversion_error(8, e))?;
    let end_date = row
        .get::<_, Option<String>>(10)?
        .map(|value| to_date(10, value))
        .transpose()?;

    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        date: to_date(2, row.get(2)?)?,
        start_time: to_time(3, row.get(3)?)?,
        end_time: to_time(4, row.get(4)?)?,
        description: row.get(5)?,
        location: row.get(6)?,
        category: row.get(7)?,
        repeat: RepeatDescriptor {
            kind,
            interval: row.get(9)?,
            end_date,
            series_id: row.get(11)?,
        },
        notification_time: row.get(12)?,
    })
}

pub(crate) fn format_optional_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}
