//! Visible-event projections: view window, free-text search and per-day
//! lookup. Every call recomputes from its inputs; nothing is cached.

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::models::settings::Settings;
use crate::models::ui::ViewType;
use crate::utils::date::{month_range, week_range};

/// Case policy for text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMatching {
    Sensitive,
    #[default]
    Insensitive,
}

impl CaseMatching {
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.search.case_sensitive {
            CaseMatching::Sensitive
        } else {
            CaseMatching::Insensitive
        }
    }
}

/// Inclusive date range shown by a week or month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ViewWindow {
    /// Window of `view` containing `date`.
    pub fn new(view: ViewType, date: NaiveDate) -> Self {
        let (start, end) = match view {
            ViewType::Week => week_range(date),
            ViewType::Month => month_range(date),
        };
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Events dated inside `window`, in input order.
pub fn filter_by_window(events: &[Event], window: &ViewWindow) -> Vec<Event> {
    events
        .iter()
        .filter(|event| window.contains(event.date))
        .cloned()
        .collect()
}

/// Substring match against title and description. A blank query matches;
/// any other query is matched as given, spaces included.
pub fn matches_query(event: &Event, query: &str, case: CaseMatching) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    match case {
        CaseMatching::Sensitive => event.title.contains(query) || event.description.contains(query),
        CaseMatching::Insensitive => {
            let needle = query.to_lowercase();
            event.title.to_lowercase().contains(&needle)
                || event.description.to_lowercase().contains(&needle)
        }
    }
}

/// Events matching `query`, in input order.
pub fn search(events: &[Event], query: &str, case: CaseMatching) -> Vec<Event> {
    events
        .iter()
        .filter(|event| matches_query(event, query, case))
        .cloned()
        .collect()
}

/// Events inside `window` that also match `query`.
pub fn project(events: &[Event], window: &ViewWindow, query: &str, case: CaseMatching) -> Vec<Event> {
    events
        .iter()
        .filter(|event| window.contains(event.date) && matches_query(event, query, case))
        .cloned()
        .collect()
}

/// Events on `date`, in input order.
pub fn events_for_day(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|event| event.date == date).collect()
}
