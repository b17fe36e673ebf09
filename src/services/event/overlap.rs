//! Detect events whose time ranges collide on the same day.
//!
//! Ranges are half-open `[start, end)`: an event ending at 12:00 does not
//! conflict with one starting at 12:00. Events on different dates never
//! overlap because nothing spans midnight.

use chrono::{NaiveDate, NaiveTime};

use crate::models::event::{Event, EventDraft};

/// Anything occupying a time range on one calendar date.
pub trait Scheduled {
    fn date(&self) -> NaiveDate;
    fn start_time(&self) -> NaiveTime;
    fn end_time(&self) -> NaiveTime;
}

impl Scheduled for Event {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    fn end_time(&self) -> NaiveTime {
        self.end_time
    }
}

impl Scheduled for EventDraft {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    fn end_time(&self) -> NaiveTime {
        self.end_time
    }
}

/// True when both ranges fall on the same date and
/// `start_a < end_b && start_b < end_a`.
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Scheduled + ?Sized,
    B: Scheduled + ?Sized,
{
    if a.date() != b.date() {
        return false;
    }

    a.start_time() < b.end_time() && b.start_time() < a.end_time()
}

/// Every event in `all` colliding with `candidate`, in their original order.
///
/// An entry sharing the candidate's id is the candidate itself (e.g. the
/// stored copy of an event being edited) and is skipped.
pub fn find_overlapping<'a>(candidate: &Event, all: &'a [Event]) -> Vec<&'a Event> {
    collect_overlaps(candidate, Some(candidate.id.as_str()), all)
}

/// Like [`find_overlapping`] for a draft that has no id yet.
///
/// `editing_id` names the stored event the draft will replace, if any.
pub fn find_overlapping_draft<'a>(
    draft: &EventDraft,
    editing_id: Option<&str>,
    all: &'a [Event],
) -> Vec<&'a Event> {
    collect_overlaps(draft, editing_id, all)
}

pub fn has_overlap(candidate: &Event, all: &[Event]) -> bool {
    !find_overlapping(candidate, all).is_empty()
}

fn collect_overlaps<'a, C>(candidate: &C, exclude_id: Option<&str>, all: &'a [Event]) -> Vec<&'a Event>
where
    C: Scheduled + ?Sized,
{
    all.iter()
        .filter(|event| exclude_id != Some(event.id.as_str()))
        .filter(|event| overlaps(candidate, *event))
        .collect()
}
