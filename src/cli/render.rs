//! Plain-text rendering of events for the terminal.

use calendar_engine::models::event::Event;
use calendar_engine::services::event::series::MutationPlan;
use calendar_engine::utils::date::{format_date, format_time};

/// Text rendering for terminal output.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let mut line = format!(
            "{} {}-{}  {}",
            format_date(self.date),
            format_time(self.start_time),
            format_time(self.end_time),
            self.title
        );

        if !self.location.is_empty() {
            line.push_str(&format!(" @ {}", self.location));
        }
        if self.is_recurring() {
            line.push_str(&format!("  [{}]", self.repeat.describe()));
        }
        line.push_str(&format!("  ({})", self.id));
        line
    }
}

impl Render for MutationPlan {
    fn render(&self) -> String {
        let mut summary = format!(
            "{} updated, {} removed",
            self.upserts.len(),
            self.removals.len()
        );
        if self.degraded {
            summary.push_str(" (series not found, applied to this event only)");
        }
        summary
    }
}

pub fn print_events(events: &[Event]) {
    if events.is_empty() {
        println!("No events.");
        return;
    }
    for event in events {
        println!("{}", event.render());
    }
}

pub fn print_conflicts(conflicts: &[Event]) {
    println!("Overlaps {} event(s):", conflicts.len());
    for event in conflicts {
        println!("  {}", event.render());
    }
    println!("Re-run with --force to save anyway.");
}
