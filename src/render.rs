//! Terminal rendering for evplan-core types.
//!
//! Extension traits that add colored output to the core types using
//! owo_colors, so the core crate stays free of presentation concerns.

use evplan_core::query::ProfileStats;
use evplan_core::{Attendee, Event, RsvpStatus};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for RsvpStatus {
    fn render(&self) -> String {
        match self {
            RsvpStatus::Yes => self.as_str().green().to_string(),
            RsvpStatus::Maybe => self.as_str().yellow().to_string(),
            RsvpStatus::No => self.as_str().red().to_string(),
        }
    }
}

impl Render for Attendee {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.name,
            self.rsvp_status.render(),
            format!("({})", self.id).dimmed()
        )
    }
}

/// One-line card used by the event list.
impl Render for Event {
    fn render(&self) -> String {
        let rsvp = if self.is_rsvped() { "✓".green().to_string() } else { " ".to_string() };

        format!(
            "{} {} {}\n    {} · {}  {}",
            rsvp,
            self.title.bold(),
            format!("[{}]", self.id).dimmed(),
            render_when(self),
            self.location.name,
            pluralize_attendees(self.attendees.len()).dimmed()
        )
    }
}

impl Render for ProfileStats {
    fn render(&self) -> String {
        [
            format!("  {:<16}{}", "Total Events", self.total_events.bold()),
            format!("  {:<16}{}", "Upcoming", self.upcoming_events.bold()),
            format!("  {:<16}{}", "RSVP'd", self.events_rsvped.bold()),
        ]
        .join("\n")
    }
}

/// Full detail view of one event.
pub fn render_detail(event: &Event) -> String {
    let mut lines = vec![
        event.title.bold().to_string(),
        format!("  {}", render_when(event)),
        format!("  {}", event.location.name),
    ];

    if let Some(address) = event.location.address.as_deref().filter(|a| !a.is_empty()) {
        lines.push(format!("  {}", address.dimmed()));
    }
    lines.push(
        format!(
            "  {}, {}",
            event.location.latitude, event.location.longitude
        )
        .dimmed()
        .to_string(),
    );

    lines.push(String::new());
    if event.attendees.is_empty() {
        lines.push(format!("  {}", "No attendees yet".dimmed()));
    } else {
        lines.push(format!("  Attendees ({})", event.attendees.len()));
        lines.extend(event.attendees.iter().map(|a| format!("    {}", a.render())));
    }

    lines.push(String::new());
    lines.push(if event.is_rsvped() {
        format!("  {}", "You're going".green())
    } else {
        format!("  {}", "Not RSVP'd".dimmed())
    });

    lines.join("\n")
}

/// "March 20, 2025 at 18:00"
fn render_when(event: &Event) -> String {
    format!(
        "{} at {}",
        event.date.format("%B %-d, %Y"),
        event.time.format("%H:%M")
    )
}

fn pluralize_attendees(count: usize) -> String {
    if count == 1 {
        "1 attendee".to_string()
    } else {
        format!("{} attendees", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use evplan_core::Location;

    fn event() -> Event {
        Event {
            id: "1742493600000".to_string(),
            title: "Book club".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            time: NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
            location: Location {
                name: "Library".to_string(),
                address: None,
                latitude: 33.9,
                longitude: 35.5,
            },
            attendees: vec![],
        }
    }

    #[test]
    fn test_render_when() {
        assert_eq!(render_when(&event()), "March 20, 2025 at 09:05");
    }

    #[test]
    fn test_pluralize_attendees() {
        assert_eq!(pluralize_attendees(0), "0 attendees");
        assert_eq!(pluralize_attendees(1), "1 attendee");
    }

    #[test]
    fn test_detail_lists_attendees() {
        let mut event = event();
        event.toggle_rsvp();

        let detail = render_detail(&event);
        assert!(detail.contains("Attendees (1)"));
        assert!(detail.contains("You"));
        assert!(detail.contains("current-user"));
    }
}
