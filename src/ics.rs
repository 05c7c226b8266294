//! ICS file generation for calendar entries.

use chrono::{NaiveDateTime, Utc};
use evplan_core::device::CalendarEntry;
use icalendar::{Calendar, Component, EventLike};

/// Floating local time, the way the event was entered.
fn format_floating(dt: &NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// Generate .ics content holding a single entry.
pub fn generate_ics(entry: &CalendarEntry, uid: &str) -> String {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(uid);
    ics_event.summary(&entry.title);

    // DTSTAMP is required by RFC 5545
    ics_event.add_property("DTSTAMP", Utc::now().format("%Y%m%dT%H%M%SZ").to_string());

    ics_event.add_property("DTSTART", format_floating(&entry.start_date));
    ics_event.add_property("DTEND", format_floating(&entry.end_date));
    ics_event.location(&entry.location);
    ics_event.description(&entry.notes);

    cal.push(ics_event.done());
    cal.done().to_string()
}

/// Filename for an exported entry, e.g. `2025-03-20T1800__book-club.ics`
pub fn generate_filename(entry: &CalendarEntry) -> String {
    format!(
        "{}__{}.ics",
        entry.start_date.format("%Y-%m-%dT%H%M"),
        slugify(&entry.title)
    )
}

/// Longest slug kept in a filename.
const MAX_SLUG_LEN: usize = 50;

fn slugify(s: &str) -> String {
    let slug: String = slug::slugify(s).chars().take(MAX_SLUG_LEN).collect();
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() { "event".to_string() } else { slug.to_string() }
}
