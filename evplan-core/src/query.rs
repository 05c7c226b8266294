//! Read-only views over the event list: search, calendar marks, stats.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::Event;

/// Events whose title or location name contains `query`, ignoring case.
/// A blank query matches everything.
pub fn search<'a>(events: &'a [Event], query: &str) -> Vec<&'a Event> {
    let needle = query.trim().to_lowercase();

    events
        .iter()
        .filter(|event| {
            needle.is_empty()
                || event.title.to_lowercase().contains(&needle)
                || event.location.name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Dates that have at least one event, in calendar order.
pub fn marked_dates(events: &[Event]) -> BTreeSet<NaiveDate> {
    events.iter().map(|event| event.date).collect()
}

/// Events on `date`, in creation order.
pub fn events_on(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|event| event.date == date).collect()
}

/// The event opened when a marked calendar day is picked.
pub fn first_event_on(events: &[Event], date: NaiveDate) -> Option<&Event> {
    events.iter().find(|event| event.date == date)
}

/// Counters shown on the profile screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_events: usize,
    /// Events dated today or later.
    pub upcoming_events: usize,
    pub events_rsvped: usize,
}

impl ProfileStats {
    pub fn compute(events: &[Event], today: NaiveDate) -> Self {
        ProfileStats {
            total_events: events.len(),
            upcoming_events: events.iter().filter(|e| e.date >= today).count(),
            events_rsvped: events.iter().filter(|e| e.is_rsvped()).count(),
        }
    }
}
