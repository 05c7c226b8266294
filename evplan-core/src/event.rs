//! Event, attendee and location types.
//!
//! These are the one canonical shape of an event record. The stores persist
//! them as-is and every consumer (list, calendar, detail, stats) reads them
//! through these types.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{CURRENT_USER_ID, CURRENT_USER_NAME};
use crate::error::{PlannerError, PlannerResult};

static LAST_ISSUED_ID: AtomicI64 = AtomicI64::new(0);

/// Generate a fresh timestamp-derived id (milliseconds since the epoch).
///
/// Ids are strictly increasing within a process, so two calls in the same
/// millisecond still return different values.
pub fn next_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ISSUED_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ISSUED_ID.compare_exchange_weak(
            last,
            candidate,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return candidate.to_string(),
            Err(actual) => last = actual,
        }
    }
}

/// An attendee's response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Yes,
    #[default]
    No,
    Maybe,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Yes => "yes",
            RsvpStatus::No => "no",
            RsvpStatus::Maybe => "maybe",
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsvpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yes" => Ok(RsvpStatus::Yes),
            "no" => Ok(RsvpStatus::No),
            "maybe" => Ok(RsvpStatus::Maybe),
            other => Err(format!(
                "Invalid RSVP status '{}'. Expected yes, no or maybe",
                other
            )),
        }
    }
}

/// A named participant on an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
}

impl Attendee {
    /// A new attendee with a fresh id and the default status (`no`).
    pub fn new(name: &str) -> PlannerResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::Validation(
                "attendee name cannot be blank".into(),
            ));
        }

        Ok(Attendee {
            id: next_id(),
            name: name.to_string(),
            rsvp_status: RsvpStatus::No,
        })
    }

    /// The local user, as added by an RSVP.
    pub fn current_user() -> Self {
        Attendee {
            id: CURRENT_USER_ID.to_string(),
            name: CURRENT_USER_NAME.to_string(),
            rsvp_status: RsvpStatus::Yes,
        }
    }

    pub fn is_current_user(&self) -> bool {
        self.id == CURRENT_USER_ID
    }
}

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A denormalized place reference stored inline on the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// The street address, or the place name when no address was recorded.
    pub fn address_or_name(&self) -> &str {
        match self.address.as_deref() {
            Some(address) if !address.trim().is_empty() => address,
            _ => &self.name,
        }
    }
}

/// A planned occasion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Local time of day, serialized as `HH:mm`.
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub location: Location,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

impl Event {
    /// Local start of the event (date + time, no timezone).
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Whether the local user has RSVPed.
    pub fn is_rsvped(&self) -> bool {
        self.attendees.iter().any(Attendee::is_current_user)
    }

    pub fn attendee(&self, id: &str) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.id == id)
    }

    /// Append an attendee. Returns false, leaving the list untouched, if an
    /// attendee with the same id is already present.
    pub fn add_attendee(&mut self, attendee: Attendee) -> bool {
        if self.attendee(&attendee.id).is_some() {
            return false;
        }
        self.attendees.push(attendee);
        true
    }

    /// Remove the attendee with the given id. Returns whether one was removed.
    pub fn remove_attendee(&mut self, id: &str) -> bool {
        let before = self.attendees.len();
        self.attendees.retain(|a| a.id != id);
        self.attendees.len() != before
    }

    /// Set an attendee's response. Returns false if no such attendee exists.
    pub fn set_rsvp_status(&mut self, id: &str, status: RsvpStatus) -> bool {
        match self.attendees.iter_mut().find(|a| a.id == id) {
            Some(attendee) => {
                attendee.rsvp_status = status;
                true
            }
            None => false,
        }
    }

    /// Flip the local user's RSVP and return the new state.
    ///
    /// RSVPing appends the current user with status `yes`; un-RSVPing
    /// removes them, so two toggles restore the original membership.
    pub fn toggle_rsvp(&mut self) -> bool {
        if self.is_rsvped() {
            self.remove_attendee(CURRENT_USER_ID);
            false
        } else {
            self.attendees.push(Attendee::current_user());
            true
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// The user-editable fields of an event, as filled in by the add/edit forms.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: Location,
    pub attendees: Vec<Attendee>,
}

impl EventDraft {
    /// Check the fields the forms require before saving.
    pub fn validate(&self) -> PlannerResult<()> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::Validation("title is required".into()));
        }
        if self.location.name.trim().is_empty() {
            return Err(PlannerError::Validation("location name is required".into()));
        }

        let mut seen = HashSet::new();
        for attendee in &self.attendees {
            if !seen.insert(attendee.id.as_str()) {
                return Err(PlannerError::Validation(format!(
                    "attendee '{}' appears more than once",
                    attendee.id
                )));
            }
        }

        Ok(())
    }

    /// Build a new event with a freshly generated id.
    pub fn into_event(self) -> PlannerResult<Event> {
        self.into_event_with_id(next_id())
    }

    /// Build the edited version of an existing event, keeping its id.
    pub fn into_event_with_id(self, id: String) -> PlannerResult<Event> {
        self.validate()?;

        Ok(Event {
            id,
            title: self.title.trim().to_string(),
            date: self.date,
            time: self.time,
            location: self.location,
            attendees: self.attendees,
        })
    }
}

impl From<Event> for EventDraft {
    fn from(event: Event) -> Self {
        EventDraft {
            title: event.title,
            date: event.date,
            time: event.time,
            location: event.location,
            attendees: event.attendees,
        }
    }
}

/// Serde adapter for `HH:mm` times.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    /// Parse `HH:mm`, also accepting a trailing `:ss`.
    pub fn parse(raw: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| format!("Invalid time '{}'. Expected HH:mm", raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_event() -> Event {
        Event {
            id: "1700000000000".to_string(),
            title: "Team Dinner".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            location: Location {
                name: "Mar Mikhael".to_string(),
                address: None,
                latitude: 33.8966,
                longitude: 35.5205,
            },
            attendees: vec![Attendee {
                id: "a1".to_string(),
                name: "Alice".to_string(),
                rsvp_status: RsvpStatus::Maybe,
            }],
        }
    }

    #[test]
    fn test_event_json_layout() {
        let event = make_test_event();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["date"], "2025-03-20");
        assert_eq!(json["time"], "19:30");
        assert_eq!(json["attendees"][0]["rsvpStatus"], "maybe");
        assert!(json["location"].get("address").is_none());
    }

    #[test]
    fn test_event_parses_original_layout() {
        let raw = r#"{
            "id": "1712345678901",
            "title": "Picnic",
            "date": "2025-06-01",
            "time": "09:05",
            "location": {"name": "Park", "address": "", "latitude": 1.5, "longitude": 2.5},
            "attendees": [{"id": "current-user", "name": "You", "rsvpStatus": "yes"}]
        }"#;

        let event: Event = serde_json::from_str(raw).unwrap();
        assert_eq!(event.time, NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        assert_eq!(event.location.address_or_name(), "Park");
        assert!(event.is_rsvped());
    }

    #[test]
    fn test_next_id_is_unique_and_increasing() {
        let a: i64 = next_id().parse().unwrap();
        let b: i64 = next_id().parse().unwrap();
        let c: i64 = next_id().parse().unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_toggle_rsvp_twice_restores_attendees() {
        let mut event = make_test_event();
        let original = event.attendees.clone();

        assert!(event.toggle_rsvp());
        assert!(event.is_rsvped());
        assert_eq!(event.attendees.len(), 2);
        assert_eq!(event.attendees[1], Attendee::current_user());

        assert!(!event.toggle_rsvp());
        assert!(!event.is_rsvped());
        assert_eq!(event.attendees, original);
    }

    #[test]
    fn test_add_attendee_rejects_duplicate_id() {
        let mut event = make_test_event();
        let dup = Attendee {
            id: "a1".to_string(),
            name: "Another Alice".to_string(),
            rsvp_status: RsvpStatus::Yes,
        };

        assert!(!event.add_attendee(dup));
        assert_eq!(event.attendees.len(), 1);
        assert_eq!(event.attendees[0].name, "Alice");
    }

    #[test]
    fn test_new_attendee_defaults() {
        let attendee = Attendee::new("  Bob ").unwrap();
        assert_eq!(attendee.name, "Bob");
        assert_eq!(attendee.rsvp_status, RsvpStatus::No);
        assert!(Attendee::new("   ").is_err());
    }

    #[test]
    fn test_set_and_remove_attendee() {
        let mut event = make_test_event();
        assert!(event.set_rsvp_status("a1", RsvpStatus::Yes));
        assert_eq!(event.attendees[0].rsvp_status, RsvpStatus::Yes);
        assert!(!event.set_rsvp_status("missing", RsvpStatus::No));

        assert!(event.remove_attendee("a1"));
        assert!(!event.remove_attendee("a1"));
        assert!(event.attendees.is_empty());
    }

    #[test]
    fn test_draft_requires_title_and_location_name() {
        let mut draft = EventDraft::from(make_test_event());
        draft.title = "  ".to_string();
        assert!(matches!(draft.validate(), Err(PlannerError::Validation(_))));

        let mut draft = EventDraft::from(make_test_event());
        draft.location.name = String::new();
        assert!(matches!(draft.validate(), Err(PlannerError::Validation(_))));
    }

    #[test]
    fn test_draft_rejects_duplicate_attendee_ids() {
        let mut draft = EventDraft::from(make_test_event());
        let bob = Attendee::new("Bob").unwrap();
        let mut namesake = Attendee::new("Bobby").unwrap();
        namesake.id = bob.id.clone();
        draft.attendees = vec![bob, namesake];

        assert!(matches!(draft.validate(), Err(PlannerError::Validation(_))));
        assert!(draft.into_event().is_err());
    }

    #[test]
    fn test_draft_rejects_current_user_twice() {
        let mut draft = EventDraft::from(make_test_event());
        draft.attendees = vec![Attendee::current_user(), Attendee::current_user()];

        assert!(matches!(draft.validate(), Err(PlannerError::Validation(_))));
    }

    #[test]
    fn test_draft_edit_keeps_id() {
        let event = make_test_event();
        let mut draft = EventDraft::from(event.clone());
        draft.title = "Team Lunch".to_string();

        let edited = draft.into_event_with_id(event.id.clone()).unwrap();
        assert_eq!(edited.id, event.id);
        assert_eq!(edited.title, "Team Lunch");
    }

    #[test]
    fn test_rsvp_status_from_str() {
        assert_eq!("Maybe".parse::<RsvpStatus>().unwrap(), RsvpStatus::Maybe);
        assert!("sure".parse::<RsvpStatus>().is_err());
    }
}
