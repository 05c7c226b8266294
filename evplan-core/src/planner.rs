//! The service container shared by every screen.
//!
//! One [`Planner`] is built per process around a single key-value store.
//! Screens reach the event and auth stores through it instead of through
//! globals, and the multi-step flows (create, edit, RSVP, attendee changes)
//! live here so every front end runs them the same way.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::auth::AuthStore;
use crate::config::PlannerConfig;
use crate::device::{CalendarEntry, CalendarService, LocationService, position_or};
use crate::error::{PlannerError, PlannerResult};
use crate::event::{Attendee, Coordinates, Event, EventDraft, RsvpStatus};
use crate::kv::{FileStore, KeyValueStore, MemoryStore};
use crate::query::ProfileStats;
use crate::store::EventStore;

pub struct Planner {
    config: PlannerConfig,
    events: Arc<EventStore>,
    auth: Arc<AuthStore>,
}

impl Planner {
    pub fn new(kv: Arc<dyn KeyValueStore>, config: PlannerConfig) -> Self {
        Planner {
            config,
            events: Arc::new(EventStore::new(Arc::clone(&kv))),
            auth: Arc::new(AuthStore::new(kv)),
        }
    }

    /// A planner persisting to the configured data directory.
    pub fn open(config: PlannerConfig) -> Self {
        let kv = Arc::new(FileStore::new(config.data_path()));
        tracing::debug!(dir = %kv.dir().display(), "opening file store");
        Self::new(kv, config)
    }

    /// A planner that keeps everything in memory.
    pub fn in_memory(config: PlannerConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn events(&self) -> &Arc<EventStore> {
        &self.events
    }

    pub fn auth(&self) -> &Arc<AuthStore> {
        &self.auth
    }

    pub async fn require_event(&self, id: &str) -> PlannerResult<Event> {
        self.events
            .try_get_events()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| PlannerError::EventNotFound(id.to_string()))
    }

    /// Validate a draft, assign it a fresh id and append it.
    pub async fn create_event(&self, draft: EventDraft) -> PlannerResult<Event> {
        let event = draft.into_event()?;
        self.events.try_save_event(event.clone()).await?;
        tracing::info!(event_id = %event.id, title = %event.title, "event created");
        Ok(event)
    }

    /// Replace the editable fields of an existing event.
    pub async fn edit_event(&self, id: &str, draft: EventDraft) -> PlannerResult<Event> {
        let event = draft.into_event_with_id(id.to_string())?;
        if !self.events.try_update_event(event.clone()).await? {
            return Err(PlannerError::EventNotFound(id.to_string()));
        }
        Ok(event)
    }

    pub async fn delete_event(&self, id: &str) -> PlannerResult<()> {
        match self.events.try_delete_event(id).await? {
            0 => Err(PlannerError::EventNotFound(id.to_string())),
            _ => Ok(()),
        }
    }

    /// Flip the local user's RSVP on an event; returns the new state.
    pub async fn toggle_rsvp(&self, event_id: &str) -> PlannerResult<bool> {
        self.events
            .try_modify_event(event_id, |event| event.toggle_rsvp())
            .await?
            .ok_or_else(|| PlannerError::EventNotFound(event_id.to_string()))
    }

    pub async fn add_attendee(&self, event_id: &str, name: &str) -> PlannerResult<Attendee> {
        let attendee = Attendee::new(name)?;
        let added = {
            let attendee = attendee.clone();
            self.events
                .try_modify_event(event_id, move |event| event.add_attendee(attendee))
                .await?
        };

        match added {
            Some(true) => Ok(attendee),
            Some(false) => Err(PlannerError::Validation(format!(
                "attendee '{}' is already on this event",
                attendee.id
            ))),
            None => Err(PlannerError::EventNotFound(event_id.to_string())),
        }
    }

    /// Remove an attendee; returns whether one was removed.
    pub async fn remove_attendee(&self, event_id: &str, attendee_id: &str) -> PlannerResult<bool> {
        self.events
            .try_modify_event(event_id, |event| event.remove_attendee(attendee_id))
            .await?
            .ok_or_else(|| PlannerError::EventNotFound(event_id.to_string()))
    }

    /// Set an attendee's response; returns whether the attendee exists.
    pub async fn set_rsvp_status(
        &self,
        event_id: &str,
        attendee_id: &str,
        status: RsvpStatus,
    ) -> PlannerResult<bool> {
        self.events
            .try_modify_event(event_id, |event| event.set_rsvp_status(attendee_id, status))
            .await?
            .ok_or_else(|| PlannerError::EventNotFound(event_id.to_string()))
    }

    pub async fn stats(&self, today: NaiveDate) -> ProfileStats {
        ProfileStats::compute(&self.events.get_events().await, today)
    }

    /// Where a new event is placed before the user picks a spot.
    pub async fn starting_position(&self, location: &dyn LocationService) -> Coordinates {
        position_or(location, self.config.default_coordinates()).await
    }

    /// Push an event into the native calendar; returns the entry id.
    pub async fn add_to_calendar(
        &self,
        event_id: &str,
        calendar: &dyn CalendarService,
    ) -> PlannerResult<String> {
        let event = self.require_event(event_id).await?;
        let entry = CalendarEntry::from_event(&event, self.config.event_duration())?;
        Ok(calendar.create_entry(&entry).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceError;
    use crate::event::Location;
    use async_trait::async_trait;
    use chrono::NaiveTime;
    use tokio::sync::Mutex;

    fn planner() -> Planner {
        Planner::in_memory(PlannerConfig::default())
    }

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
            time: NaiveTime::from_hms_opt(20, 15, 0).unwrap(),
            location: Location {
                name: "Beach".to_string(),
                address: None,
                latitude: 34.0,
                longitude: 35.6,
            },
            attendees: vec![],
        }
    }

    /// Records every entry it is asked to create.
    #[derive(Default)]
    struct RecordingCalendar {
        entries: Mutex<Vec<CalendarEntry>>,
    }

    #[async_trait]
    impl CalendarService for RecordingCalendar {
        async fn create_entry(&self, entry: &CalendarEntry) -> Result<String, DeviceError> {
            let mut entries = self.entries.lock().await;
            entries.push(entry.clone());
            Ok(format!("native-{}", entries.len()))
        }
    }

    struct NoCalendar;

    #[async_trait]
    impl CalendarService for NoCalendar {
        async fn create_entry(&self, _entry: &CalendarEntry) -> Result<String, DeviceError> {
            Err(DeviceError::NoCalendar)
        }
    }

    #[tokio::test]
    async fn test_create_and_edit_event() {
        let planner = planner();

        let created = planner.create_event(draft("Fireworks")).await.unwrap();
        assert_eq!(planner.events().get_events().await, vec![created.clone()]);

        let mut changes = EventDraft::from(created.clone());
        changes.title = "Fireworks (moved)".to_string();
        let edited = planner.edit_event(&created.id, changes).await.unwrap();

        assert_eq!(edited.id, created.id);
        assert_eq!(
            planner.require_event(&created.id).await.unwrap().title,
            "Fireworks (moved)"
        );
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft() {
        let planner = planner();
        let mut bad = draft("Nameless place");
        bad.location.name = " ".to_string();

        assert!(matches!(
            planner.create_event(bad).await,
            Err(PlannerError::Validation(_))
        ));
        assert!(planner.events().get_events().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_attendees() {
        let planner = planner();

        let mut twice = draft("Double booked");
        twice.attendees = vec![Attendee::current_user(), Attendee::current_user()];
        assert!(matches!(
            planner.create_event(twice).await,
            Err(PlannerError::Validation(_))
        ));

        let mut shared = draft("Shared id");
        let rana = Attendee::new("Rana").unwrap();
        let mut omar = Attendee::new("Omar").unwrap();
        omar.id = rana.id.clone();
        shared.attendees = vec![rana, omar];
        assert!(matches!(
            planner.create_event(shared).await,
            Err(PlannerError::Validation(_))
        ));

        assert!(planner.events().get_events().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_event_errors() {
        let planner = planner();
        assert!(matches!(
            planner.toggle_rsvp("nope").await,
            Err(PlannerError::EventNotFound(_))
        ));
        assert!(matches!(
            planner.edit_event("nope", draft("x")).await,
            Err(PlannerError::EventNotFound(_))
        ));
        assert!(matches!(
            planner.delete_event("nope").await,
            Err(PlannerError::EventNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_attendee_flow() {
        let planner = planner();
        let event = planner.create_event(draft("Party")).await.unwrap();

        let bob = planner.add_attendee(&event.id, "Bob").await.unwrap();
        assert!(
            planner
                .set_rsvp_status(&event.id, &bob.id, RsvpStatus::Maybe)
                .await
                .unwrap()
        );
        assert!(planner.toggle_rsvp(&event.id).await.unwrap());

        let stored = planner.require_event(&event.id).await.unwrap();
        assert_eq!(stored.attendees.len(), 2);
        assert_eq!(stored.attendees[0].rsvp_status, RsvpStatus::Maybe);
        assert!(stored.is_rsvped());

        assert!(planner.remove_attendee(&event.id, &bob.id).await.unwrap());
        assert!(!planner.remove_attendee(&event.id, &bob.id).await.unwrap());
        assert!(!planner.toggle_rsvp(&event.id).await.unwrap());
        assert!(
            planner
                .require_event(&event.id)
                .await
                .unwrap()
                .attendees
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_stats() {
        let planner = planner();
        let event = planner.create_event(draft("Party")).await.unwrap();
        planner.create_event(draft("Another")).await.unwrap();
        planner.toggle_rsvp(&event.id).await.unwrap();

        let stats = planner
            .stats(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap())
            .await;
        assert_eq!(stats.total_events, 2);
        assert_eq!(stats.upcoming_events, 0);
        assert_eq!(stats.events_rsvped, 1);
    }

    #[tokio::test]
    async fn test_add_to_calendar() {
        let planner = planner();
        let event = planner.create_event(draft("Concert")).await.unwrap();
        let calendar = RecordingCalendar::default();

        let id = planner.add_to_calendar(&event.id, &calendar).await.unwrap();
        assert_eq!(id, "native-1");

        let entries = calendar.entries.lock().await;
        assert_eq!(entries[0].title, "Concert");
        assert_eq!(entries[0].notes, "Address: Beach");
        assert_eq!(
            entries[0].end_date - entries[0].start_date,
            chrono::Duration::minutes(120)
        );
    }

    #[tokio::test]
    async fn test_add_to_calendar_end_out_of_range() {
        let planner = planner();
        let mut late = draft("Last night on earth");
        late.date = NaiveDate::MAX;
        late.time = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        let event = planner.create_event(late).await.unwrap();
        let calendar = RecordingCalendar::default();

        assert!(matches!(
            planner.add_to_calendar(&event.id, &calendar).await,
            Err(PlannerError::Validation(_))
        ));
        assert!(calendar.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_to_calendar_without_calendar() {
        let planner = planner();
        let event = planner.create_event(draft("Concert")).await.unwrap();

        assert!(matches!(
            planner.add_to_calendar(&event.id, &NoCalendar).await,
            Err(PlannerError::Device(DeviceError::NoCalendar))
        ));
    }

    #[tokio::test]
    async fn test_open_persists_to_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = PlannerConfig {
            data_dir: tmp.path().to_path_buf(),
            ..PlannerConfig::default()
        };

        let event = Planner::open(config.clone())
            .create_event(draft("Saved"))
            .await
            .unwrap();

        let reopened = Planner::open(config);
        assert_eq!(reopened.events().get_events().await, vec![event]);
        assert!(tmp.path().join("events.json").exists());
    }
}
