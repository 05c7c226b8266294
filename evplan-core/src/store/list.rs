//! Read events from the store.

use super::EventStore;
use crate::error::PlannerResult;
use crate::event::Event;

impl EventStore {
    /// All events in creation order. Empty if nothing is stored or the
    /// stored data cannot be read.
    pub async fn get_events(&self) -> Vec<Event> {
        self.slot.load().await.unwrap_or_default()
    }

    pub async fn try_get_events(&self) -> PlannerResult<Vec<Event>> {
        Ok(self.slot.try_load().await?.unwrap_or_default())
    }

    pub async fn get_event(&self, id: &str) -> Option<Event> {
        self.get_events().await.into_iter().find(|e| e.id == id)
    }
}
