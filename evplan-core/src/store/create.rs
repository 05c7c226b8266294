//! Append events to the store.

use super::EventStore;
use crate::error::PlannerResult;
use crate::event::Event;
use crate::slot::Load;

impl EventStore {
    /// Append `event` and persist. Returns whether the write went through.
    ///
    /// The id is not checked against existing records; callers pass a fresh
    /// one from [`crate::event::next_id`].
    pub async fn save_event(&self, event: Event) -> bool {
        let id = event.id.clone();

        match self.append(Load::Lenient, event).await {
            Ok(()) => {
                tracing::debug!(event_id = %id, "event saved");
                true
            }
            Err(e) => {
                tracing::error!(event_id = %id, error = %e, "failed to save event");
                false
            }
        }
    }

    pub async fn try_save_event(&self, event: Event) -> PlannerResult<()> {
        self.append(Load::Strict, event).await
    }

    async fn append(&self, mode: Load, event: Event) -> PlannerResult<()> {
        self.read_modify_write(mode, move |events| {
            events.push(event);
            ((), true)
        })
        .await
    }
}
