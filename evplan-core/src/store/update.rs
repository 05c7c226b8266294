//! Replace events in place.

use super::EventStore;
use crate::error::PlannerResult;
use crate::event::Event;
use crate::slot::Load;

impl EventStore {
    /// Replace the stored event with the same id, keeping its position.
    ///
    /// Returns true if a record was replaced. An unknown id is a silent
    /// no-op and returns false, as does a storage fault (which is logged).
    pub async fn update_event(&self, event: Event) -> bool {
        let id = event.id.clone();

        match self.replace(Load::Lenient, event).await {
            Ok(replaced) => {
                if replaced {
                    tracing::debug!(event_id = %id, "event updated");
                } else {
                    tracing::debug!(event_id = %id, "update skipped, no such event");
                }
                replaced
            }
            Err(e) => {
                tracing::error!(event_id = %id, error = %e, "failed to update event");
                false
            }
        }
    }

    pub async fn try_update_event(&self, event: Event) -> PlannerResult<bool> {
        self.replace(Load::Strict, event).await
    }

    /// Apply `f` to the stored event with `id` inside one locked cycle.
    ///
    /// Returns `f`'s result, or `None` if there is no such event or the
    /// write failed. The record keeps its id whatever `f` does to it.
    pub async fn modify_event<R, F>(&self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut Event) -> R + Send,
        R: Send,
    {
        match self.modify(Load::Lenient, id, f).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(event_id = %id, error = %e, "failed to modify event");
                None
            }
        }
    }

    pub async fn try_modify_event<R, F>(&self, id: &str, f: F) -> PlannerResult<Option<R>>
    where
        F: FnOnce(&mut Event) -> R + Send,
        R: Send,
    {
        self.modify(Load::Strict, id, f).await
    }

    async fn replace(&self, mode: Load, event: Event) -> PlannerResult<bool> {
        self.read_modify_write(mode, move |events| {
            match events.iter().position(|e| e.id == event.id) {
                Some(index) => {
                    events[index] = event;
                    (true, true)
                }
                None => (false, false),
            }
        })
        .await
    }

    async fn modify<R, F>(&self, mode: Load, id: &str, f: F) -> PlannerResult<Option<R>>
    where
        F: FnOnce(&mut Event) -> R + Send,
        R: Send,
    {
        self.read_modify_write(mode, move |events| {
            match events.iter_mut().find(|e| e.id == id) {
                Some(stored) => {
                    let result = f(stored);
                    stored.id = id.to_string();
                    (Some(result), true)
                }
                None => (None, false),
            }
        })
        .await
    }
}
