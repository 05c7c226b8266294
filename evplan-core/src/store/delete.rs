//! Remove events from the store.

use super::EventStore;
use crate::error::PlannerResult;
use crate::slot::Load;

impl EventStore {
    /// Remove every event with `id`. Returns how many were removed; zero
    /// for an unknown id or a storage fault (which is logged).
    pub async fn delete_event(&self, id: &str) -> usize {
        match self.remove(Load::Lenient, id).await {
            Ok(removed) => {
                tracing::debug!(event_id = %id, removed, "event deleted");
                removed
            }
            Err(e) => {
                tracing::error!(event_id = %id, error = %e, "failed to delete event");
                0
            }
        }
    }

    pub async fn try_delete_event(&self, id: &str) -> PlannerResult<usize> {
        self.remove(Load::Strict, id).await
    }

    /// Drop the whole events slot.
    pub async fn clear_all_data(&self) {
        if let Err(e) = self.try_clear_all_data().await {
            tracing::error!(error = %e, "failed to clear event data");
        }
    }

    pub async fn try_clear_all_data(&self) -> PlannerResult<()> {
        let _guard = self.write_lock.lock().await;
        self.slot.clear().await
    }

    async fn remove(&self, mode: Load, id: &str) -> PlannerResult<usize> {
        self.read_modify_write(mode, move |events| {
            let before = events.len();
            events.retain(|e| e.id != id);
            let removed = before - events.len();
            (removed, removed > 0)
        })
        .await
    }
}
