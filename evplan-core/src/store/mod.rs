//! Local event storage.
//!
//! Events live as one JSON array under [`EVENTS_KEY`]. Every mutation is a
//! full read-modify-write of that array, serialized by a per-store mutex so
//! interleaved async callers cannot lose each other's writes.
//!
//! Each operation comes in two forms:
//! - the plain form (`save_event`, `update_event`, ...) never returns an
//!   error; faults are logged and a fallback value is returned
//! - the `try_` form surfaces storage and decode errors to the caller

mod create;
mod delete;
mod list;
mod update;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::constants::EVENTS_KEY;
use crate::error::PlannerResult;
use crate::event::Event;
use crate::kv::KeyValueStore;
use crate::slot::{JsonSlot, Load};

pub struct EventStore {
    slot: JsonSlot<Vec<Event>>,
    write_lock: Mutex<()>,
}

impl EventStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        EventStore {
            slot: JsonSlot::new(kv, EVENTS_KEY),
            write_lock: Mutex::new(()),
        }
    }

    /// Run one locked read-modify-write cycle.
    ///
    /// `change` returns its result together with whether the collection
    /// needs to be written back.
    async fn read_modify_write<R, F>(&self, mode: Load, change: F) -> PlannerResult<R>
    where
        F: FnOnce(&mut Vec<Event>) -> (R, bool) + Send,
        R: Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut events = self.slot.load_with(mode).await?.unwrap_or_default();
        let (result, dirty) = change(&mut events);
        if dirty {
            self.slot.save(&events).await?;
        }

        Ok(result)
    }
}
