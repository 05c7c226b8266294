//! In-process key-value store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::error::PlannerResult;

/// Keeps every slot in memory. Contents are lost when the store is dropped.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> PlannerResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> PlannerResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> PlannerResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
