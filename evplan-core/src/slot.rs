//! A single JSON document stored under one key.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PlannerResult;
use crate::kv::KeyValueStore;

/// How a read-modify-write cycle treats a slot it cannot decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Load {
    /// Unreadable data is treated as absent.
    Lenient,
    /// Unreadable data aborts the cycle.
    Strict,
}

/// Typed view of one persisted slot.
///
/// [`JsonSlot::load`] never fails: a missing slot, an unreadable slot and
/// malformed JSON all come back as `None`. Use [`JsonSlot::try_load`] to see
/// the underlying error.
pub struct JsonSlot<T> {
    kv: Arc<dyn KeyValueStore>,
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonSlot<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(kv: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        JsonSlot {
            kv,
            key,
            _value: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub async fn try_load(&self) -> PlannerResult<Option<T>> {
        match self.kv.read(self.key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn load(&self) -> Option<T> {
        match self.try_load().await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "unreadable slot treated as empty");
                None
            }
        }
    }

    pub(crate) async fn load_with(&self, mode: Load) -> PlannerResult<Option<T>> {
        match mode {
            Load::Lenient => Ok(self.load().await),
            Load::Strict => self.try_load().await,
        }
    }

    pub async fn save(&self, value: &T) -> PlannerResult<()> {
        let raw = serde_json::to_string(value)?;
        self.kv.write(self.key, &raw).await
    }

    pub async fn clear(&self) -> PlannerResult<()> {
        self.kv.remove(self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::kv::MemoryStore;

    #[tokio::test]
    async fn test_malformed_json_loads_as_none() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        kv.write("@numbers", "[1, 2,").await.unwrap();

        let slot: JsonSlot<Vec<u32>> = JsonSlot::new(kv, "@numbers");
        assert_eq!(slot.load().await, None);
        assert!(matches!(
            slot.try_load().await,
            Err(PlannerError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_save_then_clear() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let slot: JsonSlot<Vec<u32>> = JsonSlot::new(Arc::clone(&kv), "@numbers");

        slot.save(&vec![3, 1, 2]).await.unwrap();
        assert_eq!(kv.read("@numbers").await.unwrap().as_deref(), Some("[3,1,2]"));
        assert_eq!(slot.load().await, Some(vec![3, 1, 2]));

        slot.clear().await.unwrap();
        assert_eq!(slot.load().await, None);
    }
}
