//! Device-local string key-value storage.
//!
//! Both stores persist through a [`KeyValueStore`]: one string key maps to one
//! JSON document. Each call is atomic from the caller's point of view; a
//! reader never observes a half-written value.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::PlannerResult;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// The value under `key`, or `None` if nothing was ever written.
    async fn read(&self, key: &str) -> PlannerResult<Option<String>>;

    /// Replace the value under `key`.
    async fn write(&self, key: &str, value: &str) -> PlannerResult<()>;

    /// Drop `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> PlannerResult<()>;
}
