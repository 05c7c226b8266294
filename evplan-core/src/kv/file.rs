//! Directory-backed key-value store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::KeyValueStore;
use crate::error::{PlannerError, PlannerResult};

/// Stores each key as `<slug>.json` inside a data directory.
///
/// Writes go to a temp file that is renamed over the target, so a crash
/// mid-write leaves the previous value in place.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key` (`@current_user` -> `current-user.json`).
    pub fn path_for(&self, key: &str) -> PlannerResult<PathBuf> {
        let name = slug::slugify(key);
        if name.is_empty() {
            return Err(PlannerError::Storage(format!(
                "Key '{}' has no usable file name",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn read(&self, key: &str) -> PlannerResult<Option<String>> {
        let path = self.path_for(key)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> PlannerResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let temp = path.with_extension("json.tmp");
        tokio::fs::write(&temp, value).await?;
        tokio::fs::rename(&temp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> PlannerResult<()> {
        let path = self.path_for(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
