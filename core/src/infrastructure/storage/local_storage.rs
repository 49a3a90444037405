use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use tokio::sync::Mutex;
use tracing::instrument;

use crate::domain::{common::entities::app_errors::CoreError, controller::ports::ResultStore};

const STORAGE_FILE: &str = "local_storage.json";

/// Local storage kept as one JSON object of string values on disk.
#[derive(Debug)]
pub struct FileResultStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl FileResultStore {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            path: directory.as_ref().join(STORAGE_FILE),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, CoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                CoreError::StorageError(format!("{} is corrupt: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(CoreError::StorageError(e.to_string())),
        }
    }
}

impl ResultStore for FileResultStore {
    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    async fn set_item(&self, key: String, value: String) -> Result<(), CoreError> {
        let _guard = self.lock.lock().await;

        let mut items = self.read_all().await?;
        items.insert(key, value);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::StorageError(e.to_string()))?;
        }

        let serialized = serde_json::to_vec_pretty(&items)
            .map_err(|e| CoreError::StorageError(e.to_string()))?;
        tokio::fs::write(&self.path, serialized)
            .await
            .map_err(|e| CoreError::StorageError(e.to_string()))?;

        tracing::debug!("stored item");
        Ok(())
    }

    async fn get_item(&self, key: String) -> Result<Option<String>, CoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        Ok(items.remove(&key))
    }
}
