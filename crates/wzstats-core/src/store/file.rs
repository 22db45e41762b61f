use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::KeyValueStore;
use crate::error::StoreError;

/// Stores each key as `<dir>/<KEY>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io("<root>", e))?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.key_path(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));

        // Write then rename so a crash never leaves half a document behind
        tokio::fs::write(&tmp, value.as_bytes())
            .await
            .map_err(|e| StoreError::io(key, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::io(key, e));
        }

        debug!(key, bytes = value.len(), "Wrote store key");
        Ok(())
    }
}
