use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::error::StoreError;

/// In-process store. Can be flipped into a failing mode to exercise the
/// error paths of its callers.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store set to fail".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_available()?;
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.check_available()?;
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}
