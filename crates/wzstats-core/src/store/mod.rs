//! Key-value persistence behind the player lists and profile cache.
//!
//! Values are whole JSON documents; callers always read a key, modify the
//! decoded value, and overwrite it. There is no partial update and no
//! transaction spanning several keys.

pub mod file;
pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;

pub use file::FileStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the whole value stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }
}
