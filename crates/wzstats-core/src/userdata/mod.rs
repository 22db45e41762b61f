//! On-device player lists and profile cache.
//!
//! `UserData` keeps three independent keys in a [`KeyValueStore`]:
//!
//! - `RECENTS`: up to 10 recently searched players, newest first
//! - `BOOKMARKS`: up to 10 pinned players, in the order they were pinned
//! - `PROFILE_DATA`: up to 5 fetched profile payloads, usable for 10 minutes
//!
//! Everything here is best-effort. Read failures look like empty storage and
//! write failures are logged and dropped, so a broken store never blocks the
//! caller. Each operation reads a whole key, changes it, and writes it back;
//! the type does no locking and assumes a single writer.

mod lists;
mod profile_cache;

use std::sync::Arc;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::store::KeyValueStore;

pub use lists::BookmarkToggle;

pub const RECENTS_KEY: &str = "RECENTS";
pub const BOOKMARKS_KEY: &str = "BOOKMARKS";
pub const PROFILE_DATA_KEY: &str = "PROFILE_DATA";

pub const MAX_RECENTS: usize = 10;
pub const MAX_BOOKMARKS: usize = 10;
pub const MAX_CACHED_PROFILES: usize = 5;

/// Source of "now" for cache expiry, in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

pub struct UserData<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> UserData<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    async fn try_load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Vec::new());
        };
        // A stored `null` counts as empty
        let items: Option<Vec<serde_json::Value>> =
            serde_json::from_str(&raw).map_err(|e| StoreError::serialization(key, e))?;
        let items = items.unwrap_or_default();
        let total = items.len();

        let list: Vec<T> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key, error = %e, "Dropping unreadable stored entry");
                    None
                }
            })
            .collect();
        if list.len() < total {
            debug!(key, kept = list.len(), total, "Stored list partially recovered");
        }
        Ok(list)
    }

    /// Helper to load a list and log errors without failing
    async fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.try_load_list(key).await {
            Ok(list) => list,
            Err(e) => {
                warn!(key, error = %e, "Failed to load stored list, treating as empty");
                Vec::new()
            }
        }
    }

    async fn try_save_list<T: Serialize>(&self, key: &str, list: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(list).map_err(|e| StoreError::serialization(key, e))?;
        self.store.set(key, raw).await
    }

    /// Helper to persist a list and log errors without failing
    async fn save_list<T: Serialize>(&self, key: &str, list: &[T]) {
        if let Err(e) = self.try_save_list(key, list).await {
            warn!(key, error = %e, "Failed to persist list");
        }
    }
}
