//! Core library for wzstats.
//!
//! Provides the on-device player lists (recents and bookmarks), the
//! short-lived profile cache, and the reshaping of raw Warzone stats
//! payloads into the shapes the front ends render.
//!
//! Persistence goes through the [`store::KeyValueStore`] trait so the same
//! logic runs against a directory of JSON files or an in-memory map.

pub mod error;
pub mod featured;
pub mod loader;
pub mod models;
pub mod stats;
pub mod store;
pub mod userdata;
pub mod utils;

pub use error::StoreError;
pub use loader::{LoadedProfile, ProfileLoader, StatsSource, MAX_LOADED_MATCHES};
pub use models::{ListedPlayer, Platform, PlayerReference, ProfileCacheEntry, ProfilePayload};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use userdata::{BookmarkToggle, Clock, SystemClock, UserData};
