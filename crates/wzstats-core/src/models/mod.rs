//! Data models for players, the profile cache, and stats payloads.
//!
//! - `Platform`: the three account providers
//! - `PlayerReference`, `ListedPlayer`: entries of the recents and bookmarks lists
//! - `ProfileCacheEntry`, `ProfilePayload`: short-lived cached fetches
//! - Stats payload views: `MatchHistory`, `MatchPlayers`, `ProfileStats`

pub mod platform;
pub mod player;
pub mod profile_cache;
pub mod stats;

pub use platform::{Platform, PlatformInfo, UnknownPlatform};
pub use player::{display_name_for, ListedPlayer, PlayerReference};
pub use profile_cache::{ProfileCacheEntry, ProfilePayload, PROFILE_CACHE_TTL_MS};
pub use stats::{
    DayModeStats, MatchHistory, MatchPlayers, ModeProperties, ProfileStats, RawMatch, RawPlayer,
    RawPlayerStats, ALL_BR_MODES,
};
