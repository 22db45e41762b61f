use tracing::debug;

use super::{UserData, MAX_CACHED_PROFILES, PROFILE_DATA_KEY};
use crate::models::{Platform, ProfileCacheEntry, ProfilePayload};
use crate::store::KeyValueStore;

impl<S: KeyValueStore> UserData<S> {
    /// Every stored entry, expired ones included, in insertion order.
    pub async fn cached_profiles(&self) -> Vec<ProfileCacheEntry> {
        self.load_list(PROFILE_DATA_KEY).await
    }

    /// The live entry for a player, if any.
    pub async fn cached_profile(&self, username: &str, platform: Platform) -> Option<ProfileCacheEntry> {
        let now = self.now_millis();
        let hit = self
            .cached_profiles()
            .await
            .into_iter()
            .find(|entry| entry.is_for(username, platform) && entry.is_live(now));

        debug!(
            username,
            platform = platform.code(),
            hit = hit.is_some(),
            "Profile cache lookup"
        );
        hit
    }

    /// Stores a fresh payload for a player.
    ///
    /// Expired entries and any older entry for the same player are dropped
    /// first; then the oldest entries are evicted until there is room.
    pub async fn cache_profile_data(&self, username: &str, platform: Platform, data: ProfilePayload) {
        let now = self.now_millis();
        let mut entries = self.cached_profiles().await;

        let before = entries.len();
        entries.retain(|entry| !(entry.is_expired(now) || entry.is_for(username, platform)));
        let dropped = before - entries.len();

        let overflow = (entries.len() + 1).saturating_sub(MAX_CACHED_PROFILES);
        entries.drain(..overflow);

        debug!(
            username,
            platform = platform.code(),
            dropped,
            evicted = overflow,
            "Caching profile data"
        );

        entries.push(ProfileCacheEntry::new(username, platform, data, now));
        self.save_list(PROFILE_DATA_KEY, &entries).await;
    }
}
