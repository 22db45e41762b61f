//! Profile loading with cache fallback.
//!
//! A `LoadedProfile` is an owned value handed back to the caller; nothing
//! about the last loaded player is kept anywhere else, so two lookups in
//! flight cannot see each other's data.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::{
    MatchHistory, Platform, PlayerReference, ProfilePayload, ProfileStats, RawMatch,
};
use crate::stats::{summarize_matches, MatchHistoryView, ProfileOverview};
use crate::store::KeyValueStore;
use crate::userdata::UserData;

/// Most matches kept for one profile across pages.
pub const MAX_LOADED_MATCHES: usize = 100;

/// Remote stats API. Payloads are returned raw so they can be cached as-is.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_profile(&self, username: &str, platform: Platform) -> Result<Value>;

    /// Matches that started before `end` (epoch millis), newest first.
    /// An `end` of 0 asks for the most recent page.
    async fn fetch_matches(&self, username: &str, platform: Platform, end: i64) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub player: PlayerReference,
    pub stats: ProfileStats,
    pub overview: ProfileOverview,
    /// Every match loaded so far, oldest page last.
    pub raw_matches: Vec<RawMatch>,
    pub matches: MatchHistoryView,
    /// `end` of the last page requested.
    pub cursor: i64,
    pub from_cache: bool,
}

impl LoadedProfile {
    /// Cursor for the next page: the start of the oldest loaded match.
    fn next_end(&self) -> i64 {
        self.raw_matches
            .last()
            .map(|m| m.utc_start_seconds.saturating_mul(1000))
            .unwrap_or(0)
    }
}

fn decode(payload: &ProfilePayload) -> Result<(ProfileStats, MatchHistory)> {
    let profile = ProfileStats::deserialize(&payload.profile_data)
        .context("Profile payload has an unexpected shape")?;
    let history = MatchHistory::deserialize(&payload.match_data)
        .context("Match payload has an unexpected shape")?;
    Ok((profile, history))
}

pub struct ProfileLoader<'a, S, F> {
    user_data: &'a UserData<S>,
    source: &'a F,
}

impl<'a, S: KeyValueStore, F: StatsSource> ProfileLoader<'a, S, F> {
    pub fn new(user_data: &'a UserData<S>, source: &'a F) -> Self {
        Self { user_data, source }
    }

    /// Loads a profile, preferring a live cache entry unless `refresh` is set.
    ///
    /// Fresh fetches are cached once they decode. Every successful load moves
    /// the player to the front of recents (a no-op for bookmarked players).
    pub async fn load(&self, username: &str, platform: Platform, refresh: bool) -> Result<LoadedProfile> {
        let cached = if refresh {
            None
        } else {
            self.user_data
                .cached_profile(username, platform)
                .await
                .filter(|entry| entry.data.is_complete())
                .and_then(|entry| match decode(&entry.data) {
                    Ok(decoded) => Some(decoded),
                    Err(e) => {
                        warn!(username, error = %e, "Ignoring unreadable cached profile");
                        None
                    }
                })
        };

        let ((profile, history), from_cache) = match cached {
            Some(decoded) => {
                debug!(username, platform = platform.code(), "Using cached profile");
                (decoded, true)
            }
            None => {
                info!(username, platform = platform.code(), refresh, "Fetching profile");
                let profile_data = self
                    .source
                    .fetch_profile(username, platform)
                    .await
                    .with_context(|| format!("Failed to fetch profile for {}", username))?;
                let match_data = self
                    .source
                    .fetch_matches(username, platform, 0)
                    .await
                    .with_context(|| format!("Failed to fetch matches for {}", username))?;

                let payload = ProfilePayload::new(profile_data, match_data);
                let decoded = decode(&payload)?;
                self.user_data
                    .cache_profile_data(username, platform, payload)
                    .await;
                (decoded, false)
            }
        };

        self.user_data.add_to_recents(username, platform).await;

        let mut raw_matches = history.matches;
        raw_matches.truncate(MAX_LOADED_MATCHES);

        Ok(LoadedProfile {
            player: PlayerReference::new(username, platform),
            overview: ProfileOverview::from_stats(&profile),
            stats: profile,
            matches: summarize_matches(&raw_matches),
            raw_matches,
            cursor: 0,
            from_cache,
        })
    }

    /// Fetches the page of matches older than the ones already loaded and
    /// appends it. Returns how many matches were added.
    ///
    /// Stops at [`MAX_LOADED_MATCHES`] and when the cursor would not move,
    /// which means the previous page came back empty or stale. Later pages
    /// are never cached.
    pub async fn load_more(&self, profile: &mut LoadedProfile) -> Result<usize> {
        if profile.raw_matches.len() >= MAX_LOADED_MATCHES {
            return Ok(0);
        }
        let end = profile.next_end();
        if end == profile.cursor {
            debug!(username = %profile.player.username, end, "No older matches to load");
            return Ok(0);
        }

        let username = profile.player.username.clone();
        let platform = profile.player.platform;
        info!(username = %username, platform = platform.code(), end, "Fetching older matches");
        let page = self
            .source
            .fetch_matches(&username, platform, end)
            .await
            .with_context(|| format!("Failed to fetch matches for {}", username))?;
        let mut page = MatchHistory::deserialize(&page)
            .context("Match payload has an unexpected shape")?
            .matches;

        page.truncate(MAX_LOADED_MATCHES - profile.raw_matches.len());
        let added = page.len();
        profile.raw_matches.extend(page);
        profile.cursor = end;
        profile.matches = summarize_matches(&profile.raw_matches);
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::userdata::test_support::memory_user_data;

    struct FakeSource {
        calls: AtomicUsize,
        match_ends: Mutex<Vec<i64>>,
        fail: bool,
        null_counters: bool,
        page_size: usize,
        /// Serve the newest page no matter what `end` asks for.
        stale_pages: bool,
    }

    impl Default for FakeSource {
        fn default() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                match_ends: Mutex::new(Vec::new()),
                fail: false,
                null_counters: false,
                page_size: 2,
                stale_pages: false,
            }
        }
    }

    impl FakeSource {
        fn match_ends(&self) -> Vec<i64> {
            self.match_ends.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatsSource for FakeSource {
        async fn fetch_profile(&self, _username: &str, _platform: Platform) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("404 - not found");
            }
            if self.null_counters {
                return Ok(json!({
                    "level": null,
                    "lifetime": { "mode": { "br_all": { "properties": { "wins": null, "gamesPlayed": 30 }}}},
                    "weekly": null
                }));
            }
            Ok(json!({
                "level": 42,
                "lifetime": { "mode": { "br_all": { "properties": { "wins": 3, "gamesPlayed": 30 }}}}
            }))
        }

        async fn fetch_matches(&self, _username: &str, _platform: Platform, end: i64) -> Result<Value> {
            self.match_ends.lock().unwrap().push(end);
            let newest = if end == 0 || self.stale_pages {
                10_000
            } else {
                end / 1000
            };
            let matches: Vec<Value> = (0..self.page_size)
                .map(|i| {
                    let start = newest - 1 - i as i64;
                    if self.null_counters {
                        json!({ "matchID": start.to_string(), "utcStartSeconds": start,
                                "playerStats": { "kills": 4, "gulagKills": null, "teamPlacement": null } })
                    } else {
                        json!({ "matchID": start.to_string(), "utcStartSeconds": start,
                                "playerStats": { "kills": if i % 2 == 0 { 4 } else { 9 }, "teamPlacement": 2 + i } })
                    }
                })
                .collect();
            Ok(json!({ "matches": matches }))
        }
    }

    #[tokio::test]
    async fn test_first_load_fetches_and_caches() {
        let (data, _) = memory_user_data();
        let source = FakeSource::default();
        let loader = ProfileLoader::new(&data, &source);

        let loaded = loader.load("Alpha#1111", Platform::BattleNet, false).await.unwrap();
        assert!(!loaded.from_cache);
        assert_eq!(loaded.player.display_name, "Alpha");
        assert_eq!(loaded.overview.level, 42);
        assert_eq!(loaded.matches.summary.as_ref().unwrap().best_game_kills, 9);
        assert_eq!(loaded.cursor, 0);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.match_ends(), vec![0]);

        assert!(data.cached_profile("alpha#1111", Platform::BattleNet).await.is_some());
        assert_eq!(data.recents().await[0].username, "Alpha#1111");
    }

    #[tokio::test]
    async fn test_second_load_uses_cache_until_refresh() {
        let (data, _) = memory_user_data();
        let source = FakeSource::default();
        let loader = ProfileLoader::new(&data, &source);

        loader.load("p", Platform::Xbox, false).await.unwrap();
        let again = loader.load("p", Platform::Xbox, false).await.unwrap();
        assert!(again.from_cache);
        assert_eq!(again.overview.lifetime.wins, 3);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        let refreshed = loader.load("p", Platform::Xbox, true).await.unwrap();
        assert!(!refreshed.from_cache);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_cache_refetches() {
        let (data, clock) = memory_user_data();
        let source = FakeSource::default();
        let loader = ProfileLoader::new(&data, &source);

        loader.load("p", Platform::Xbox, false).await.unwrap();
        clock.advance(crate::models::PROFILE_CACHE_TTL_MS + 1);
        assert!(!loader.load("p", Platform::Xbox, false).await.unwrap().from_cache);
    }

    #[tokio::test]
    async fn test_incomplete_cache_entry_ignored() {
        let (data, _) = memory_user_data();
        data.cache_profile_data("p", Platform::Xbox, ProfilePayload::new(json!({}), json!({})))
            .await;
        let source = FakeSource::default();

        let loaded = ProfileLoader::new(&data, &source)
            .load("p", Platform::Xbox, false)
            .await
            .unwrap();
        assert!(!loaded.from_cache);
    }

    #[tokio::test]
    async fn test_unreadable_cache_entry_refetched() {
        let (data, _) = memory_user_data();
        data.cache_profile_data(
            "p",
            Platform::Xbox,
            ProfilePayload::new(json!({ "level": "high" }), json!({ "matches": [] })),
        )
        .await;
        let source = FakeSource::default();

        let loaded = ProfileLoader::new(&data, &source)
            .load("p", Platform::Xbox, false)
            .await
            .unwrap();
        assert!(!loaded.from_cache);
        assert_eq!(loaded.overview.level, 42);
    }

    #[tokio::test]
    async fn test_null_counters_load() {
        let (data, _) = memory_user_data();
        let source = FakeSource {
            null_counters: true,
            ..Default::default()
        };

        let loaded = ProfileLoader::new(&data, &source)
            .load("p", Platform::PlayStation, false)
            .await
            .unwrap();
        assert_eq!(loaded.overview.level, 0);
        assert_eq!(loaded.overview.lifetime.wins, 0);
        assert_eq!(loaded.overview.lifetime.games_played, 30);
        let summary = loaded.matches.summary.unwrap();
        assert_eq!(summary.gulag_wins, 0);
        assert_eq!(summary.best_placement, None);
        assert!(data.cached_profile("p", Platform::PlayStation).await.is_some());
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_without_side_effects() {
        let (data, _) = memory_user_data();
        let source = FakeSource {
            fail: true,
            ..Default::default()
        };

        let err = ProfileLoader::new(&data, &source)
            .load("ghost", Platform::PlayStation, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
        assert!(data.recents().await.is_empty());
        assert!(data.cached_profiles().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_more_pages_until_cap() {
        let (data, _) = memory_user_data();
        let source = FakeSource {
            page_size: 30,
            ..Default::default()
        };
        let loader = ProfileLoader::new(&data, &source);

        let mut loaded = loader.load("p", Platform::Xbox, false).await.unwrap();
        assert_eq!(loaded.raw_matches.len(), 30);

        assert_eq!(loader.load_more(&mut loaded).await.unwrap(), 30);
        assert_eq!(loaded.cursor, 9_970_000);
        assert_eq!(loader.load_more(&mut loaded).await.unwrap(), 30);
        assert_eq!(loader.load_more(&mut loaded).await.unwrap(), 30);
        // The last page is cut to fit
        assert_eq!(loader.load_more(&mut loaded).await.unwrap(), 10);
        assert_eq!(loaded.raw_matches.len(), MAX_LOADED_MATCHES);
        assert_eq!(loaded.matches.summary.as_ref().unwrap().number_of_matches, 100);

        assert_eq!(loader.load_more(&mut loaded).await.unwrap(), 0);
        assert_eq!(
            source.match_ends(),
            vec![0, 9_970_000, 9_940_000, 9_910_000, 9_880_000]
        );

        // Only the first page is cached
        let cached = data.cached_profile("p", Platform::Xbox).await.unwrap();
        assert_eq!(cached.data.match_data["matches"].as_array().unwrap().len(), 30);
    }

    #[tokio::test]
    async fn test_load_more_stops_when_cursor_repeats() {
        let (data, _) = memory_user_data();
        let source = FakeSource {
            stale_pages: true,
            ..Default::default()
        };
        let loader = ProfileLoader::new(&data, &source);

        let mut loaded = loader.load("p", Platform::Xbox, false).await.unwrap();
        assert_eq!(loader.load_more(&mut loaded).await.unwrap(), 2);
        assert_eq!(loaded.raw_matches.len(), 4);

        // The stale page ends where the last one did, so nothing is fetched
        assert_eq!(loader.load_more(&mut loaded).await.unwrap(), 0);
        assert_eq!(source.match_ends(), vec![0, 9_998_000]);
        assert_eq!(loaded.raw_matches.len(), 4);
    }

    #[tokio::test]
    async fn test_load_more_without_matches_fetches_nothing() {
        let (data, _) = memory_user_data();
        let source = FakeSource {
            page_size: 0,
            ..Default::default()
        };
        let loader = ProfileLoader::new(&data, &source);

        let mut loaded = loader.load("p", Platform::Xbox, false).await.unwrap();
        assert_eq!(loader.load_more(&mut loaded).await.unwrap(), 0);
        assert_eq!(source.match_ends(), vec![0]);
    }
}
