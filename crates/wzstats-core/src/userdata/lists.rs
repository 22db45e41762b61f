use tracing::debug;

use super::{UserData, BOOKMARKS_KEY, MAX_BOOKMARKS, MAX_RECENTS, RECENTS_KEY};
use crate::models::{ListedPlayer, Platform, PlayerReference};
use crate::store::KeyValueStore;

/// Outcome of [`UserData::toggle_bookmark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkToggle {
    Added,
    /// Unpinned and moved back to the top of recents.
    Removed,
    /// Not pinned because bookmarks are full.
    Rejected,
}

fn contains_player(list: &[PlayerReference], username: &str, platform: Platform) -> bool {
    list.iter().any(|p| p.is_same_player(username, platform))
}

fn position_of(list: &[PlayerReference], username: &str, platform: Platform) -> Option<usize> {
    list.iter().position(|p| p.is_same_player(username, platform))
}

impl<S: KeyValueStore> UserData<S> {
    // ===== Recents =====

    pub async fn recents(&self) -> Vec<PlayerReference> {
        self.load_list(RECENTS_KEY).await
    }

    pub async fn set_recents(&self, recents: &[PlayerReference]) {
        self.save_list(RECENTS_KEY, recents).await
    }

    /// Moves the player to the front of recents. Returns `false`, leaving
    /// everything untouched, when the player is bookmarked.
    pub async fn add_to_recents(&self, username: &str, platform: Platform) -> bool {
        if self.is_user_bookmarked(username, platform, None).await {
            debug!(username, platform = platform.code(), "Bookmarked player not added to recents");
            return false;
        }

        let mut recents = self.recents().await;
        recents.retain(|p| !p.is_same_player(username, platform));
        recents.insert(0, PlayerReference::new(username, platform));
        recents.truncate(MAX_RECENTS);

        self.set_recents(&recents).await;
        true
    }

    // ===== Bookmarks =====

    pub async fn bookmarks(&self) -> Vec<PlayerReference> {
        self.load_list(BOOKMARKS_KEY).await
    }

    pub async fn set_bookmarks(&self, bookmarks: &[PlayerReference]) {
        self.save_list(BOOKMARKS_KEY, bookmarks).await
    }

    /// Checks `bookmarks` when given, otherwise the stored list.
    pub async fn is_user_bookmarked(
        &self,
        username: &str,
        platform: Platform,
        bookmarks: Option<&[PlayerReference]>,
    ) -> bool {
        match bookmarks {
            Some(list) => contains_player(list, username, platform),
            None => contains_player(&self.bookmarks().await, username, platform),
        }
    }

    /// Pins a player at the end of bookmarks and drops them from recents.
    /// Returns `false` if already pinned or bookmarks are full.
    pub async fn add_to_bookmarks(&self, username: &str, platform: Platform) -> bool {
        let mut bookmarks = self.bookmarks().await;

        if contains_player(&bookmarks, username, platform) {
            return false;
        }
        if bookmarks.len() >= MAX_BOOKMARKS {
            debug!(username, platform = platform.code(), "Bookmarks full");
            return false;
        }

        let mut recents = self.recents().await;
        if let Some(idx) = position_of(&recents, username, platform) {
            recents.remove(idx);
            self.set_recents(&recents).await;
        }

        bookmarks.push(PlayerReference::new(username, platform));
        self.set_bookmarks(&bookmarks).await;
        true
    }

    /// Unpins a player. Recents are left alone; see [`Self::toggle_bookmark`]
    /// for the unpin-and-restore flow.
    pub async fn remove_from_bookmarks(&self, username: &str, platform: Platform) -> bool {
        let mut bookmarks = self.bookmarks().await;
        match position_of(&bookmarks, username, platform) {
            Some(idx) => {
                bookmarks.remove(idx);
                self.set_bookmarks(&bookmarks).await;
                true
            }
            None => false,
        }
    }

    pub async fn toggle_bookmark(&self, username: &str, platform: Platform) -> BookmarkToggle {
        if self.remove_from_bookmarks(username, platform).await {
            self.add_to_recents(username, platform).await;
            BookmarkToggle::Removed
        } else if self.add_to_bookmarks(username, platform).await {
            BookmarkToggle::Added
        } else {
            BookmarkToggle::Rejected
        }
    }

    /// Bookmarks first, then recents, for the home screen.
    pub async fn recents_list(&self) -> Vec<ListedPlayer> {
        let (bookmarks, recents) = futures::join!(self.bookmarks(), self.recents());

        bookmarks
            .into_iter()
            .map(|player| ListedPlayer {
                player,
                is_bookmarked: true,
            })
            .chain(recents.into_iter().map(|player| ListedPlayer {
                player,
                is_bookmarked: false,
            }))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
