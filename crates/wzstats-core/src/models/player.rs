use serde::{Deserialize, Serialize};

use super::Platform;
use crate::utils::eq_ignore_case;

/// A player the user has looked up or pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct PlayerReference {
    #[serde(rename = "name")]
    pub display_name: String,
    pub username: String,
    #[cfg_attr(feature = "ts", ts(as = "super::platform::PlatformInfo"))]
    pub platform: Platform,
}

impl PlayerReference {
    pub fn new(username: &str, platform: Platform) -> Self {
        Self {
            display_name: display_name_for(username, platform),
            username: username.to_string(),
            platform,
        }
    }

    /// Same player: username equal ignoring case, platform code equal.
    pub fn is_same_player(&self, username: &str, platform: Platform) -> bool {
        self.platform.code() == platform.code() && eq_ignore_case(&self.username, username)
    }
}

/// Strips the `#tag` suffix from tagged ids; other platforms show the
/// username as entered.
pub fn display_name_for(username: &str, platform: Platform) -> String {
    if platform.uses_tagged_ids() {
        if let Some(idx) = username.rfind('#') {
            return username[..idx].to_string();
        }
    }
    username.to_string()
}

/// Entry of the combined home-screen list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct ListedPlayer {
    #[serde(flatten)]
    pub player: PlayerReference,
    #[serde(rename = "isBookmarked")]
    pub is_bookmarked: bool,
}
