use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Platform;
use crate::utils::eq_ignore_case;

/// How long a cached profile stays usable, in milliseconds (10 minutes).
pub const PROFILE_CACHE_TTL_MS: i64 = 600_000;

/// Previously fetched stats, kept opaque.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfilePayload {
    #[serde(rename = "profileData", default)]
    pub profile_data: Value,
    #[serde(rename = "matchData", default)]
    pub match_data: Value,
}

impl ProfilePayload {
    pub fn new(profile_data: Value, match_data: Value) -> Self {
        Self {
            profile_data,
            match_data,
        }
    }

    /// Both halves carry something worth rendering.
    pub fn is_complete(&self) -> bool {
        has_content(&self.profile_data) && has_content(&self.match_data)
    }
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCacheEntry {
    pub username: String,
    #[serde(rename = "platformCode")]
    pub platform_code: String,
    pub data: ProfilePayload,
    /// Epoch milliseconds.
    #[serde(rename = "dateStored")]
    pub stored_at: i64,
}

impl ProfileCacheEntry {
    pub fn new(username: &str, platform: Platform, data: ProfilePayload, stored_at: i64) -> Self {
        Self {
            username: username.to_string(),
            platform_code: platform.code().to_string(),
            data,
            stored_at,
        }
    }

    pub fn is_for(&self, username: &str, platform: Platform) -> bool {
        self.platform_code == platform.code() && eq_ignore_case(&self.username, username)
    }

    /// Live through `stored_at + TTL` inclusive.
    pub fn is_live(&self, now_ms: i64) -> bool {
        self.stored_at + PROFILE_CACHE_TTL_MS >= now_ms
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        !self.is_live(now_ms)
    }

    pub fn age_minutes(&self, now_ms: i64) -> i64 {
        (now_ms - self.stored_at) / 60_000
    }

    pub fn age_display(&self, now_ms: i64) -> String {
        let minutes = self.age_minutes(now_ms);
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}
