use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account provider a username is scoped to.
///
/// Persisted as `{ "name": ..., "code": ... }`; only the code is consulted
/// when reading it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "PlatformInfo", try_from = "PlatformInfo")]
pub enum Platform {
    PlayStation,
    BattleNet,
    Xbox,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::PlayStation, Platform::BattleNet, Platform::Xbox];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::PlayStation => "Playstation",
            Platform::BattleNet => "Battle.net",
            Platform::Xbox => "Xbox Live",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Platform::PlayStation => "psn",
            Platform::BattleNet => "battle",
            Platform::Xbox => "xbl",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    /// Battle.net ids look like `name#1234`.
    pub fn uses_tagged_ids(&self) -> bool {
        matches!(self, Platform::BattleNet)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl std::fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown platform: {}", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

/// Parses either the code (`battle`) or the display name (`Battle.net`),
/// ignoring case.
impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(needle) || p.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// Wire shape of a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct PlatformInfo {
    pub name: String,
    pub code: String,
}

impl From<Platform> for PlatformInfo {
    fn from(platform: Platform) -> Self {
        Self {
            name: platform.name().to_string(),
            code: platform.code().to_string(),
        }
    }
}

impl TryFrom<PlatformInfo> for Platform {
    type Error = UnknownPlatform;

    fn try_from(info: PlatformInfo) -> Result<Self, Self::Error> {
        Platform::from_code(&info.code).ok_or(UnknownPlatform(info.code))
    }
}
