//! Well-known players suggested on the home screen.

use crate::models::{Platform, PlayerReference};

/// (display name, username, platform)
const FEATURED_PLAYERS: [(&str, &str, Platform); 13] = [
    ("Nickmercs", "Nickmercs#11526", Platform::BattleNet),
    ("Iron", "Iron#11745", Platform::BattleNet),
    ("JoeWo", "AverageJoeWo#1438", Platform::BattleNet),
    ("Vikkstar123", "Vikkstar123#21347", Platform::BattleNet),
    ("TeePee", "TeePee#1840", Platform::BattleNet),
    ("TOMMEY", "TOMMEY#21329", Platform::BattleNet),
    ("Frozone", "Frozone#11329", Platform::BattleNet),
    ("Jukeyz", "Jukeyz#2681", Platform::BattleNet),
    ("Newbz", "TBE_Newbzz", Platform::PlayStation),
    ("SuperEvan", "SuperEvan#11680", Platform::BattleNet),
    ("GDbooya", "GDbooya#1102", Platform::BattleNet),
    ("UnRationaL", "UnRationaLLL#1556", Platform::BattleNet),
    ("Almond", "Almond#11120", Platform::BattleNet),
];

/// Display names are curated, not derived from the username.
pub fn featured_players() -> Vec<PlayerReference> {
    FEATURED_PLAYERS
        .iter()
        .map(|(name, username, platform)| PlayerReference {
            display_name: name.to_string(),
            username: username.to_string(),
            platform: *platform,
        })
        .collect()
}
