//! wzstats - Warzone player lookups from the terminal.
//!
//! Keeps the same on-device recents, bookmarks, and profile cache as the
//! mobile app, and renders match summaries from saved API responses.

mod config;

use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wzstats_core::featured::featured_players;
use wzstats_core::models::{MatchHistory, MatchPlayers, ProfileStats, ALL_BR_MODES};
use wzstats_core::stats::{
    build_match_board, daily_breakdown, lifetime_modes, summarize_matches, weekly_mode_view, weekly_modes,
};
use wzstats_core::utils::{format_match_date_local, format_time_played, TimeUnits};
use wzstats_core::{BookmarkToggle, FileStore, Platform, UserData};

use config::Config;

const USAGE: &str = "\
Usage: wzstats <command>

Commands:
  recents                         Bookmarks and recently searched players
  search <platform> <username>    Record a player lookup
  bookmark <platform> <username>  Pin or unpin a player
  featured                        Well-known players to look up
  cache                           Cached profiles and their age
  summarize <history.json>        Summarize a saved recent-matches response
  board <match.json> [uno]        Team standings from a saved match response
  modes <profile.json> [mode]     Lifetime, weekly and daily totals from a saved profile

Platforms: psn, battle, xbl";

/// Initialize the tracing subscriber for logging.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(config: &Config, data_dir: &Path) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = if config.log_to_file {
        let appender = tracing_appender::rolling::daily(data_dir.join("logs"), "wzstats.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            Some(guard),
        )
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = Config::load()?;
    let data_dir = config.data_dir()?;
    let _log_guard = init_tracing(&config, &data_dir);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    info!(command = %command, data_dir = %data_dir.display(), "wzstats starting");

    let store = FileStore::new(data_dir.clone())
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    let user_data = UserData::new(store);

    match command.as_str() {
        "recents" => print_recents(&user_data).await,
        "search" => {
            let (platform, username) = player_args(&args, &config)?;
            if user_data.add_to_recents(username, platform).await {
                println!("Added {} ({}) to recents", username, platform);
            } else {
                println!("{} ({}) is bookmarked", username, platform);
            }
        }
        "bookmark" => {
            let (platform, username) = player_args(&args, &config)?;
            match user_data.toggle_bookmark(username, platform).await {
                BookmarkToggle::Added => println!("Player has been bookmarked!"),
                BookmarkToggle::Removed => println!("Bookmark removed"),
                BookmarkToggle::Rejected => println!("Too many bookmarks!"),
            }
        }
        "featured" => {
            for player in featured_players() {
                println!("{:<14} {:<22} {}", player.display_name, player.username, player.platform);
            }
        }
        "cache" => print_cache(&user_data).await,
        "summarize" => {
            let path = args.get(1).context("summarize needs a file")?;
            print_history(&read_json(path)?);
        }
        "board" => {
            let path = args.get(1).context("board needs a file")?;
            print_board(path, &read_json(path)?, args.get(2).map(String::as_str))?;
        }
        "modes" => {
            let path = args.get(1).context("modes needs a file")?;
            let mode = args.get(2).map(String::as_str).unwrap_or(ALL_BR_MODES);
            print_modes(&read_json(path)?, mode);
        }
        "help" | "--help" | "-h" => println!("{}", USAGE),
        other => bail!("Unknown command: {}\n\n{}", other, USAGE),
    }

    Ok(())
}

/// `<platform> <username>`, or just `<username>` when a default platform is
/// configured.
fn player_args<'a>(args: &'a [String], config: &Config) -> Result<(Platform, &'a str)> {
    match (args.get(1), args.get(2)) {
        (Some(platform), Some(username)) => Ok((platform.parse::<Platform>()?, username.as_str())),
        (Some(username), None) => {
            let platform = config
                .default_platform()
                .context("No platform given and no default_platform configured")?;
            Ok((platform, username.as_str()))
        }
        _ => bail!("Expected <platform> <username>"),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path))
}

async fn print_recents(user_data: &UserData<FileStore>) {
    let list = user_data.recents_list().await;
    if list.is_empty() {
        println!("No recent players");
        return;
    }
    for entry in list {
        let marker = if entry.is_bookmarked { "*" } else { " " };
        println!(
            "{} {:<20} {:<24} {}",
            marker, entry.player.display_name, entry.player.username, entry.player.platform
        );
    }
}

async fn print_cache(user_data: &UserData<FileStore>) {
    let now = user_data.now_millis();
    let entries = user_data.cached_profiles().await;
    if entries.is_empty() {
        println!("Profile cache is empty");
        return;
    }
    for entry in entries {
        let state = if entry.is_live(now) { "live" } else { "expired" };
        println!(
            "{:<24} {:<7} {:<9} {}",
            entry.username,
            entry.platform_code,
            entry.age_display(now),
            state
        );
    }
}

fn print_history(history: &MatchHistory) {
    let view = summarize_matches(&history.matches);
    let Some(summary) = view.summary else {
        println!("No matches");
        return;
    };

    println!("Matches:        {}", summary.number_of_matches);
    println!("Most kills:     {}", summary.best_game_kills);
    match summary.best_placement {
        Some(p) => println!("Best placement: #{} (x{})", p, summary.best_placement_count),
        None => println!("Best placement: N/A"),
    }
    println!("Gulag:          {}W {}L", summary.gulag_wins, summary.gulag_losses);
    println!();

    for row in view.rows {
        let placement = row.placement.map(|p| format!("#{}", p)).unwrap_or_else(|| "N/A".to_string());
        let duration = (row.utc_end_seconds - row.utc_start_seconds).max(0) as u64;
        println!(
            "{:<16} {:<14} {:>4}  {:>2}K {:>2}D {:>5} dmg  gulag {}  {}",
            format_match_date_local(row.utc_end_seconds),
            row.mode,
            placement,
            row.kills,
            row.deaths,
            row.damage,
            row.gulag,
            format_time_played(duration, TimeUnits::default())
        );
    }
}

fn print_modes(stats: &ProfileStats, mode: &str) {
    println!("Lifetime");
    for view in lifetime_modes(stats) {
        println!(
            "  {:<14} {:>5} games  {:>6}K  {:>5.1} K/game  {:.2} K/D  {:>4.1}% wins  {:>4.1}% top 5  {:>4.1}% top 10",
            view.name,
            view.games_played,
            view.kills,
            view.kills_per_game,
            view.kd_ratio,
            view.win_percentage,
            view.top_five_percentage,
            view.top_ten_percentage
        );
    }

    println!();
    println!("Weekly modes: {}", weekly_modes(stats).join(", "));
    match weekly_mode_view(stats, mode) {
        Some(week) => {
            let arrow = |up: bool| if up { "+" } else { "-" };
            println!(
                "  {:<14} {:>3} matches  {:>4}K  {:.2} K/D {}  {:.1} K/game {}  gulag {}",
                week.name,
                week.matches_played,
                week.kills,
                week.kd_ratio,
                arrow(week.kd_above_lifetime),
                week.kills_per_game,
                arrow(week.kills_per_game_above_lifetime),
                week.gulag_kills.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string())
            );
        }
        None => println!("  No weekly data for {}", mode),
    }

    println!();
    for day in daily_breakdown(stats, mode, &chrono::Local) {
        match day.totals {
            Some(t) => println!("  {}  {:>3}K {:>3}D  {:.2}", day.day, t.kills, t.deaths, t.kd_ratio),
            None => println!("  {}    -    -  -", day.day),
        }
    }
}

fn print_board(path: &str, players: &MatchPlayers, uno: Option<&str>) -> Result<()> {
    let match_id = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("match");
    let Some(board) = build_match_board(match_id, &players.all_players, uno) else {
        bail!("Match not loaded properly.");
    };

    println!(
        "{}  {}  {} players / {} teams",
        board.mode,
        format_match_date_local(board.utc_end_seconds),
        board.player_count.unwrap_or(board.players.len() as u32),
        board.team_count.unwrap_or(board.teams.len() as u32)
    );

    for team in &board.teams {
        let placement = team.placement.map(|p| format!("#{}", p)).unwrap_or_else(|| "N/A".to_string());
        let marker = if team.is_current_team { "*" } else { " " };
        println!(
            "{} {:<5} {:<12} {:>3}K {:>3}D {:>6} dmg",
            marker, placement, team.team, team.kills, team.deaths, team.damage
        );
        for player in &team.players {
            println!(
                "      {:<24} {:>3}K {:>3}D {:>6} dmg  {}",
                player.username,
                player.kills,
                player.deaths,
                player.damage,
                format_time_played(player.time_played, TimeUnits::ALL)
            );
        }
    }
    Ok(())
}
