//! Stats module - Player summaries and leaderboard

mod calculator;

pub use calculator::{
    latest_date, leaderboard, player_stats, recent_matches, LeaderboardRow, PlayerStats,
};
