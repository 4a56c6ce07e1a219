//! Statistics Calculator Module
//! Per-player rating summaries and the day-over-day leaderboard.

use crate::data::{PlayerSeries, SeriesPoint};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Summary of one player's rating history.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub first_rating: f64,
    pub latest_rating: f64,
    pub num_matches: usize,
    pub rating_change: f64,
    pub first_date: NaiveDate,
    pub latest_date: NaiveDate,
    pub peak_rating: f64,
    pub mean_rating: f64,
    /// Sample standard deviation, 0 for a single match
    pub rating_std: f64,
}

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub player: String,
    pub last_rating: f64,
    pub matches_played: usize,
    /// Change since the player's last rating before the latest day
    pub rating_change: f64,
    /// No rating before the latest day in the dataset
    pub is_new: bool,
}

fn mean_and_std(ratings: &[f64]) -> (f64, f64) {
    use statrs::statistics::Statistics;

    let mean = ratings.iter().mean();
    let std = if ratings.len() > 1 {
        ratings.iter().std_dev()
    } else {
        0.0
    };
    (mean, std)
}

/// Compute summary statistics for a date-ordered series.
pub fn player_stats(points: &[SeriesPoint]) -> Option<PlayerStats> {
    let first = points.first()?;
    let latest = points.last()?;

    let ratings: Vec<f64> = points.iter().map(|p| p.rating).collect();
    let (mean_rating, rating_std) = mean_and_std(&ratings);
    let peak_rating = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(PlayerStats {
        first_rating: first.rating,
        latest_rating: latest.rating,
        num_matches: points.len(),
        rating_change: latest.rating - first.rating,
        first_date: first.date,
        latest_date: latest.date,
        peak_rating,
        mean_rating,
        rating_std,
    })
}

/// The last `n` matches, newest first.
pub fn recent_matches(points: &[SeriesPoint], n: usize) -> Vec<&SeriesPoint> {
    points.iter().rev().take(n).collect()
}

/// Latest match date across all players.
pub fn latest_date(series: &PlayerSeries) -> Option<NaiveDate> {
    series
        .values()
        .filter_map(|points| points.last())
        .map(|p| p.date)
        .max()
}

/// Build the leaderboard, highest current rating first.
///
/// Rating change compares the current rating with the last rating dated on
/// or before the day preceding the dataset's latest date. If there is no
/// such day (latest date is the earliest representable one) every player
/// is new.
pub fn leaderboard(series: &PlayerSeries) -> Vec<LeaderboardRow> {
    let Some(latest) = latest_date(series) else {
        return Vec::new();
    };
    let previous_limit = latest.pred_opt();

    let mut rows: Vec<LeaderboardRow> = series
        .par_iter()
        .filter_map(|(player, points)| {
            let current = points.last()?;
            let previous = previous_limit
                .and_then(|limit| points.iter().rev().find(|p| p.date <= limit));

            let (rating_change, is_new) = match previous {
                Some(prev) => (current.rating - prev.rating, false),
                None => (0.0, true),
            };

            Some(LeaderboardRow {
                rank: 0,
                player: player.clone(),
                last_rating: current.rating,
                matches_played: points.len(),
                rating_change,
                is_new,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.last_rating
            .partial_cmp(&a.last_rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.player.cmp(&b.player))
    });
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(d: &str, rating: f64, row: usize) -> SeriesPoint {
        SeriesPoint {
            date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
            rating,
            opponent: "X".to_string(),
            row,
        }
    }

    #[test]
    fn stats_for_a_growing_player() {
        let points = vec![
            point("2023-01-01", 1500.0, 1),
            point("2023-01-05", 1540.0, 3),
            point("2023-01-09", 1520.0, 7),
        ];
        let stats = player_stats(&points).unwrap();

        assert_eq!(stats.first_rating, 1500.0);
        assert_eq!(stats.latest_rating, 1520.0);
        assert_eq!(stats.num_matches, 3);
        assert_eq!(stats.rating_change, 20.0);
        assert_eq!(stats.peak_rating, 1540.0);
        assert!((stats.mean_rating - 1520.0).abs() < 1e-9);
        assert!((stats.rating_std - 20.0).abs() < 1e-9);
        assert_eq!(stats.first_date, points[0].date);
        assert_eq!(stats.latest_date, points[2].date);
    }

    #[test]
    fn single_point_has_zero_spread() {
        let stats = player_stats(&[point("2023-01-01", 1500.0, 1)]).unwrap();
        assert_eq!(stats.rating_change, 0.0);
        assert_eq!(stats.rating_std, 0.0);
        assert_eq!(stats.mean_rating, 1500.0);
    }

    #[test]
    fn no_points_no_stats() {
        assert_eq!(player_stats(&[]), None);
    }

    #[test]
    fn recent_matches_newest_first() {
        let points: Vec<SeriesPoint> = (1..=7)
            .map(|i| point(&format!("2023-01-0{i}"), 1500.0 + i as f64, i))
            .collect();
        let recent = recent_matches(&points, 5);
        let rows: Vec<usize> = recent.iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![7, 6, 5, 4, 3]);
        assert_eq!(recent_matches(&points[..2], 5).len(), 2);
    }

    #[test]
    fn leaderboard_ranks_and_day_over_day_change() {
        let mut series = PlayerSeries::new();
        series.insert(
            "A".to_string(),
            vec![
                point("2023-01-01", 1500.0, 1),
                point("2023-01-02", 1510.0, 2),
                point("2023-01-03", 1530.0, 3),
            ],
        );
        series.insert("B".to_string(), vec![point("2023-01-03", 1600.0, 3)]);
        series.insert(
            "C".to_string(),
            vec![point("2022-12-20", 1450.0, 0), point("2023-01-01", 1440.0, 1)],
        );

        let board = leaderboard(&series);
        let order: Vec<&str> = board.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(board.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);

        assert!(board[0].is_new);
        assert_eq!(board[0].rating_change, 0.0);

        assert!(!board[1].is_new);
        assert_eq!(board[1].rating_change, 20.0);
        assert_eq!(board[1].matches_played, 3);

        // No games on the latest day: change is zero, but not new.
        assert!(!board[2].is_new);
        assert_eq!(board[2].rating_change, 0.0);
    }

    #[test]
    fn leaderboard_ties_break_by_name() {
        let mut series = PlayerSeries::new();
        series.insert("Zed".to_string(), vec![point("2023-01-01", 1500.0, 1)]);
        series.insert("Amy".to_string(), vec![point("2023-01-01", 1500.0, 1)]);
        let board = leaderboard(&series);
        assert_eq!(board[0].player, "Amy");
        assert_eq!(board[1].player, "Zed");
    }

    #[test]
    fn leaderboard_on_earliest_date_marks_everyone_new() {
        let mut series = PlayerSeries::new();
        let first_day = SeriesPoint {
            date: NaiveDate::MIN,
            rating: 1500.0,
            opponent: "B".to_string(),
            row: 1,
        };
        series.insert("A".to_string(), vec![first_day.clone()]);
        series.insert(
            "B".to_string(),
            vec![SeriesPoint {
                rating: 1400.0,
                opponent: "A".to_string(),
                ..first_day
            }],
        );

        let board = leaderboard(&series);
        assert_eq!(board.len(), 2);
        assert!(board.iter().all(|r| r.is_new && r.rating_change == 0.0));
    }

    #[test]
    fn empty_series_empty_board() {
        assert!(leaderboard(&PlayerSeries::new()).is_empty());
    }
}
