//! Series Builder Module
//! Pivots the match table into one date-ordered rating series per player.

use crate::data::validator::MatchTable;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One rating observation for a player.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub rating: f64,
    pub opponent: String,
    /// Source row of the match
    pub row: usize,
}

/// Player name -> observations sorted ascending by date.
pub type PlayerSeries = BTreeMap<String, Vec<SeriesPoint>>;

/// Build per-player rating series from a validated table.
///
/// Every match contributes one point to each side. Points on the same date
/// keep the order in which their rows appear in the file.
pub fn build_series(table: &MatchTable) -> PlayerSeries {
    let mut series = PlayerSeries::new();

    for record in table {
        series
            .entry(record.player1.clone())
            .or_default()
            .push(SeriesPoint {
                date: record.date,
                rating: record.rating_p1,
                opponent: record.player2.clone(),
                row: record.row,
            });
        series
            .entry(record.player2.clone())
            .or_default()
            .push(SeriesPoint {
                date: record.date,
                rating: record.rating_p2,
                opponent: record.player1.clone(),
                row: record.row,
            });
    }

    // sort_by_key is stable
    for points in series.values_mut() {
        points.sort_by_key(|p| p.date);
    }

    series
}
