//! Data Validator Module
//! Checks the raw table against the match schema and drops rows that do not
//! coerce into a [`MatchRecord`].

use crate::data::dates::parse_match_date;
use chrono::NaiveDate;
use polars::prelude::*;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const PLAYER1_COL: &str = "player1";
pub const PLAYER2_COL: &str = "player2";
pub const DATE_COL: &str = "date";
pub const RATING_P1_COL: &str = "rating p1";
pub const RATING_P2_COL: &str = "rating p2";

/// Required columns, in the order they are reported when missing.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    PLAYER1_COL,
    PLAYER2_COL,
    DATE_COL,
    RATING_P1_COL,
    RATING_P2_COL,
];

/// One validated match between two players.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// 1-based data row in the source file (header excluded)
    pub row: usize,
    pub player1: String,
    pub player2: String,
    pub date: NaiveDate,
    pub rating_p1: f64,
    pub rating_p2: f64,
}

/// Validated matches in file row order.
pub type MatchTable = Vec<MatchRecord>;

/// Why a row was dropped during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    EmptyPlayer,
    DateParse,
    NumericParse,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::EmptyPlayer => write!(f, "missing player name"),
            DropReason::DateParse => write!(f, "unparseable date"),
            DropReason::NumericParse => write!(f, "non-numeric rating"),
        }
    }
}

/// A non-fatal notice: some rows were skipped for one reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    pub reason: DropReason,
    pub rows: usize,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.rows == 1 { "row" } else { "rows" };
        write!(f, "{} {} skipped ({})", self.rows, noun, self.reason)
    }
}

/// Per-reason counts of dropped rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DroppedRows {
    pub empty_player: usize,
    pub date_parse: usize,
    pub numeric_parse: usize,
}

impl DroppedRows {
    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::EmptyPlayer => self.empty_player += 1,
            DropReason::DateParse => self.date_parse += 1,
            DropReason::NumericParse => self.numeric_parse += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.empty_player + self.date_parse + self.numeric_parse
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Warnings for every reason that dropped at least one row.
    pub fn warnings(&self) -> Vec<RowWarning> {
        [
            (DropReason::EmptyPlayer, self.empty_player),
            (DropReason::DateParse, self.date_parse),
            (DropReason::NumericParse, self.numeric_parse),
        ]
        .into_iter()
        .filter(|(_, rows)| *rows > 0)
        .map(|(reason, rows)| RowWarning { reason, rows })
        .collect()
    }
}

/// Why validation left nothing to plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyDataset {
    /// The file had a header but no data rows.
    NoRows,
    /// Every data row failed validation.
    AllRowsInvalid { dropped: DroppedRows },
}

impl fmt::Display for EmptyDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyDataset::NoRows => write!(
                f,
                "the file contains a header but no data rows; add at least one match"
            ),
            EmptyDataset::AllRowsInvalid { dropped } => {
                let reasons: Vec<String> =
                    dropped.warnings().iter().map(|w| w.to_string()).collect();
                write!(
                    f,
                    "all {} rows failed validation, zero valid rows remained ({})",
                    dropped.total(),
                    reasons.join(", ")
                )
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
    #[error("No valid data: {0}")]
    EmptyDataset(EmptyDataset),
    #[error("Column '{column}' could not be read as text: {message}")]
    ColumnType { column: String, message: String },
}

/// Result of a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub table: MatchTable,
    pub dropped: DroppedRows,
    /// Data rows in the raw input
    pub raw_rows: usize,
}

impl ValidationReport {
    pub fn warnings(&self) -> Vec<RowWarning> {
        self.dropped.warnings()
    }
}

/// Columns from `REQUIRED_COLUMNS` not present in the table.
pub fn missing_columns(df: &DataFrame) -> Vec<String> {
    let present: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !present.contains(required))
        .map(|s| s.to_string())
        .collect()
}

fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, ValidationError> {
    df.column(name)
        .and_then(|col| col.str())
        .map_err(|e| ValidationError::ColumnType {
            column: name.to_string(),
            message: e.to_string(),
        })
}

fn parse_player(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn parse_rating(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Validate and clean a raw table.
///
/// A row is kept only if both player names are non-empty, the date parses
/// and both ratings parse as finite numbers. Each dropped row is counted once
/// under the first check it fails (players, then date, then ratings).
pub fn validate(df: &DataFrame) -> Result<ValidationReport, ValidationError> {
    let missing = missing_columns(df);
    if !missing.is_empty() {
        warn!(missing = ?missing, "required columns absent");
        return Err(ValidationError::MissingColumns { missing });
    }

    let raw_rows = df.height();
    if raw_rows == 0 {
        warn!("uploaded file has no data rows");
        return Err(ValidationError::EmptyDataset(EmptyDataset::NoRows));
    }

    let player1 = string_column(df, PLAYER1_COL)?;
    let player2 = string_column(df, PLAYER2_COL)?;
    let dates = string_column(df, DATE_COL)?;
    let ratings_p1 = string_column(df, RATING_P1_COL)?;
    let ratings_p2 = string_column(df, RATING_P2_COL)?;

    let mut table = MatchTable::with_capacity(raw_rows);
    let mut dropped = DroppedRows::default();

    let rows = player1
        .into_iter()
        .zip(player2)
        .zip(dates)
        .zip(ratings_p1)
        .zip(ratings_p2)
        .enumerate();

    for (idx, ((((p1, p2), date), r1), r2)) in rows {
        let row = idx + 1;

        let (Some(player1), Some(player2)) = (parse_player(p1), parse_player(p2)) else {
            debug!(row, reason = %DropReason::EmptyPlayer, "dropping row");
            dropped.record(DropReason::EmptyPlayer);
            continue;
        };

        let Some(date) = date.and_then(parse_match_date) else {
            debug!(row, reason = %DropReason::DateParse, value = ?date, "dropping row");
            dropped.record(DropReason::DateParse);
            continue;
        };

        let (Some(rating_p1), Some(rating_p2)) = (parse_rating(r1), parse_rating(r2)) else {
            debug!(row, reason = %DropReason::NumericParse, "dropping row");
            dropped.record(DropReason::NumericParse);
            continue;
        };

        table.push(MatchRecord {
            row,
            player1,
            player2,
            date,
            rating_p1,
            rating_p2,
        });
    }

    if table.is_empty() {
        warn!(dropped = dropped.total(), "every row failed validation");
        return Err(ValidationError::EmptyDataset(EmptyDataset::AllRowsInvalid {
            dropped,
        }));
    }

    if !dropped.is_empty() {
        warn!(
            kept = table.len(),
            dropped = dropped.total(),
            "some rows were skipped during cleaning"
        );
    }
    info!(matches = table.len(), "validated match table");

    Ok(ValidationReport {
        table,
        dropped,
        raw_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv_bytes;

    const HEADER: &str = "player1,player2,date,rating p1,rating p2";

    fn raw(rows: &[&str]) -> DataFrame {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv.push('\n');
        load_csv_bytes(csv.as_bytes()).unwrap()
    }

    #[test]
    fn missing_rating_p2_is_named() {
        let df = load_csv_bytes(b"player1,player2,date,rating p1\nA,B,2023-01-01,1500\n").unwrap();
        let err = validate(&df).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingColumns {
                missing: vec!["rating p2".to_string()]
            }
        );
        assert_eq!(err.to_string(), "Missing required columns: rating p2");
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let df = load_csv_bytes(b"Player1,player2,Date,rating p1,rating p2\nA,B,2023-01-01,1,2\n")
            .unwrap();
        let err = validate(&df).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingColumns {
                missing: vec!["player1".to_string(), "date".to_string()]
            }
        );
    }

    #[test]
    fn extra_columns_and_order_are_irrelevant() {
        let df = load_csv_bytes(
            b"SL No,rating p2,date,player2,rating p1,player1,venue\n1,1600,2023-01-01,B,1500,A,Hall\n",
        )
        .unwrap();
        let report = validate(&df).unwrap();
        assert_eq!(report.table.len(), 1);
        let record = &report.table[0];
        assert_eq!(record.player1, "A");
        assert_eq!(record.player2, "B");
        assert_eq!(record.rating_p1, 1500.0);
        assert_eq!(record.rating_p2, 1600.0);
    }

    #[test]
    fn all_invalid_dates() {
        let df = raw(&[
            "A,B,not-a-date,1500,1600",
            "A,C,not-a-date,1510,1400",
            "B,C,not-a-date,1590,1390",
        ]);
        let err = validate(&df).unwrap_err();
        match err {
            ValidationError::EmptyDataset(EmptyDataset::AllRowsInvalid { dropped }) => {
                assert_eq!(dropped.total(), 3);
                assert_eq!(dropped.date_parse, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn header_only_is_no_rows() {
        let df = raw(&[]);
        assert_eq!(
            validate(&df).unwrap_err(),
            ValidationError::EmptyDataset(EmptyDataset::NoRows)
        );
    }

    #[test]
    fn empty_dataset_messages_differ() {
        let no_rows = ValidationError::EmptyDataset(EmptyDataset::NoRows).to_string();
        let all_invalid = ValidationError::EmptyDataset(EmptyDataset::AllRowsInvalid {
            dropped: DroppedRows {
                date_parse: 2,
                ..Default::default()
            },
        })
        .to_string();

        assert!(no_rows.contains("no data rows"));
        assert!(all_invalid.contains("all 2 rows failed validation"));
        assert!(all_invalid.contains("unparseable date"));
    }

    #[test]
    fn mixed_validity_keeps_good_rows() {
        let df = raw(&["A,B,2023-01-01,1500,1600", "A,B,bad-date,1510,1590"]);
        let report = validate(&df).unwrap();

        assert_eq!(report.table.len(), 1);
        assert_eq!(report.dropped.total(), 1);
        assert_eq!(report.raw_rows, 2);
        assert_eq!(
            report.warnings(),
            vec![RowWarning {
                reason: DropReason::DateParse,
                rows: 1
            }]
        );
    }

    #[test]
    fn each_row_counted_once_under_first_failure() {
        let df = raw(&[
            ",B,bad-date,x,1600",        // player first
            "A,B,bad-date,x,1600",       // then date
            "A,B,2023-01-01,x,1600",     // then rating
            "A,B,2023-01-01,1500,NaN",   // non-finite rating
            "A,  ,2023-01-01,1500,1600", // whitespace-only name
            "A,B,2023-01-02,1500,1600",
        ]);
        let report = validate(&df).unwrap();

        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table[0].row, 6);
        assert_eq!(
            report.dropped,
            DroppedRows {
                empty_player: 2,
                date_parse: 1,
                numeric_parse: 2,
            }
        );
        assert_eq!(report.table.len() + report.dropped.total(), report.raw_rows);
    }

    #[test]
    fn ragged_rows_are_dropped_not_fatal() {
        let df = raw(&["A,B,2023-01-01", "A,B,2023-01-02,1500,1600"]);
        let report = validate(&df).unwrap();
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.dropped.numeric_parse, 1);
    }

    #[test]
    fn player_names_are_trimmed_and_opaque() {
        let df = raw(&["  Ann Lee , #42 ,2023-01-01, 1500.5 ,1600"]);
        let report = validate(&df).unwrap();
        let record = &report.table[0];
        assert_eq!(record.player1, "Ann Lee");
        assert_eq!(record.player2, "#42");
        assert_eq!(record.rating_p1, 1500.5);
    }

    #[test]
    fn input_table_is_not_modified() {
        let df = raw(&["A,B,2023-01-01,1500,1600", "A,B,bad,1,2"]);
        let before = df.clone();
        let _ = validate(&df).unwrap();
        assert!(df.equals_missing(&before));
    }
}
