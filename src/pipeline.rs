//! Upload pipeline: raw bytes in, validated table and player series out.

use crate::data::{
    build_series, load_csv_bytes, validate, DroppedRows, LoaderError, MatchTable, PlayerSeries,
    RowWarning, ValidationError,
};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Everything produced from one successful upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub table: MatchTable,
    pub dropped: DroppedRows,
    pub raw_rows: usize,
    pub series: PlayerSeries,
}

impl UploadOutcome {
    pub fn warnings(&self) -> Vec<RowWarning> {
        self.dropped.warnings()
    }

    /// User-facing notice for a successful upload.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Loaded {} matches, {} players",
            self.table.len(),
            self.series.len()
        );
        if !self.dropped.is_empty() {
            let reasons: Vec<String> = self.warnings().iter().map(|w| w.to_string()).collect();
            summary.push_str(&format!(
                "; {} of {} rows skipped: {}",
                self.dropped.total(),
                self.raw_rows,
                reasons.join(", ")
            ));
        }
        summary
    }
}

/// Run loader, validator and series builder over one uploaded file.
pub fn process_upload(bytes: &[u8]) -> Result<UploadOutcome, UploadError> {
    let raw = load_csv_bytes(bytes)?;
    let report = validate(&raw)?;
    let series = build_series(&report.table);

    info!(
        matches = report.table.len(),
        players = series.len(),
        dropped = report.dropped.total(),
        "upload processed"
    );

    Ok(UploadOutcome {
        table: report.table,
        dropped: report.dropped,
        raw_rows: report.raw_rows,
        series,
    })
}
