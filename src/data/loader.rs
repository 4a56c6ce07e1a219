//! CSV Data Loader Module
//! Turns uploaded CSV bytes into a raw string table using Polars.

use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("The uploaded file is empty")]
    EmptyFile,
}

/// Remove blank and whitespace-only lines; the reader would otherwise turn
/// each one into an all-null row.
fn strip_blank_lines(bytes: &[u8]) -> Vec<u8> {
    let mut kept = Vec::with_capacity(bytes.len());
    for line in bytes.split(|b| *b == b'\n') {
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            continue;
        }
        kept.extend_from_slice(line);
        kept.push(b'\n');
    }
    kept
}

/// Load CSV bytes into a DataFrame where every column is a string.
///
/// Schema inference is disabled so that values which do not coerce cleanly
/// reach the validator untouched instead of being nulled by the reader.
/// Blank lines are skipped and never count as data rows.
pub fn load_csv_bytes(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
    let bytes = strip_blank_lines(bytes);
    if bytes.is_empty() {
        return Err(LoaderError::EmptyFile);
    }

    let parse_options = CsvParseOptions::default().with_truncate_ragged_lines(true);

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(parse_options)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    debug!(
        rows = df.height(),
        columns = df.width(),
        "loaded raw CSV table"
    );
    Ok(df)
}

/// Read a CSV file from disk and load it.
pub fn load_csv_file(path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
    let bytes = std::fs::read(path)?;
    load_csv_bytes(&bytes)
}

/// Get list of column names from a raw table.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}
