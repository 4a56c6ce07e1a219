//! Data module - CSV loading, validation and series building

pub mod dates;
pub mod loader;
pub mod series;
pub mod validator;

pub use dates::parse_match_date;
pub use loader::{load_csv_bytes, load_csv_file, LoaderError};
pub use series::{build_series, PlayerSeries, SeriesPoint};
pub use validator::{
    validate, DropReason, DroppedRows, EmptyDataset, MatchRecord, MatchTable, RowWarning,
    ValidationError, ValidationReport, REQUIRED_COLUMNS,
};
