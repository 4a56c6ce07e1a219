//! Player Rating Progression Viewer
//!
//! Loads a CSV of match results, validates and cleans it, and builds
//! per-player rating series for charting.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod stats;

pub use pipeline::{process_upload, UploadError, UploadOutcome};
