//! Viewer configuration.

/// Settings for the desktop shell. The processing core takes none.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Rows shown in the recent matches table
    pub recent_matches: usize,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Player Rating Progression".to_string(),
            window_size: [1400.0, 800.0],
            min_window_size: [1000.0, 600.0],
            recent_matches: 5,
            log_filter: "info".to_string(),
        }
    }
}
