//! Player Rating Progression Viewer
//!
//! Desktop shell: pick a CSV of match results and browse each player's
//! rating over time.

use eframe::egui;
use rating_viewer::config::ViewerConfig;
use rating_viewer::gui::RatingViewerApp;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let config = ViewerConfig::default();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(&config.title),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(RatingViewerApp::new(cc, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}
