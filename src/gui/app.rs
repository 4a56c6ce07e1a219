//! Rating Viewer Main Application
//! Main window with control panel and chart viewer.

use crate::config::ViewerConfig;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, StatusKind};
use crate::pipeline::{process_upload, UploadOutcome};
use anyhow::Context;
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{debug, error, info};

/// Upload result from background thread
enum LoadResult {
    Complete(UploadOutcome),
    Error(String),
}

/// Read and process one uploaded file.
pub fn load_upload(path: &Path) -> anyhow::Result<UploadOutcome> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let outcome = process_upload(&bytes)?;
    Ok(outcome)
}

/// Main application window.
pub struct RatingViewerApp {
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl RatingViewerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &ViewerConfig) -> Self {
        Self {
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(config.recent_matches),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_upload(path);
        }
    }

    /// Process a file in the background; the previous result is discarded.
    fn start_upload(&mut self, path: PathBuf) {
        self.chart_viewer.clear();
        self.control_panel.clear();
        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel
            .set_status(StatusKind::Info, "Validating match results...");
        self.control_panel.busy = true;
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        info!(path = %path.display(), "processing upload");
        thread::spawn(move || {
            let result = match load_upload(&path) {
                Ok(outcome) => LoadResult::Complete(outcome),
                Err(e) => LoadResult::Error(format!("{:#}", e)),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for upload results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(outcome)) => {
                self.control_panel
                    .set_status(StatusKind::Success, &outcome.summary());
                self.control_panel.warnings =
                    outcome.warnings().iter().map(|w| w.to_string()).collect();
                self.chart_viewer.set_outcome(outcome);
                self.control_panel
                    .update_players(self.chart_viewer.players());
                self.finish_loading();
            }
            Ok(LoadResult::Error(message)) => {
                error!(%message, "upload rejected");
                self.control_panel.set_status(StatusKind::Error, &message);
                self.finish_loading();
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel
                    .set_status(StatusKind::Error, "Processing stopped unexpectedly");
                self.finish_loading();
            }
        }
    }

    fn finish_loading(&mut self) {
        self.is_loading = false;
        self.control_panel.busy = false;
    }
}

impl eframe::App for RatingViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::PlayerChanged => {
                            debug!(
                                player = %self.control_panel.settings.selected_player,
                                "player selected"
                            );
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.control_panel.settings);
        });
    }
}
