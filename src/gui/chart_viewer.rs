//! Chart Viewer Widget
//! Central panel with the rating chart, player statistics, recent matches
//! and the leaderboard.

use crate::charts::{ChartPlotter, RatingLine};
use crate::gui::control_panel::UserSettings;
use crate::pipeline::UploadOutcome;
use crate::stats::{leaderboard, player_stats, recent_matches, LeaderboardRow};
use egui::{RichText, ScrollArea};

const CHART_HEIGHT: f32 = 450.0;
const SECTION_SPACING: f32 = 15.0;

/// Displays everything derived from the current upload.
pub struct ChartViewer {
    pub outcome: Option<UploadOutcome>,
    pub leaderboard: Vec<LeaderboardRow>,
    recent_count: usize,
}

impl ChartViewer {
    pub fn new(recent_count: usize) -> Self {
        Self {
            outcome: None,
            leaderboard: Vec::new(),
            recent_count,
        }
    }

    pub fn clear(&mut self) {
        self.outcome = None;
        self.leaderboard.clear();
    }

    /// Replace the displayed upload.
    pub fn set_outcome(&mut self, outcome: UploadOutcome) {
        self.leaderboard = leaderboard(&outcome.series);
        self.outcome = Some(outcome);
    }

    /// Sorted player names of the current upload.
    pub fn players(&self) -> Vec<String> {
        self.outcome
            .as_ref()
            .map(|o| o.series.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn show(&self, ui: &mut egui::Ui, settings: &UserSettings) {
        let Some(outcome) = &self.outcome else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Upload a CSV of match results").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let selected = settings.selected_player.as_str();

                let lines: Vec<RatingLine<'_>> = outcome
                    .series
                    .iter()
                    .enumerate()
                    .filter(|(_, (player, _))| settings.overlay_all || player.as_str() == selected)
                    .map(|(idx, (player, points))| RatingLine {
                        player,
                        points,
                        color: ChartPlotter::player_color(idx),
                    })
                    .collect();

                let title = if settings.overlay_all {
                    "Rating Progression: all players".to_string()
                } else {
                    format!("Rating Progression for {}", selected)
                };
                ui.label(RichText::new(title).size(18.0).strong());
                ui.add_space(8.0);

                ChartPlotter::draw_rating_chart(
                    ui,
                    "rating_chart",
                    &lines,
                    settings.x_axis,
                    CHART_HEIGHT,
                );

                if let Some(points) = outcome.series.get(selected) {
                    if let Some(stats) = player_stats(points) {
                        ui.add_space(SECTION_SPACING);
                        ui.label(
                            RichText::new(format!("📊 Statistics for {}", selected))
                                .size(16.0)
                                .strong(),
                        );
                        ui.add_space(5.0);
                        ChartPlotter::draw_stats_table(ui, selected, &stats);
                    }

                    ui.add_space(SECTION_SPACING);
                    ui.label(RichText::new("🕐 Recent Matches").size(16.0).strong());
                    ui.add_space(5.0);
                    let recent = recent_matches(points, self.recent_count);
                    ChartPlotter::draw_recent_matches(ui, selected, &recent);
                }

                ui.add_space(SECTION_SPACING);
                ui.separator();
                ui.label(RichText::new("🏆 Leaderboard").size(16.0).strong());
                ui.add_space(5.0);
                ChartPlotter::draw_leaderboard(ui, &self.leaderboard);
            });
    }
}
