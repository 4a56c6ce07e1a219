//! Control Panel Widget
//! Left side panel with file selection, player selection and status.

use crate::charts::XAxisMode;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// User choices for what to display
#[derive(Default, Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub selected_player: String,
    pub overlay_all: bool,
    pub x_axis: XAxisMode,
}

/// Status line severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub players: Vec<String>,
    pub status: String,
    pub status_kind: StatusKind,
    pub warnings: Vec<String>,
    pub busy: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            players: Vec::new(),
            status: "Ready".to_string(),
            status_kind: StatusKind::Info,
            warnings: Vec::new(),
            busy: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the player list after an upload; keeps the selection if the
    /// player still exists.
    pub fn update_players(&mut self, players: Vec<String>) {
        if !players.contains(&self.settings.selected_player) {
            self.settings.selected_player = players.first().cloned().unwrap_or_default();
        }
        self.players = players;
    }

    /// Forget the previous upload's players and warnings. The selected
    /// player is kept so it survives a re-upload of the same data.
    pub fn clear(&mut self) {
        self.players.clear();
        self.warnings.clear();
    }

    pub fn set_status(&mut self, kind: StatusKind, status: &str) {
        self.status_kind = kind;
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 Rating Progression")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Match Results").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.busy, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseCsv;
                            }
                        });
                    });
                });
            });

        ui.add_space(4.0);
        ui.label(
            RichText::new("Columns: player1, player2, date, rating p1, rating p2")
                .size(10.0)
                .color(Color32::GRAY),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Player Section =====
        ui.label(RichText::new("👤 Player").size(14.0).strong());
        ui.add_space(5.0);

        ui.add_enabled_ui(!self.players.is_empty(), |ui| {
            ComboBox::from_id_salt("selected_player")
                .width(220.0)
                .selected_text(&self.settings.selected_player)
                .show_ui(ui, |ui| {
                    for player in &self.players {
                        if ui
                            .selectable_label(self.settings.selected_player == *player, player)
                            .clicked()
                        {
                            self.settings.selected_player = player.clone();
                            action = ControlPanelAction::PlayerChanged;
                        }
                    }
                });

            ui.add_space(5.0);
            ui.checkbox(&mut self.settings.overlay_all, "Overlay all players");

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.radio_value(&mut self.settings.x_axis, XAxisMode::Date, "By Date");
                ui.radio_value(
                    &mut self.settings.x_axis,
                    XAxisMode::MatchSequence,
                    "By Match",
                );
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        if self.busy {
            ui.add(egui::Spinner::new());
        }

        let status_color = match self.status_kind {
            StatusKind::Error => Color32::from_rgb(220, 53, 69),
            StatusKind::Success => Color32::from_rgb(40, 167, 69),
            StatusKind::Info => Color32::GRAY,
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        for warning in &self.warnings {
            ui.label(
                RichText::new(format!("⚠ {}", warning))
                    .size(11.0)
                    .color(Color32::from_rgb(243, 156, 18)),
            );
        }

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    PlayerChanged,
}
