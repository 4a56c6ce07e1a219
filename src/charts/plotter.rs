//! Chart Plotter Module
//! Draws rating progression lines and summary tables using egui_plot.

use crate::data::SeriesPoint;
use crate::stats::{LeaderboardRow, PlayerStats};
use chrono::{Datelike, NaiveDate};
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

const POSITIVE_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const NEGATIVE_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// What the x-axis measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XAxisMode {
    /// Calendar date of the match
    #[default]
    Date,
    /// Position of the match in the player's history
    MatchSequence,
}

/// One player's line on the chart.
pub struct RatingLine<'a> {
    pub player: &'a str,
    pub points: &'a [SeriesPoint],
    pub color: Color32,
}

/// Draws rating charts and tables.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Colour for the player at `index` in the sorted player list.
    pub fn player_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Plot x coordinate for a date (days since 0001-01-01).
    pub fn date_to_x(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    /// Axis label for an x coordinate produced by [`Self::date_to_x`].
    pub fn format_axis_date(value: f64) -> String {
        NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Convert a series into plot coordinates.
    pub fn plot_points(points: &[SeriesPoint], mode: XAxisMode) -> Vec<[f64; 2]> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let x = match mode {
                    XAxisMode::Date => Self::date_to_x(p.date),
                    XAxisMode::MatchSequence => (i + 1) as f64,
                };
                [x, p.rating]
            })
            .collect()
    }

    /// Hover text for the point of `player` nearest to (`x`, `y`).
    pub fn hover_text(lines: &[HoverSeries], player: &str, x: f64, y: f64) -> String {
        let nearest = lines
            .iter()
            .filter(|line| line.player == player)
            .flat_map(|line| line.points.iter())
            .min_by(|a, b| {
                let da = (a.0 - x).powi(2) + (a.1 - y).powi(2);
                let db = (b.0 - x).powi(2) + (b.1 - y).powi(2);
                da.total_cmp(&db)
            });

        match nearest {
            Some((_, rating, date, opponent)) => format!(
                "{}\nDate: {}\nRating: {:.1}\nOpponent: {}",
                player, date, rating, opponent
            ),
            None => format!("{:.1}", y),
        }
    }

    /// Draw the rating progression chart.
    pub fn draw_rating_chart(
        ui: &mut egui::Ui,
        id: &str,
        lines: &[RatingLine<'_>],
        mode: XAxisMode,
        height: f32,
    ) {
        let hover: Vec<HoverSeries> = lines
            .iter()
            .map(|line| HoverSeries::new(line.player, line.points, mode))
            .collect();

        let x_label = match mode {
            XAxisMode::Date => "Date",
            XAxisMode::MatchSequence => "Match Sequence",
        };

        Plot::new(id)
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label("Rating")
            .x_axis_formatter(move |mark, _range| match mode {
                XAxisMode::Date => Self::format_axis_date(mark.value),
                XAxisMode::MatchSequence => format!("{:.0}", mark.value),
            })
            .label_formatter(move |name, value| {
                if name.is_empty() {
                    format!("{:.1}", value.y)
                } else {
                    Self::hover_text(&hover, name, value.x, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for line in lines {
                    let coords = Self::plot_points(line.points, mode);

                    let line_points: PlotPoints = coords.iter().copied().collect();
                    plot_ui.line(
                        Line::new(line_points)
                            .color(line.color)
                            .width(2.5)
                            .name(line.player),
                    );

                    let markers: PlotPoints = coords.into_iter().collect();
                    plot_ui.points(
                        Points::new(markers)
                            .radius(4.0)
                            .color(line.color)
                            .name(line.player),
                    );
                }
            });
    }

    fn change_text(change: f64) -> RichText {
        let color = if change > 0.0 {
            POSITIVE_COLOR
        } else if change < 0.0 {
            NEGATIVE_COLOR
        } else {
            Color32::GRAY
        };
        RichText::new(format!("{:+.1}", change)).size(12.0).color(color)
    }

    /// Draw the statistics grid for one player.
    pub fn draw_stats_table(ui: &mut egui::Ui, player: &str, stats: &PlayerStats) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("stats_table_{}", player)))
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "First Rating",
                            "Latest Rating",
                            "Matches",
                            "Change",
                            "Peak",
                            "Mean",
                            "Std",
                        ] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        ui.label(RichText::new(format!("{:.1}", stats.first_rating)).size(12.0))
                            .on_hover_text(format!("Rating on {}", stats.first_date));
                        ui.label(RichText::new(format!("{:.1}", stats.latest_rating)).size(12.0))
                            .on_hover_text(format!("Rating on {}", stats.latest_date));
                        ui.label(RichText::new(stats.num_matches.to_string()).size(12.0));
                        ui.label(Self::change_text(stats.rating_change));
                        ui.label(RichText::new(format!("{:.1}", stats.peak_rating)).size(12.0));
                        ui.label(RichText::new(format!("{:.1}", stats.mean_rating)).size(12.0));
                        ui.label(RichText::new(format!("{:.1}", stats.rating_std)).size(12.0));
                        ui.end_row();
                    });

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!(
                        "Period: {} to {}",
                        stats.first_date.format("%B %d, %Y"),
                        stats.latest_date.format("%B %d, %Y")
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );
            });
    }

    /// Draw the recent matches table, newest first.
    pub fn draw_recent_matches(ui: &mut egui::Ui, player: &str, recent: &[&SeriesPoint]) {
        egui::Grid::new(ui.make_persistent_id(format!("recent_{}", player)))
            .striped(true)
            .min_col_width(70.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                for header in ["Row", "Date", "Rating", "Opponent"] {
                    ui.label(RichText::new(header).strong().size(11.0));
                }
                ui.end_row();

                for point in recent {
                    ui.label(RichText::new(point.row.to_string()).size(11.0));
                    ui.label(RichText::new(point.date.format("%Y-%m-%d").to_string()).size(11.0));
                    ui.label(RichText::new(format!("{:.1}", point.rating)).size(11.0));
                    ui.label(RichText::new(&point.opponent).size(11.0));
                    ui.end_row();
                }
            });
    }

    /// Draw the leaderboard table.
    pub fn draw_leaderboard(ui: &mut egui::Ui, rows: &[LeaderboardRow]) {
        egui::Grid::new(ui.make_persistent_id("leaderboard"))
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                for header in ["Rank", "Player", "Rating", "Matches", "Change"] {
                    ui.label(RichText::new(header).strong().size(11.0));
                }
                ui.end_row();

                for row in rows {
                    ui.label(RichText::new(row.rank.to_string()).size(11.0));
                    ui.label(RichText::new(&row.player).size(11.0));
                    ui.label(RichText::new(format!("{:.1}", row.last_rating)).size(11.0));
                    ui.label(RichText::new(row.matches_played.to_string()).size(11.0));
                    if row.is_new {
                        ui.label(RichText::new("New").size(11.0).color(PALETTE[0]));
                    } else {
                        ui.label(Self::change_text(row.rating_change));
                    }
                    ui.end_row();
                }
            });
    }
}

/// Owned copy of a line's points for the hover formatter.
pub struct HoverSeries {
    pub player: String,
    /// (x, rating, date, opponent)
    pub points: Vec<(f64, f64, NaiveDate, String)>,
}

impl HoverSeries {
    pub fn new(player: &str, points: &[SeriesPoint], mode: XAxisMode) -> Self {
        let coords = ChartPlotter::plot_points(points, mode);
        Self {
            player: player.to_string(),
            points: coords
                .iter()
                .zip(points)
                .map(|(xy, p)| (xy[0], p.rating, p.date, p.opponent.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(d: &str, rating: f64, opponent: &str) -> SeriesPoint {
        SeriesPoint {
            date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
            rating,
            opponent: opponent.to_string(),
            row: 1,
        }
    }

    #[test]
    fn axis_dates_round_trip_through_x() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 14).unwrap();
        let x = ChartPlotter::date_to_x(date);
        assert_eq!(ChartPlotter::format_axis_date(x), "2023-07-14");
        assert_eq!(ChartPlotter::format_axis_date(x + 0.4), "2023-07-14");
    }

    #[test]
    fn sequence_mode_numbers_matches_from_one() {
        let points = vec![
            point("2023-01-01", 1500.0, "B"),
            point("2023-01-01", 1510.0, "C"),
            point("2023-02-01", 1520.0, "B"),
        ];
        let coords = ChartPlotter::plot_points(&points, XAxisMode::MatchSequence);
        assert_eq!(coords, vec![[1.0, 1500.0], [2.0, 1510.0], [3.0, 1520.0]]);

        let by_date = ChartPlotter::plot_points(&points, XAxisMode::Date);
        assert_eq!(by_date[0][0], by_date[1][0]);
        assert!(by_date[2][0] > by_date[1][0]);
    }

    #[test]
    fn hover_names_the_opponent() {
        let points = vec![point("2023-01-01", 1500.0, "Bob"), point("2023-01-02", 1510.0, "Cy")];
        let hover = vec![HoverSeries::new("Ann", &points, XAxisMode::MatchSequence)];

        let text = ChartPlotter::hover_text(&hover, "Ann", 2.1, 1509.0);
        assert!(text.contains("Opponent: Cy"));
        assert!(text.contains("Date: 2023-01-02"));

        assert_eq!(ChartPlotter::hover_text(&hover, "Nobody", 1.0, 1500.0), "1500.0");
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(ChartPlotter::player_color(0), ChartPlotter::player_color(PALETTE.len()));
    }
}
