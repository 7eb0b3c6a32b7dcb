//! Chart Plotter Module
//! Horizontal bar charts of rankings and country profiles using egui_plot.

use crate::data::{RankedEntry, TypeShare};
use egui::Color32;
use egui_plot::{Bar, BarChart, Plot};

/// Pastel palette, cycled by bar position.
pub const PALETTE: [Color32; 12] = [
    Color32::from_rgb(141, 211, 199),
    Color32::from_rgb(255, 255, 179),
    Color32::from_rgb(190, 186, 218),
    Color32::from_rgb(251, 128, 114),
    Color32::from_rgb(128, 177, 211),
    Color32::from_rgb(253, 180, 98),
    Color32::from_rgb(179, 222, 105),
    Color32::from_rgb(252, 205, 229),
    Color32::from_rgb(217, 217, 217),
    Color32::from_rgb(188, 128, 189),
    Color32::from_rgb(204, 235, 197),
    Color32::from_rgb(255, 237, 111),
];

/// Single-series accent used by the top-types page.
pub const ACCENT: Color32 = Color32::from_rgb(76, 154, 255);

/// Creates bar chart visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color_for(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Axis position of the `index`-th bar so the first item ends up on top.
    pub fn axis_position(index: usize, len: usize) -> f64 {
        (len.saturating_sub(1) - index.min(len.saturating_sub(1))) as f64
    }

    /// Label for an axis mark, empty between bars.
    pub fn axis_label(labels: &[String], value: f64) -> String {
        let rounded = value.round();
        if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        let pos = rounded as usize;
        if pos >= labels.len() {
            return String::new();
        }
        labels[labels.len() - 1 - pos].clone()
    }

    /// Draw `(label, percent)` pairs as horizontal bars, first pair on top.
    pub fn draw_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        series: &[(String, f64)],
        single_color: Option<Color32>,
        height: f32,
    ) {
        let labels: Vec<String> = series.iter().map(|(label, _)| label.clone()).collect();
        let len = series.len();

        let bars: Vec<Bar> = series
            .iter()
            .enumerate()
            .map(|(i, (label, percent))| {
                let color = single_color.unwrap_or_else(|| Self::color_for(i));
                Bar::new(Self::axis_position(i, len), *percent)
                    .name(format!("{} {:.2}%", label, percent))
                    .fill(color)
                    .width(0.7)
            })
            .collect();

        Plot::new(id)
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(0.0)
            .x_axis_label("Share (%)")
            .y_axis_formatter(move |mark, _range| Self::axis_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    pub fn draw_ranking_chart(
        ui: &mut egui::Ui,
        id: &str,
        entries: &[RankedEntry],
        single_color: Option<Color32>,
        height: f32,
    ) {
        Self::draw_bar_chart(ui, id, &ranking_series(entries), single_color, height);
    }

    pub fn draw_profile_chart(ui: &mut egui::Ui, id: &str, shares: &[TypeShare], height: f32) {
        Self::draw_bar_chart(ui, id, &profile_series(shares), None, height);
    }
}

/// `(country, percent)` pairs in rank order.
pub fn ranking_series(entries: &[RankedEntry]) -> Vec<(String, f64)> {
    entries
        .iter()
        .map(|e| (e.country.clone(), e.percent))
        .collect()
}

/// `(code, percent)` pairs in profile order.
pub fn profile_series(shares: &[TypeShare]) -> Vec<(String, f64)> {
    shares.iter().map(|s| (s.code.clone(), s.percent)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_position_puts_first_on_top() {
        assert_eq!(ChartPlotter::axis_position(0, 3), 2.0);
        assert_eq!(ChartPlotter::axis_position(2, 3), 0.0);
        assert_eq!(ChartPlotter::axis_position(0, 0), 0.0);
    }

    #[test]
    fn test_axis_label_matches_position() {
        let labels = vec!["Chile".to_string(), "Peru".to_string(), "Japan".to_string()];
        for i in 0..labels.len() {
            let pos = ChartPlotter::axis_position(i, labels.len());
            assert_eq!(ChartPlotter::axis_label(&labels, pos), labels[i]);
        }
        assert_eq!(ChartPlotter::axis_label(&labels, 0.5), "");
        assert_eq!(ChartPlotter::axis_label(&labels, 3.0), "");
        assert_eq!(ChartPlotter::axis_label(&labels, -1.0), "");
    }

    #[test]
    fn test_series_conversion() {
        let entries = vec![RankedEntry {
            rank: 1,
            country: "Chile".to_string(),
            ratio: 0.125,
            percent: 12.5,
        }];
        assert_eq!(ranking_series(&entries), vec![("Chile".to_string(), 12.5)]);

        let shares = vec![TypeShare {
            code: "INFP".to_string(),
            ratio: 0.2,
            percent: 20.0,
        }];
        assert_eq!(profile_series(&shares), vec![("INFP".to_string(), 20.0)]);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(ChartPlotter::color_for(0), ChartPlotter::color_for(PALETTE.len()));
    }
}
