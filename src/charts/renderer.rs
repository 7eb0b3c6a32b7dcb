//! Static Chart Renderer
//! Writes the current bar chart to a PNG file with plotters.
//!
//! Layout: caption on top, one horizontal bar per item (first item on top),
//! category labels on the left, the percent value printed after each bar.

use crate::data::RankedEntry;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart rendering failed: {0}")]
    Plot(String),
    #[error("Nothing to render")]
    Empty,
}

fn plot_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Plot(e.to_string())
}

const BAR_COLOR: RGBColor = RGBColor(76, 154, 255);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Upper end of the value axis: 15% headroom, rounded up to a multiple of 5.
    pub fn x_upper_bound(series: &[(String, f64)]) -> f64 {
        let max = series.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        ((max * 1.15) / 5.0).ceil().max(1.0) * 5.0
    }

    /// Render `(label, percent)` pairs as a PNG at `path`.
    pub fn render_bars_png(
        series: &[(String, f64)],
        title: &str,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if series.is_empty() {
            return Err(RenderError::Empty);
        }

        let n = series.len() as i32;
        let x_max = Self::x_upper_bound(series);
        let label_at = |pos: i32| -> String {
            // Segment 0 is the bottom bar.
            let idx = (n - 1 - pos) as usize;
            series
                .get(idx)
                .map(|(label, _)| label.clone())
                .unwrap_or_default()
        };

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(220)
            .build_cartesian_2d(0f64..x_max, (0..n).into_segmented())
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Share (%)")
            .y_labels(series.len())
            .y_label_formatter(&|v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(pos) => label_at(*pos),
                _ => String::new(),
            })
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(series.iter().enumerate().map(|(i, (_, percent))| {
                let pos = n - 1 - i as i32;
                let mut bar = Rectangle::new(
                    [
                        (0.0, SegmentValue::Exact(pos)),
                        (*percent, SegmentValue::Exact(pos + 1)),
                    ],
                    BAR_COLOR.filled(),
                );
                bar.set_margin(6, 6, 0, 0);
                bar
            }))
            .map_err(plot_err)?;

        chart
            .draw_series(series.iter().enumerate().map(|(i, (_, percent))| {
                let pos = n - 1 - i as i32;
                Text::new(
                    format!(" {:.2}%", percent),
                    (*percent, SegmentValue::CenterOf(pos)),
                    ("sans-serif", 16).into_font(),
                )
            }))
            .map_err(plot_err)?;

        root.present().map_err(plot_err)?;
        log::info!("Exported chart '{}' to {}", title, path.display());
        Ok(())
    }

    pub fn render_ranking_png(
        entries: &[RankedEntry],
        title: &str,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        Self::render_bars_png(&super::ranking_series(entries), title, path, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_upper_bound() {
        assert_eq!(StaticChartRenderer::x_upper_bound(&[]), 5.0);
        assert_eq!(
            StaticChartRenderer::x_upper_bound(&[("Chile".to_string(), 15.0)]),
            20.0
        );
        assert_eq!(
            StaticChartRenderer::x_upper_bound(&[
                ("Chile".to_string(), 2.0),
                ("Peru".to_string(), 40.0)
            ]),
            50.0
        );
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let path = std::env::temp_dir().join("mbti_atlas_empty.png");
        assert!(matches!(
            StaticChartRenderer::render_bars_png(&[], "Empty", &path, (400, 300)),
            Err(RenderError::Empty)
        ));
        assert!(!path.exists());
    }
}
