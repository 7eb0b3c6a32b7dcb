//! Charts module - Chart rendering

mod decor;
mod plotter;
mod renderer;

pub use decor::{badges_for, card_color, medal};
pub use plotter::{profile_series, ranking_series, ChartPlotter, ACCENT, PALETTE};
pub use renderer::{RenderError, StaticChartRenderer};
