//! Stats module - Column summaries

mod calculator;

pub use calculator::{ColumnSummary, StatsCalculator};
