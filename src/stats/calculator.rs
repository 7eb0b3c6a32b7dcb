//! Statistics Calculator Module
//! Per-type descriptive statistics across countries.

use crate::data::CountryTable;
use rayon::prelude::*;
use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Distribution of one type column across all countries.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Country holding `max`; alphabetically first on ties.
    pub leader: String,
}

impl ColumnSummary {
    fn empty(column: &str) -> Self {
        Self {
            column: column.to_string(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            leader: String::new(),
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize one column of values keyed by `countries`.
    pub fn summarize(column: &str, countries: &[String], values: &[f64]) -> ColumnSummary {
        if values.is_empty() {
            return ColumnSummary::empty(column);
        }

        let mean = values.iter().mean();
        // Sample standard deviation; undefined for a single value.
        let std_dev = if values.len() > 1 {
            values.iter().std_dev()
        } else {
            0.0
        };
        let min = Statistics::min(values.iter());
        let max = Statistics::max(values.iter());

        let mut data = Data::new(values.to_vec());
        let median = data.median();

        let leader = countries
            .iter()
            .zip(values)
            .filter(|(_, v)| **v == max)
            .map(|(c, _)| c)
            .min_by(|a, b| a.cmp(b))
            .cloned()
            .unwrap_or_default();

        ColumnSummary {
            column: column.to_string(),
            count: values.len(),
            mean,
            median,
            std_dev,
            min,
            max,
            leader,
        }
    }

    /// Summaries for every type column, computed in parallel, in column order.
    pub fn summarize_columns(table: &CountryTable) -> Vec<ColumnSummary> {
        table
            .type_columns()
            .par_iter()
            .map(|column| match table.ratios(column) {
                Ok(values) => Self::summarize(column, table.countries(), &values),
                Err(_) => ColumnSummary::empty(column),
            })
            .collect()
    }
}
