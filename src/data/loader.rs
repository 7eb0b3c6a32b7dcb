//! CSV Data Loader Module
//! Loads the country/type CSV with Polars and normalizes it into a `CountryTable`.
//!
//! Coercion policy: every type cell goes through [`parse_ratio`]. Cells that do
//! not yield a finite number (empty, missing, text, `NaN`) become `0.0`. This is
//! lossy on purpose; only a file where *no* type cell parses is rejected.

use super::schema::{SchemaError, COUNTRY_COLUMN};
use log::{debug, info, warn};
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Read-only table: one row per country, one ratio column per type.
#[derive(Debug, Clone)]
pub struct CountryTable {
    df: DataFrame,
    countries: Vec<String>,
    type_columns: Vec<String>,
}

impl PartialEq for CountryTable {
    fn eq(&self, other: &Self) -> bool {
        self.countries == other.countries
            && self.type_columns == other.type_columns
            && self.df.equals(&other.df)
    }
}

impl CountryTable {
    /// Build a table from already-clean columns.
    pub fn from_columns(
        countries: Vec<String>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, PolarsError> {
        let mut frame_columns = Vec::with_capacity(columns.len() + 1);
        frame_columns.push(Column::new(COUNTRY_COLUMN.into(), countries.clone()));

        let mut type_columns = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            frame_columns.push(Column::new(name.as_str().into(), values));
            type_columns.push(name);
        }

        Ok(Self {
            df: DataFrame::new(frame_columns)?,
            countries,
            type_columns,
        })
    }

    /// The underlying frame: `Country` followed by the type columns.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Every column except `Country`, in file order.
    pub fn type_columns(&self) -> &[String] {
        &self.type_columns
    }

    pub fn row_count(&self) -> usize {
        self.countries.len()
    }

    pub fn has_type_column(&self, name: &str) -> bool {
        self.type_columns.iter().any(|c| c == name)
    }

    pub fn row_index(&self, country: &str) -> Option<usize> {
        self.countries.iter().position(|c| c == country)
    }

    /// All ratios of one type column, in row order.
    pub fn ratios(&self, column: &str) -> Result<Vec<f64>, SchemaError> {
        if !self.has_type_column(column) {
            return Err(SchemaError::MissingTypeColumn(column.to_string()));
        }
        self.df
            .column(column)
            .and_then(|col| col.f64().map(|ca| ca.into_no_null_iter().collect()))
            .map_err(|_| SchemaError::MissingTypeColumn(column.to_string()))
    }
}

/// Parse one raw cell into a ratio.
///
/// Whitespace is ignored, a trailing `%` divides by 100, and commas are read
/// as a decimal separator when they are the only separator present (a single
/// one) or as thousands separators otherwise. Returns `None` for anything that
/// does not end up as a finite number.
pub fn parse_ratio(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let (body, is_percent) = match cleaned.strip_suffix('%') {
        Some(body) => (body, true),
        None => (cleaned.as_str(), false),
    };
    if body.is_empty() {
        return None;
    }

    let commas = body.matches(',').count();
    let normalized = if commas == 0 {
        body.to_string()
    } else if commas == 1 && !body.contains('.') {
        body.replace(',', ".")
    } else {
        body.replace(',', "")
    };

    let value: f64 = normalized.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if is_percent { value / 100.0 } else { value })
}

fn clean_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_string()
}

/// Turn a raw all-string frame into a `CountryTable`.
pub fn normalize(raw: &DataFrame) -> Result<CountryTable, LoaderError> {
    let headers: Vec<String> = raw
        .get_column_names()
        .iter()
        .map(|name| clean_header(name.as_str()))
        .collect();

    let id_idx = headers
        .iter()
        .position(|h| h == COUNTRY_COLUMN)
        .ok_or_else(|| SchemaError::MissingIdentifier(COUNTRY_COLUMN.to_string()))?;

    let columns = raw.get_columns();
    let id_col = columns[id_idx].cast(&DataType::String)?;

    // Rows without a country name cannot be keyed; drop them.
    let mut keep: Vec<bool> = Vec::with_capacity(raw.height());
    let mut countries: Vec<String> = Vec::with_capacity(raw.height());
    for (row, cell) in id_col.str()?.into_iter().enumerate() {
        match cell.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => {
                keep.push(true);
                countries.push(name.to_string());
            }
            None => {
                warn!("Skipping row {}: empty '{}' cell", row + 1, COUNTRY_COLUMN);
                keep.push(false);
            }
        }
    }

    let mut seen = HashSet::new();
    for name in &countries {
        if !seen.insert(name.as_str()) {
            warn!("Duplicate country '{}' in dataset", name);
        }
    }

    let mut parsed = 0usize;
    let mut zeroed = 0usize;
    let mut type_columns: Vec<(String, Vec<f64>)> = Vec::with_capacity(headers.len());

    for (idx, header) in headers.iter().enumerate() {
        if idx == id_idx {
            continue;
        }

        let as_text = columns[idx].cast(&DataType::String)?;
        let mut values = Vec::with_capacity(countries.len());
        for (cell, &keep_row) in as_text.str()?.into_iter().zip(keep.iter()) {
            if !keep_row {
                continue;
            }
            match cell.and_then(parse_ratio) {
                Some(v) => {
                    parsed += 1;
                    values.push(v);
                }
                None => {
                    zeroed += 1;
                    values.push(0.0);
                }
            }
        }
        type_columns.push((header.clone(), values));
    }

    if parsed == 0 {
        return Err(SchemaError::NoNumericValues.into());
    }
    if zeroed > 0 {
        warn!("{} unparseable type cells were set to 0.0", zeroed);
    }
    debug!(
        "Normalized {} rows x {} type columns ({} cells parsed)",
        countries.len(),
        type_columns.len(),
        parsed
    );

    Ok(CountryTable::from_columns(countries, type_columns)?)
}

/// Load and normalize a CSV file. Reads the file once; no caching.
pub fn load(path: impl AsRef<Path>) -> Result<CountryTable, LoaderError> {
    let path = path.as_ref();
    info!("Loading dataset from {}", path.display());

    // Schema inference disabled: every column arrives as a string and is
    // coerced by `normalize`.
    let raw = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;

    normalize(&raw)
}

/// Explicit per-path memo of loaded tables. Entries live until invalidated.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, Arc<CountryTable>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    /// Return the cached table for `path`, loading it on first use.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<CountryTable>, LoaderError> {
        let key = Self::key(path.as_ref());

        if let Some(table) = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            debug!("Cache hit for {}", key.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load(&key)?);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(entries.entry(key).or_insert(table)))
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        let key = Self::key(path.as_ref());
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key)
            .is_some()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
