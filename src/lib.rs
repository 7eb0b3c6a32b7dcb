//! MBTI Atlas
//!
//! Loads a country-by-type MBTI distribution table from CSV and serves it
//! through an egui dashboard: rankings per type, country profiles,
//! temperament group cards and a short quiz.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod quiz;
pub mod stats;

pub use config::{ConfigError, DashboardConfig};
pub use data::{load, CountryTable, DatasetCache, LoaderError};
pub use gui::MbtiAtlasApp;
