//! Dashboard configuration, read from an optional JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Rows on the top-types page.
    pub top_types_k: usize,
    /// Rows on the similar-countries page.
    pub similar_countries_k: usize,
    /// Cards per temperament group.
    pub group_cards_k: usize,
    /// Countries recommended after the quiz.
    pub quiz_k: usize,
    pub preview_rows: usize,
    pub default_country: String,
    pub default_type: String,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("countriesMBTI_16types.csv"),
            top_types_k: 10,
            similar_countries_k: 7,
            group_cards_k: 10,
            quiz_k: 5,
            preview_rows: 5,
            default_country: "Korea, Republic of".to_string(),
            default_type: "ENFP".to_string(),
            export_width: 1200,
            export_height: 800,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(r#"{"quizK": 3, "defaultType": "INTJ"}"#).unwrap();
        assert_eq!(config.quiz_k, 3);
        assert_eq!(config.default_type, "INTJ");
        assert_eq!(config.top_types_k, 10);
        assert_eq!(config.similar_countries_k, 7);
        assert_eq!(config.data_path, PathBuf::from("countriesMBTI_16types.csv"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            DashboardConfig::from_json("{quizK: 3"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"dataPath": "data/mbti.csv", "groupCardsK": 4}}"#).unwrap();
        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/mbti.csv"));
        assert_eq!(config.group_cards_k, 4);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DashboardConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
