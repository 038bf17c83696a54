//! Board configuration.
//!
//! Every field has a default, so a config file only lists what it overrides:
//!
//! ```json
//! { "activation_distance": 8.0, "verify_invariants": true }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default pointer travel (px) before a press becomes a drag.
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Pointer travel (px, Euclidean) required to start a drag.
    pub activation_distance: f64,
    /// Shown when the column load fails without a message of its own.
    pub columns_load_error: String,
    /// Shown when the task load fails without a message of its own.
    pub tasks_load_error: String,
    /// Check the board invariants after every store commit.
    pub verify_invariants: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
            columns_load_error: "Failed to load the column list.".to_string(),
            tasks_load_error: "Failed to load the task list.".to_string(),
            verify_invariants: cfg!(debug_assertions),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl BoardConfig {
    /// Load overrides from a JSON file.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.activation_distance.is_finite() || self.activation_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "activation_distance must be a non-negative number, got {}",
                self.activation_distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn missing_fields_keep_defaults() {
        let config = BoardConfig::from_json_str(r#"{ "activation_distance": 8.0 }"#).unwrap();

        assert_eq!(config.activation_distance, 8.0);
        assert_eq!(config.columns_load_error, BoardConfig::default().columns_load_error);
        assert_eq!(config.tasks_load_error, "Failed to load the task list.");
    }

    #[rstest]
    #[case::negative(r#"{ "activation_distance": -1.0 }"#)]
    #[case::wrong_type(r#"{ "verify_invariants": "yes" }"#)]
    #[case::not_json("activation_distance = 5")]
    fn bad_config_is_refused(#[case] raw: &str) {
        assert!(BoardConfig::from_json_str(raw).is_err());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "verify_invariants": true, "columns_load_error": "nope" }}"#).unwrap();

        let config = BoardConfig::from_json_file(file.path()).await.unwrap();

        assert!(config.verify_invariants);
        assert_eq!(config.columns_load_error, "nope");
        assert_eq!(config.activation_distance, DEFAULT_ACTIVATION_DISTANCE);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BoardConfig::from_json_file(dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
