//! Session configuration, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "classifier": { "history_len": 7 }, "mapper": { "glide_rate": 0.2 } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use hand_gesture::ClassifierConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mapper::MapperConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub classifier: ClassifierConfig,
    pub mapper:     MapperConfig,
}

impl SessionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SessionConfig::from_json("{}").unwrap(), SessionConfig::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let c = SessionConfig::from_json(
            r#"{ "classifier": { "history_len": 7 }, "mapper": { "glide_rate": 0.2 } }"#,
        ).unwrap();
        assert_eq!(c.classifier.history_len, 7);
        assert_eq!(c.classifier.acceptance_threshold, 0.7);
        assert_eq!(c.mapper.glide_rate, 0.2);
        assert_eq!(c.mapper.select_radius, 15.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SessionConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn bad_json_is_parse_error() {
        let path = std::env::temp_dir().join(format!("gesture_edit_cfg_{}.json", std::process::id()));
        fs::write(&path, "{ nope").unwrap();
        let err = SessionConfig::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("invalid config"));
    }
}
