use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the config file looked up in the content root.
pub const CONFIG_FILE_NAME: &str = "pyq.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Site settings, read from `pyq.toml`.
///
/// ```toml
/// site_title = "WBSC PYQ Diploma Project"
/// theme = "minimal"
/// expand_questions = false
///
/// [subject_names]
/// power-engineering = "Power Engineering"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_title: String,
    pub theme: String,
    /// Render question cards expanded instead of collapsed.
    pub expand_questions: bool,
    /// Display names keyed by subject slug.
    pub subject_names: HashMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "WBSC PYQ Diploma Project".to_string(),
            theme: "minimal".to_string(),
            expand_questions: false,
            subject_names: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load from file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.theme, "minimal");
        assert!(!config.expand_questions);
        assert!(config.subject_names.is_empty());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "site_title = \"Exam Prep\"\n\n[subject_names]\npower-engineering = \"Power Engg.\"\n",
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.site_title, "Exam Prep");
        assert_eq!(config.theme, "minimal");
        assert_eq!(
            config.subject_names.get("power-engineering").map(String::as_str),
            Some("Power Engg.")
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "site_title = [").unwrap();
        assert!(matches!(SiteConfig::load(&path), Err(ConfigError::Parse(_))));
    }
}
