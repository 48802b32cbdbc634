use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::error::EstimateError;
use crate::gemini;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub model: Option<String>,
}

impl Config {
    /// Load from the config file, falling back to defaults when it does not
    /// exist yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the Gemini credential: the GEMINI_API_KEY environment
    /// variable wins, then the config file. Absence is fatal at startup.
    pub fn resolve_api_key(&self) -> Result<String, EstimateError> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.gemini_api_key.clone())
            .ok_or_else(|| {
                EstimateError::Configuration(
                    "set GEMINI_API_KEY or add gemini_api_key to config.json".to_string(),
                )
            })
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(gemini::DEFAULT_MODEL)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("remodel").join("config.json"))
    }

    /// Diagnostics land in a file next to the config so they never write
    /// over the alternate-screen TUI.
    pub fn log_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("remodel").join("remodel.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.model(), gemini::DEFAULT_MODEL);
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"gemini_api_key": "test-key", "model": "gemini-2.5-pro"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("test-key"));
        assert_eq!(config.model(), "gemini-2.5-pro");
    }

    #[test]
    fn config_key_used_when_env_var_unset() {
        let config = Config {
            gemini_api_key: Some("from-config".to_string()),
            model: None,
        };
        // The ambient environment may carry the env var; only assert the
        // config-file fallback when it does not.
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert_eq!(config.resolve_api_key().unwrap(), "from-config");

            let empty = Config::default();
            assert!(matches!(
                empty.resolve_api_key(),
                Err(EstimateError::Configuration(_))
            ));
        }
    }
}
