//! Reframe configuration.
//!
//! Loaded from `~/.reframe/config.toml`. A missing file means defaults.
//! `REFRAME_ENDPOINT` and `REFRAME_MODEL` override the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::prompts;

/// Reframe configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Base URL of the coaching service.
    pub endpoint: String,

    /// Training identifier sent with every chat request.
    pub training_id: String,

    /// Model name to request. The service picks one when unset.
    pub model: Option<String>,

    /// Per-request timeout.
    pub timeout_secs: u64,

    /// Replaces the built-in system prompt.
    pub system_prompt: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            training_id: "ia-4-2".to_string(),
            model: None,
            timeout_secs: 60,
            system_prompt: None,
        }
    }
}

impl Config {
    /// Load config from `~/.reframe/config.toml`, then apply environment
    /// overrides.
    pub fn load() -> Result<Self, String> {
        let path = Self::path().ok_or("could not determine home directory")?;
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        if config.endpoint.trim().is_empty() {
            return Err(format!("endpoint is empty in {}", path.display()));
        }

        Ok(config)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = var("REFRAME_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(model) = var("REFRAME_MODEL").filter(|v| !v.trim().is_empty()) {
            self.model = Some(model);
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured system prompt, or the built-in one.
    pub fn system_prompt(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(prompts::SYSTEM_PROMPT)
    }

    /// The config file path: `~/.reframe/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".reframe").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.system_prompt(), prompts::SYSTEM_PROMPT);
    }

    #[test]
    fn reads_kebab_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "endpoint = \"https://coach.example\"\n\
             training-id = \"ia-9\"\n\
             timeout-secs = 5\n\
             system-prompt = \"Be brief.\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.endpoint, "https://coach.example");
        assert_eq!(config.training_id, "ia-9");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.system_prompt(), "Be brief.");
        assert_eq!(config.model, None);
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout-secs = \"soon\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.contains("invalid config at"));
        assert!(err.contains("config.toml"));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "REFRAME_ENDPOINT" => Some("http://override:9000".to_string()),
            "REFRAME_MODEL" => Some("large".to_string()),
            _ => None,
        });
        assert_eq!(config.endpoint, "http://override:9000");
        assert_eq!(config.model.as_deref(), Some("large"));
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }
}
