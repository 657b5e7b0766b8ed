use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::profile::Profile;

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8787/chatbot";
pub const RELAY_URL_ENV: &str = "PORTFOLIO_RELAY_URL";
pub const RELAY_TOKEN_ENV: &str = "PORTFOLIO_RELAY_TOKEN";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub relay_url: Option<String>,
    pub relay_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Relay endpoint: env var first, then config file, then the local default.
    pub fn resolve_relay_url(&self) -> String {
        std::env::var(RELAY_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.relay_url.clone())
            .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string())
    }

    pub fn resolve_relay_token(&self) -> Option<String> {
        std::env::var(RELAY_TOKEN_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.relay_token.clone())
    }

    pub fn profile(&self) -> Profile {
        self.profile.clone().unwrap_or_default()
    }

    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("portfolio-terminal"))
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.profile(), Profile::default());
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            relay_url: Some("https://relay.example/chatbot".to_string()),
            relay_token: Some("anon".to_string()),
            profile: Some(Profile {
                handle: "someone".to_string(),
                ..Profile::default()
            }),
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.profile().handle, "someone");
    }

    #[test]
    fn partial_profile_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"relay_url":null,"relay_token":null,"profile":{"age":21}}"#).unwrap();

        let profile = Config::load_from(&path).unwrap().profile();
        assert_eq!(profile.age, 21);
        assert_eq!(profile.discord_username, "arcticayl");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
