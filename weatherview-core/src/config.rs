use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::ConfigError, provider::openweather::DEFAULT_BASE_URL};

pub const API_KEY_ENV: &str = "WEATHERVIEW_API_KEY";
pub const BASE_URL_ENV: &str = "WEATHERVIEW_BASE_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Override for the weather endpoint, mostly useful against a mock server.
    pub base_url: Option<String>,
}

/// Everything a provider needs to talk to the weather endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub api_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Platform config directory shared by the config file and the preferences file.
    pub fn config_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherview", "weatherview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().to_path_buf())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Store an endpoint override; an empty string clears it.
    pub fn set_base_url(&mut self, base_url: String) {
        let trimmed = base_url.trim();
        self.base_url = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Resolve the endpoint from the process environment and this config.
    pub fn endpoint(&self) -> Result<Endpoint, ConfigError> {
        self.endpoint_with(|name| std::env::var(name).ok())
    }

    /// Resolve the endpoint with an explicit environment lookup.
    ///
    /// Environment values win over the file. There is no built-in API key: a
    /// missing or blank key is an error.
    pub fn endpoint_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Endpoint, ConfigError> {
        let non_blank = |v: String| {
            let v = v.trim().to_string();
            (!v.is_empty()).then_some(v)
        };

        let api_key = env(API_KEY_ENV)
            .and_then(non_blank)
            .or_else(|| self.api_key.clone().and_then(non_blank))
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = env(BASE_URL_ENV)
            .and_then(non_blank)
            .or_else(|| self.base_url.clone().and_then(non_blank))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Endpoint { api_key, base_url })
    }
}
