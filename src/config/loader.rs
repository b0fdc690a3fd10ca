use super::SdkConfig;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl SdkConfig {
    /// Load `~/.cartolink/config.toml`, falling back to defaults when the
    /// file does not exist. Environment overrides are applied afterwards.
    pub fn load_or_default() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let config_path = home.join(".cartolink").join("config.toml");

        let config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            Self {
                config_path,
                ..Self::default()
            }
        };
        config.resolve()
    }

    /// Load an explicit config file, apply environment overrides, validate.
    pub fn load_with_overrides(path: &Path) -> Result<Self> {
        Self::load_from_path(path)?.resolve()
    }

    /// Parse `path` as-is. Validation is left to the caller because
    /// environment overrides may still replace invalid values.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::Io)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: SdkConfig = toml::from_str(&contents)
            .map_err(|e| ConfigError::Load(e.to_string()))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    fn resolve(mut self) -> Result<Self> {
        self.apply_env_overrides();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        url::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::Validation(format!("api_url {:?}: {e}", self.api_url)))?;
        url::Url::parse(&self.telemetry.events_url).map_err(|e| {
            ConfigError::Validation(format!(
                "telemetry.events_url {:?}: {e}",
                self.telemetry.events_url
            ))
        })?;
        if self.first_party_scheme.is_empty()
            || !self
                .first_party_scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "first_party_scheme {:?} must be a non-empty word",
                self.first_party_scheme
            )));
        }
        Ok(())
    }
}
