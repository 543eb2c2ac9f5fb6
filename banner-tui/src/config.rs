use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "banner-tui";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    /// Base URL of the banner document store, e.g. "http://localhost:8080"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Terminal cells per hour on the timeline track.
    #[serde(default = "default_cells_per_hour")]
    pub cells_per_hour: u16,
    /// How far the extend action runs a banner into the next day.
    #[serde(default = "default_extend_minutes")]
    pub extend_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_cells_per_hour() -> u16 {
    4
}

fn default_extend_minutes() -> u32 {
    60
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            cells_per_hour: default_cells_per_hour(),
            extend_minutes: default_extend_minutes(),
            log_file: None,
        }
    }
}

impl BannerConfig {
    fn app_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join(APP_DIR))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.toml"))
    }

    /// Where logs go unless `log_file` overrides it.
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::app_dir()?.join("banner-tui.log")),
        }
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.cells_per_hour = config.cells_per_hour.clamp(1, 8);
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = BannerConfig::parse("api_url = \"https://banners.example\"\n").unwrap();
        assert_eq!(config.api_url, "https://banners.example");
        assert_eq!(config.cells_per_hour, 4);
        assert_eq!(config.extend_minutes, 60);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn zoom_is_clamped() {
        let config = BannerConfig::parse("cells_per_hour = 0\n").unwrap();
        assert_eq!(config.cells_per_hour, 1);
        let config = BannerConfig::parse("cells_per_hour = 60\n").unwrap();
        assert_eq!(config.cells_per_hour, 8);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let raw = toml::to_string_pretty(&BannerConfig::default()).unwrap();
        let config = BannerConfig::parse(&raw).unwrap();
        assert_eq!(config.cells_per_hour, 4);
        assert_eq!(config.extend_minutes, 60);
    }
}
