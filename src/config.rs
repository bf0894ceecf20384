//! Configuration management for NovaBites
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{API_BASE_URL_ENV, CONFIG_GENERATED, DEFAULT_API_BASE_URL, DEFAULT_ITEMS_PER_PAGE};
use crate::utils::datetime;
use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub display: DisplayConfig,
    pub session: SessionConfig,
    pub downloads: DownloadsConfig,
    pub logging: LoggingConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the NovaBites backend
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable mouse support
    pub mouse_enabled: bool,
    /// Rows per page in paginated tables
    pub items_per_page: usize,
    /// How long toasts stay on screen
    pub toast_seconds: u64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Business timezone offset from UTC, in hours
    pub utc_offset_hours: i32,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Interval between token expiry checks
    pub check_interval_secs: u64,
    /// Where the bearer token is kept between runs
    pub token_file: Option<PathBuf>,
}

/// Download configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DownloadsConfig {
    /// Directory for generated bill PDFs
    pub directory: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable the log file
    pub enabled: bool,
    /// Minimum level written to the log file
    pub level: String,
    /// Log file location, defaulting to the data directory
    pub file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: false,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            toast_seconds: 3,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: datetime::APP_UTC_OFFSET_HOURS,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 30,
            token_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl ApiConfig {
    /// Base URL after applying the environment override
    pub fn effective_base_url(&self) -> String {
        match std::env::var(API_BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.base_url.clone(),
        }
    }
}

impl DisplayConfig {
    pub fn timezone(&self) -> FixedOffset {
        datetime::app_timezone(self.utc_offset_hours)
    }
}

impl SessionConfig {
    /// Token file location, defaulting to the data directory
    pub fn token_path(&self) -> Option<PathBuf> {
        self.token_file
            .clone()
            .or_else(|| Config::get_data_dir().ok().map(|dir| dir.join("session.token")))
    }
}

impl DownloadsConfig {
    /// Download directory, falling back to the user's downloads folder
    pub fn resolve_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("novabites.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("novabites").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!("base_url must start with http:// or https://, got '{}'", self.api.base_url);
        }

        if self.api.timeout_secs == 0 || self.api.timeout_secs > 300 {
            anyhow::bail!("timeout_secs must be between 1 and 300, got {}", self.api.timeout_secs);
        }

        if self.ui.items_per_page == 0 || self.ui.items_per_page > 100 {
            anyhow::bail!("items_per_page must be between 1 and 100, got {}", self.ui.items_per_page);
        }

        if self.ui.toast_seconds == 0 {
            anyhow::bail!("toast_seconds must be at least 1");
        }

        if !(-12..=14).contains(&self.display.utc_offset_hours) {
            anyhow::bail!(
                "utc_offset_hours must be between -12 and 14, got {}",
                self.display.utc_offset_hours
            );
        }

        if self.session.check_interval_secs == 0 || self.session.check_interval_secs > 3600 {
            anyhow::bail!(
                "check_interval_secs must be between 1 and 3600, got {}",
                self.session.check_interval_secs
            );
        }

        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            anyhow::bail!("Invalid logging level '{}'", self.logging.level);
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# NovaBites Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::API_DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("novabites"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }

    /// Directory for the log file and the session token
    pub fn get_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("novabites"))
    }
}
