use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
///
/// Every field has a default, so a missing or partial config file is valid.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Page the schedule is scraped from.
    pub source_url: String,
    /// League name fragments to keep. Matching is case-sensitive substring matching.
    pub leagues: Vec<String>,
    /// Number of day sections taken from the top of the page.
    pub days_to_show: usize,
    /// Hours a scraped schedule is served before the next request refreshes it.
    pub cache_ttl_hours: u64,
    /// HTTP timeout in seconds for fetching the schedule page.
    pub http_timeout_seconds: u64,
    /// Address the HTTP server listens on.
    pub bind_address: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_url: constants::DEFAULT_SOURCE_URL.to_string(),
            leagues: constants::DEFAULT_LEAGUES
                .iter()
                .map(|league| league.to_string())
                .collect(),
            days_to_show: constants::DEFAULT_DAYS_TO_SHOW,
            cache_ttl_hours: constants::DEFAULT_CACHE_TTL_HOURS,
            http_timeout_seconds: constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
            bind_address: constants::DEFAULT_BIND_ADDRESS.to_string(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Falls back to defaults when no config file exists.
    /// Environment variables override config file values.
    ///
    /// # Environment Variables
    /// - `FOTBOLL_TV_SOURCE_URL` - Override the schedule page URL
    /// - `FOTBOLL_TV_LEAGUES` - Comma-separated list of leagues
    /// - `FOTBOLL_TV_CACHE_TTL_HOURS` - Override cache TTL in hours
    /// - `FOTBOLL_TV_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `FOTBOLL_TV_BIND` - Override server bind address
    /// - `FOTBOLL_TV_LOG_FILE` - Override log file path
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded and validated configuration
    /// * `Err(AppError)` - Error occurred during load or validation
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `FOTBOLL_TV_*` environment variables on top of the current values.
    /// Unparseable numeric values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(source_url) = std::env::var(env_vars::SOURCE_URL) {
            self.source_url = source_url;
        }

        if let Ok(leagues) = std::env::var(env_vars::LEAGUES) {
            self.leagues = leagues
                .split(',')
                .map(str::trim)
                .filter(|league| !league.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(ttl) = std::env::var(env_vars::CACHE_TTL_HOURS)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.cache_ttl_hours = ttl;
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Ok(bind_address) = std::env::var(env_vars::BIND_ADDRESS) {
            self.bind_address = bind_address;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Cache TTL as a duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours.saturating_mul(3600))
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if !Path::new(&config_path).exists() {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("(Using defaults)");
        }

        let config = Config::load().await?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("Source URL:");
        println!("{}", config.source_url);
        println!("────────────────────────────────────");
        println!("Leagues:");
        println!("{}", config.leagues.join(", "));
        println!("────────────────────────────────────");
        println!("Days / Cache TTL:");
        println!("{} days, {} hours", config.days_to_show, config.cache_ttl_hours);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Bind Address:");
        println!("{}", config.bind_address);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}", constants::LOG_FILE_NAME);
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without applying environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
