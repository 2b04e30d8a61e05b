use crate::config::Config;
use crate::error::AppError;
use std::net::SocketAddr;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Source URL must be a non-empty http(s) URL
/// - At least one non-empty league must be configured
/// - Days to show and cache TTL must be positive
/// - Bind address must parse as `host:port`
/// - If log file path is provided, it cannot be empty and its parent directory must be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.source_url.is_empty() {
        return Err(AppError::config_error("Source URL cannot be empty"));
    }

    if !config.source_url.starts_with("http://") && !config.source_url.starts_with("https://") {
        return Err(AppError::config_error(
            "Source URL must start with http:// or https://",
        ));
    }

    if config.leagues.iter().all(|league| league.trim().is_empty()) {
        return Err(AppError::config_error(
            "At least one league must be configured",
        ));
    }

    if config.days_to_show == 0 {
        return Err(AppError::config_error("Days to show must be at least 1"));
    }

    if config.cache_ttl_hours == 0 {
        return Err(AppError::config_error("Cache TTL must be at least 1 hour"));
    }

    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        AppError::config_error(format!(
            "Invalid bind address '{}': {e}",
            config.bind_address
        ))
    })?;

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configs_are_rejected() {
        let invalid_configs = vec![
            Config {
                source_url: String::new(),
                ..Config::default()
            },
            Config {
                source_url: "ftp://www.tvmatchen.nu/".to_string(),
                ..Config::default()
            },
            Config {
                leagues: vec![],
                ..Config::default()
            },
            Config {
                leagues: vec!["  ".to_string()],
                ..Config::default()
            },
            Config {
                days_to_show: 0,
                ..Config::default()
            },
            Config {
                cache_ttl_hours: 0,
                ..Config::default()
            },
            Config {
                bind_address: "localhost".to_string(),
                ..Config::default()
            },
            Config {
                log_file_path: Some(String::new()),
                ..Config::default()
            },
        ];

        for config in invalid_configs {
            assert!(
                validate_config(&config).is_err(),
                "Config should be invalid: {config:?}"
            );
        }
    }

    #[test]
    fn test_log_directory_is_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("logs").join("fotboll_tv.log");
        let config = Config {
            log_file_path: Some(log_path.to_string_lossy().to_string()),
            ..Config::default()
        };

        assert!(validate_config(&config).is_ok());
        assert!(temp_dir.path().join("logs").exists());
    }
}
