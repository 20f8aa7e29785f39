//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{ResQError, Result};
use super::{AdminAuthStrategy, Settings};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_auth_config(&settings.auth)?;
    validate_dashboard_config(&settings.dashboard)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(ResQError::Config(
            "API base URL is required".to_string()
        ));
    }

    let parsed = url::Url::parse(&config.base_url)
        .map_err(|e| ResQError::Config(format!("Invalid API base URL {}: {}", config.base_url, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ResQError::Config(
            format!("API base URL must use http or https, got {}", parsed.scheme())
        ));
    }

    if !config.prefix.is_empty() && !config.prefix.starts_with('/') {
        return Err(ResQError::Config(
            "API prefix must be empty or start with '/'".to_string()
        ));
    }

    if config.timeout_seconds == Some(0) {
        return Err(ResQError::Config(
            "API timeout must be greater than 0 when set".to_string()
        ));
    }

    Ok(())
}

/// Validate admin authentication configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.strategy == AdminAuthStrategy::Credentials {
        let has_email = config.admin_email.as_deref().is_some_and(|e| !e.is_empty());
        let has_password = config.admin_password.as_deref().is_some_and(|p| !p.is_empty());

        if !has_email || !has_password {
            return Err(ResQError::Config(
                "Admin email and password are required for the credentials strategy".to_string()
            ));
        }
    }

    if config.admin_role.is_empty() {
        return Err(ResQError::Config(
            "Admin role is required".to_string()
        ));
    }

    Ok(())
}

/// Validate dashboard configuration
fn validate_dashboard_config(config: &super::DashboardConfig) -> Result<()> {
    if config.top_locations == 0 {
        return Err(ResQError::Config(
            "Top locations must be greater than 0".to_string()
        ));
    }

    if config.max_listed_errors == 0 {
        return Err(ResQError::Config(
            "Max listed import errors must be greater than 0".to_string()
        ));
    }

    if config.accepted_import_extensions.is_empty() {
        return Err(ResQError::Config(
            "At least one accepted import extension is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ResQError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ResQError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "ftp://127.0.0.1".to_string();
        assert_matches!(validate_settings(&settings), Err(ResQError::Config(_)));
    }

    #[test]
    fn test_rejects_relative_prefix() {
        let mut settings = Settings::default();
        settings.api.prefix = "api".to_string();
        assert_matches!(validate_settings(&settings), Err(ResQError::Config(_)));

        settings.api.prefix = String::new();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_credentials_strategy_needs_credentials() {
        let mut settings = Settings::default();
        settings.auth.strategy = AdminAuthStrategy::Credentials;
        assert_matches!(validate_settings(&settings), Err(ResQError::Config(_)));

        settings.auth.admin_email = Some("admin@resqtrack.com".to_string());
        settings.auth.admin_password = Some("admin123".to_string());
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(ResQError::Config(_)));
    }
}
