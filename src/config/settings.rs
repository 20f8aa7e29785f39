//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

/// Whether server cookies travel with subsequent requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialsMode {
    Include,
    Omit,
}

/// ResQTrack API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Origin of the API, without the prefix (`http://127.0.0.1:5000`)
    pub base_url: String,
    /// Path segment every API route lives under (`/api`); may be empty
    pub prefix: String,
    pub credentials: CredentialsMode,
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

/// How the dashboard obtains the admin bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAuthStrategy {
    /// Read a token previously persisted under the fixed key
    StoredToken,
    /// Log in with the configured admin credentials
    Credentials,
}

/// Admin authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub strategy: AdminAuthStrategy,
    pub token_store_path: Option<PathBuf>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub admin_role: String,
}

/// Dashboard behaviour configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    pub top_locations: usize,
    pub max_listed_errors: usize,
    pub accepted_import_extensions: Vec<String>,
    pub export_all_types: Vec<String>,
    pub export_delay_ms: u64,
    pub counter_duration_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stderr only when unset
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from the optional `resqtrack` file and `RESQTRACK__` environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("resqtrack").required(false))
    }

    /// Load settings from an explicit configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("RESQTRACK")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("dashboard.accepted_import_extensions")
                    .with_list_parse_key("dashboard.export_all_types")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ResQError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://127.0.0.1:5000".to_string(),
                prefix: "/api".to_string(),
                credentials: CredentialsMode::Include,
                timeout_seconds: None,
                user_agent: "ResQTrack-Client/0.1".to_string(),
            },
            auth: AuthConfig {
                strategy: AdminAuthStrategy::StoredToken,
                token_store_path: None,
                admin_email: None,
                admin_password: None,
                admin_role: "ADMIN".to_string(),
            },
            dashboard: DashboardConfig {
                top_locations: 10,
                max_listed_errors: 5,
                accepted_import_extensions: vec!["csv".to_string()],
                export_all_types: vec![
                    "ngos".to_string(),
                    "volunteers".to_string(),
                    "hospitals".to_string(),
                ],
                export_delay_ms: 500,
                counter_duration_ms: 1200,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
