//! Error handling for ResQTrack
//!
//! This module defines the main error type used throughout the client
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Fallback message used when an error response carries neither `error` nor `message`
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Main error type for the ResQTrack client
#[derive(Error, Debug)]
pub enum ResQError {
    /// The transport could not complete the exchange (connection, DNS, timeout)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a status outside 2xx
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        body: serde_json::Value,
    },

    #[error("Admin not authenticated")]
    NotAuthenticated,

    #[error("Authentication error: {0}")]
    Authentication(String),

    /// A local check failed before any request was issued
    #[error("{0}")]
    Precondition(String),

    #[error("Action already in progress: {0}")]
    Busy(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for ResQTrack operations
pub type Result<T> = std::result::Result<T, ResQError>;

impl From<config::ConfigError> for ResQError {
    fn from(err: config::ConfigError) -> Self {
        ResQError::Config(err.to_string())
    }
}

impl ResQError {
    /// Build an API error from a status code and the parsed response body.
    ///
    /// The message is the body's `error` field, then its `message` field,
    /// then [`GENERIC_FAILURE_MESSAGE`].
    pub fn from_response(status: u16, body: serde_json::Value) -> Self {
        let message = extract_message(&body, "error")
            .or_else(|| extract_message(&body, "message"))
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());

        ResQError::Api { status, message, body }
    }

    /// HTTP status attached to the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ResQError::Api { status, .. } => Some(*status),
            ResQError::Network(e) | ResQError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for a user-facing notification
    pub fn user_message(&self) -> String {
        match self {
            ResQError::Api { message, .. } => message.clone(),
            ResQError::Network(_) => "Network error: unable to reach the server".to_string(),
            other => other.to_string(),
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ResQError::Network(_) => true,
            ResQError::Api { status, .. } => *status >= 500 || *status == 429,
            ResQError::NotAuthenticated => false,
            ResQError::Authentication(_) => false,
            ResQError::Precondition(_) => true,
            ResQError::Busy(_) => true,
            ResQError::Config(_) => false,
            ResQError::Http(_) => true,
            ResQError::Serialization(_) => false,
            ResQError::Io(_) => true,
            ResQError::UrlParse(_) => false,
            ResQError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ResQError::Config(_) => ErrorSeverity::Critical,
            ResQError::NotAuthenticated => ErrorSeverity::Warning,
            ResQError::Authentication(_) => ErrorSeverity::Warning,
            ResQError::Busy(_) => ErrorSeverity::Warning,
            ResQError::Precondition(_) => ErrorSeverity::Info,
            ResQError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

fn extract_message(body: &serde_json::Value, field: &str) -> Option<String> {
    match body.get(field)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
