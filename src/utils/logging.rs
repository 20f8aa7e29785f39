//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the ResQTrack client.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{ResQError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer when dropped and must be kept
/// alive for the lifetime of the program.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| ResQError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "resqtrack.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| ResQError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log the outcome of an API request
pub fn log_request_outcome(request_id: &str, method: &str, url: &str, status: Option<u16>, success: bool) {
    if success {
        debug!(
            request_id = request_id,
            method = method,
            url = url,
            status = status,
            "API request completed"
        );
    } else {
        warn!(
            request_id = request_id,
            method = method,
            url = url,
            status = status,
            "API request failed"
        );
    }
}

/// Log admin actions
pub fn log_admin_action(action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log a dashboard action that failed at its error boundary
pub fn log_action_failure(action: &str, error: &ResQError) {
    error!(
        action = action,
        error = %error,
        status = error.status(),
        severity = %error.severity(),
        recoverable = error.is_recoverable(),
        "Dashboard action failed"
    );
}
