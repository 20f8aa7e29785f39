//! ResQTrack client
//!
//! Client-side library for the ResQTrack animal-rescue coordination platform.
//! Provides a request client for the REST API, a typed facade over every
//! endpoint, admin session handling, and a headless data management
//! dashboard built on pluggable UI primitives.

pub mod config;
pub mod dashboard;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ResQError, Result};

// Re-export main components for easy access
pub use dashboard::{DashboardEvent, DataDashboard};
pub use services::{RequestClient, ResQApi, ServiceFactory, SessionManager};
pub use ui::UiHooks;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
