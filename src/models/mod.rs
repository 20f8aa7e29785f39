//! Data models module
//!
//! Transient DTOs exchanged with the ResQTrack API

pub mod auth;
pub mod file;
pub mod import;
pub mod service;
pub mod statistics;

// Re-export commonly used models
pub use auth::{Credentials, LoginResponse};
pub use file::{FilesResponse, UploadedFile};
pub use import::{ExportResponse, ImportResponse, ImportStats};
pub use service::{ContactsResponse, EmergencyService};
pub use statistics::{ContactCounts, LocationDistribution, MembershipCounts, ServiceCounts, Statistics, StatisticsResponse};
