//! Import and export results

use serde::{Deserialize, Serialize};

/// Outcome of one bulk CSV ingestion call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    #[serde(default)]
    pub successful: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ImportStats {
    pub fn total(&self) -> u64 {
        self.successful + self.failed + self.skipped
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub stats: ImportStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Absolute, or relative to the API origin
    pub download_url: String,
}
