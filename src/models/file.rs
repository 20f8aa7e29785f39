//! Uploaded file model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Modification time, seconds since the epoch
    pub modified: f64,
}

/// Response of the uploaded files listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilesResponse {
    pub files: Vec<UploadedFile>,
}
