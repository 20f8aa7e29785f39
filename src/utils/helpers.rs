//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the client.

use chrono::{DateTime, Utc};

/// Convert bytes to a human readable size ("0 Bytes", "1.5 KB", "2.25 MB")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    // two decimals, trailing zeros trimmed
    let rounded = format!("{:.2}", size);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit_index])
}

/// Format a modification time given in seconds since the epoch as a date
pub fn format_modified_date(seconds: f64) -> String {
    let millis = (seconds * 1000.0) as i64;
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(timestamp) => timestamp.format("%Y-%m-%d").to_string(),
        None => "unknown".to_string(),
    }
}

/// Reconcile a caller-supplied path with the configured API prefix.
///
/// A leading prefix is stripped and a leading `/` enforced, so `"/api/data/stats"`,
/// `"/data/stats"` and `"data/stats"` all normalize to `"/data/stats"`.
pub fn normalize_path(path: &str, prefix: &str) -> String {
    let trimmed_prefix = prefix.trim_end_matches('/');
    let mut normalized = path;

    if !trimmed_prefix.is_empty() {
        if let Some(rest) = normalized.strip_prefix(trimmed_prefix) {
            if rest.is_empty() || rest.starts_with('/') {
                normalized = rest;
            }
        }
    }

    if normalized.starts_with('/') {
        normalized.to_string()
    } else {
        format!("/{}", normalized)
    }
}

/// Percent-encode a value used as a single path segment
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Lowercased extension of a file name, without the dot
pub fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
