//! Pure render functions
//!
//! Map API records to view-models. Nothing here touches the surface the
//! dashboard is displayed on, so all rendering logic is unit-testable.

use serde::Serialize;
use crate::models::{EmergencyService, ImportStats, LocationDistribution, Statistics, UploadedFile};
use crate::utils::helpers::{format_file_size, format_modified_date};

/// Entry type the per-service delete action targets
pub const EMERGENCY_CONTACT_ENTRY: &str = "emergency_contact";

pub const NO_SERVICES_MESSAGE: &str = "No emergency services found.";
pub const NO_FILES_MESSAGE: &str = "No uploaded files found";
pub const FILES_UNAVAILABLE_MESSAGE: &str = "No files found";

/// Visual emphasis of a value or badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Plain,
    Success,
    Danger,
    Warning,
    Info,
    Secondary,
}

/// Headline counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountDisplays {
    pub ngos: u64,
    pub volunteers: u64,
    pub hospitals: u64,
    pub emergency_services: u64,
}

pub fn count_displays(statistics: &Statistics) -> CountDisplays {
    CountDisplays {
        ngos: statistics.ngos.total,
        volunteers: statistics.volunteers.total,
        hospitals: statistics.hospitals.total,
        emergency_services: statistics.emergency_services_total(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub label: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<&'static str>,
}

/// Proportion chart over the six service categories
pub fn service_chart(statistics: &Statistics) -> ChartData {
    let categories = [
        ("NGOs", statistics.ngos.total, "#007bff"),
        ("Volunteers", statistics.volunteers.total, "#28a745"),
        ("Hospitals", statistics.hospitals.total, "#17a2b8"),
        ("Police Stations", statistics.police_stations.total, "#dc3545"),
        ("Blood Banks", statistics.blood_banks.total, "#343a40"),
        ("Fire Stations", statistics.fire_stations.total, "#6c757d"),
    ];

    ChartData {
        kind: ChartKind::Doughnut,
        label: None,
        labels: categories.iter().map(|(label, _, _)| label.to_string()).collect(),
        values: categories.iter().map(|(_, value, _)| *value).collect(),
        colors: categories.iter().map(|(_, _, color)| *color).collect(),
    }
}

/// The `n` locations with the highest combined count, descending.
///
/// Ties keep the order in which locations first appear in the distribution.
pub fn top_locations(distribution: &LocationDistribution, n: usize) -> Vec<(String, u64)> {
    let mut locations = distribution.combined();
    // stable sort keeps insertion order among equal counts
    locations.sort_by(|a, b| b.1.cmp(&a.1));
    locations.truncate(n);
    locations
}

/// Ranked bar chart of the top locations
pub fn location_chart(distribution: &LocationDistribution, n: usize) -> ChartData {
    let top = top_locations(distribution, n);

    ChartData {
        kind: ChartKind::Bar,
        label: Some("Total Services".to_string()),
        colors: vec!["#17a2b8"; top.len()],
        labels: top.iter().map(|(location, _)| location.clone()).collect(),
        values: top.iter().map(|(_, count)| *count).collect(),
    }
}

/// Either rendered items or the message an empty container shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "content", rename_all = "lowercase")]
pub enum ListView<T> {
    Empty(String),
    Items(Vec<T>),
}

impl<T> ListView<T> {
    pub fn from_items(items: Vec<T>, empty_message: &str) -> Self {
        if items.is_empty() {
            ListView::Empty(empty_message.to_string())
        } else {
            ListView::Items(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListView::Items(items) => items,
            ListView::Empty(_) => &[],
        }
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        match self {
            ListView::Items(items) => items,
            ListView::Empty(_) => &mut [],
        }
    }
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        ListView::Items(Vec::new())
    }
}

/// Delete action attached to a service card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteTarget {
    pub entry_type: String,
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

/// View-model of one emergency service card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCard {
    pub title: String,
    pub service_type: String,
    pub phone: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub availability: Badge,
    pub priority: Badge,
    pub delete: DeleteTarget,
    pub visible: bool,
}

impl ServiceCard {
    /// Lowercased text a search or filter matches against
    pub fn search_text(&self) -> String {
        let mut parts = vec![
            self.title.as_str(),
            self.service_type.as_str(),
            self.phone.as_str(),
        ];
        parts.extend(self.location.as_deref());
        parts.extend(self.description.as_deref());
        parts.push(self.availability.text.as_str());
        parts.push(self.priority.text.as_str());
        parts.join(" ").to_lowercase()
    }
}

pub fn priority_tone(priority: Option<u8>) -> Tone {
    match priority {
        Some(1) => Tone::Danger,
        Some(2) => Tone::Warning,
        Some(3) => Tone::Info,
        _ => Tone::Secondary,
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

pub fn service_card(service: &EmergencyService) -> ServiceCard {
    let availability = if service.is_24x7 {
        Badge { text: "24/7".to_string(), tone: Tone::Success }
    } else {
        Badge { text: "Limited Hours".to_string(), tone: Tone::Secondary }
    };

    let priority_text = match service.priority_level {
        Some(level) => format!("Priority {}", level),
        None => "Priority -".to_string(),
    };

    ServiceCard {
        title: service.name.clone(),
        service_type: service.service_type.clone(),
        phone: service.phone.clone(),
        location: non_empty(&service.location),
        description: non_empty(&service.description),
        availability,
        priority: Badge {
            text: priority_text,
            tone: priority_tone(service.priority_level),
        },
        delete: DeleteTarget {
            entry_type: EMERGENCY_CONTACT_ENTRY.to_string(),
            id: service.id,
        },
        visible: true,
    }
}

pub fn service_list(services: &[EmergencyService]) -> ListView<ServiceCard> {
    ListView::from_items(services.iter().map(service_card).collect(), NO_SERVICES_MESSAGE)
}

/// View-model of one uploaded file row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRow {
    pub name: String,
    pub size: String,
    pub modified: String,
}

pub fn file_row(file: &UploadedFile) -> FileRow {
    FileRow {
        name: file.name.clone(),
        size: format_file_size(file.size),
        modified: format_modified_date(file.modified),
    }
}

pub fn file_list(files: &[UploadedFile]) -> ListView<FileRow> {
    ListView::from_items(files.iter().map(file_row).collect(), NO_FILES_MESSAGE)
}

/// Rendered outcome of an import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub dataset: String,
    pub successful: u64,
    pub failed: u64,
    pub skipped: u64,
    pub total: u64,
    pub successful_tone: Tone,
    pub failed_tone: Tone,
    pub skipped_tone: Tone,
    /// At most `max_errors` messages, followed by an overflow line when truncated
    pub error_lines: Vec<String>,
}

pub fn import_summary(dataset: &str, stats: &ImportStats, max_errors: usize) -> ImportSummary {
    let tone_if = |count: u64, tone: Tone| if count > 0 { tone } else { Tone::Plain };

    let mut error_lines: Vec<String> = stats.errors.iter().take(max_errors).cloned().collect();
    if stats.errors.len() > max_errors {
        error_lines.push(format!("... and {} more errors", stats.errors.len() - max_errors));
    }

    ImportSummary {
        dataset: dataset.to_string(),
        successful: stats.successful,
        failed: stats.failed,
        skipped: stats.skipped,
        total: stats.total(),
        successful_tone: tone_if(stats.successful, Tone::Success),
        failed_tone: tone_if(stats.failed, Tone::Danger),
        skipped_tone: tone_if(stats.skipped, Tone::Warning),
        error_lines,
    }
}
