//! Dashboard view state

use std::fmt;
use serde::Serialize;
use super::render::{ChartData, CountDisplays, FileRow, ImportSummary, ListView, ServiceCard};

/// Everything the dashboard currently displays
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub counts: Option<CountDisplays>,
    pub service_chart: Option<ChartData>,
    pub location_chart: Option<ChartData>,
    pub services: ListView<ServiceCard>,
    pub files: ListView<FileRow>,
    pub import_result: Option<ImportSummary>,
    pub search_query: String,
    pub service_filter: String,
    pub listeners_attached: bool,
}

impl DashboardState {
    /// Recompute card visibility from the current search query and type filter.
    ///
    /// Both are case-insensitive substring matches over the card text; an
    /// empty query or filter matches every card.
    pub fn apply_filters(&mut self) {
        let query = self.search_query.trim().to_lowercase();
        let filter = self.service_filter.trim().to_lowercase();

        for card in self.services.items_mut() {
            let text = card.search_text();
            card.visible = (query.is_empty() || text.contains(&query))
                && (filter.is_empty() || text.contains(&filter));
        }
    }

    pub fn visible_services(&self) -> impl Iterator<Item = &ServiceCard> {
        self.services.items().iter().filter(|card| card.visible)
    }
}

impl fmt::Display for DashboardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.counts {
            Some(c) => writeln!(
                f,
                "NGOs: {}  Volunteers: {}  Hospitals: {}  Emergency services: {}",
                c.ngos, c.volunteers, c.hospitals, c.emergency_services
            )?,
            None => writeln!(f, "Statistics unavailable")?,
        }

        if let Some(chart) = &self.location_chart {
            writeln!(f, "\nTop locations:")?;
            for (label, value) in chart.labels.iter().zip(&chart.values) {
                writeln!(f, "  {:<24} {}", label, value)?;
            }
        }

        writeln!(f, "\nEmergency services:")?;
        match &self.services {
            ListView::Empty(message) => writeln!(f, "  {}", message)?,
            ListView::Items(_) => {
                for card in self.visible_services() {
                    writeln!(
                        f,
                        "  [{}] {} ({}) {} | {} | {}",
                        card.delete.id,
                        card.title,
                        card.service_type,
                        card.phone,
                        card.availability.text,
                        card.priority.text
                    )?;
                }
            }
        }

        writeln!(f, "\nUploaded files:")?;
        match &self.files {
            ListView::Empty(message) => writeln!(f, "  {}", message)?,
            ListView::Items(rows) => {
                for row in rows {
                    writeln!(f, "  {:<32} {:>10}  {}", row.name, row.size, row.modified)?;
                }
            }
        }

        if let Some(summary) = &self.import_result {
            writeln!(
                f,
                "\nImport results for {}: {} successful, {} failed, {} skipped, {} total",
                summary.dataset, summary.successful, summary.failed, summary.skipped, summary.total
            )?;
            for line in &summary.error_lines {
                writeln!(f, "  {}", line)?;
            }
        }

        Ok(())
    }
}
