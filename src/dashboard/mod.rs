//! Data management dashboard
//!
//! Admin controller that loads statistics, emergency services and uploaded
//! files, and drives import, export and deletion of datasets. Every user
//! action goes through [`DataDashboard::dispatch`], the error boundary that
//! logs a failure and reports it with exactly one notification.

pub mod render;
pub mod state;

pub use render::{
    ChartData, ChartKind, CountDisplays, DeleteTarget, FileRow, ImportSummary, ListView,
    ServiceCard, Tone,
};
pub use state::DashboardState;

use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;
use crate::config::DashboardConfig;
use crate::models::{ContactsResponse, ExportResponse, FilesResponse, ImportResponse, StatisticsResponse};
use crate::services::{FormData, ResQApi, ServiceFactory, SessionManager, UiOptions};
use crate::ui::{lock, ButtonGuard, ButtonLoader, ConfirmDialog, Downloader, Notifier};
use crate::utils::errors::{ResQError, Result};
use crate::utils::helpers::file_extension;
use crate::utils::logging::{log_action_failure, log_admin_action};

/// A file picked for import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }
}

/// User actions the dashboard reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Refresh,
    Search(String),
    FilterServiceType(String),
    Import {
        dataset: String,
        file: Option<SelectedFile>,
    },
    Export(String),
    ExportAll,
    DeleteFile(String),
    ClearData(String),
    DeleteEntry {
        entry_type: String,
        id: i64,
    },
}

impl DashboardEvent {
    /// Label used in failure notifications
    pub fn label(&self) -> &'static str {
        match self {
            DashboardEvent::Refresh => "Refresh",
            DashboardEvent::Search(_) => "Search",
            DashboardEvent::FilterServiceType(_) => "Filter",
            DashboardEvent::Import { .. } => "Import",
            DashboardEvent::Export(_) => "Export",
            DashboardEvent::ExportAll => "Export all",
            DashboardEvent::DeleteFile(_) => "Delete file",
            DashboardEvent::ClearData(_) => "Clear data",
            DashboardEvent::DeleteEntry { .. } => "Delete entry",
        }
    }
}

/// Button id guarding the import of one dataset
pub fn import_button_id(dataset: &str) -> String {
    format!("import-{}", dataset)
}

pub struct DataDashboard {
    api: ResQApi,
    session: SessionManager,
    config: DashboardConfig,
    notifier: Arc<dyn Notifier>,
    buttons: Arc<dyn ButtonLoader>,
    confirm: Arc<dyn ConfirmDialog>,
    downloader: Arc<dyn Downloader>,
    state: Mutex<DashboardState>,
}

impl DataDashboard {
    /// Create a dashboard on top of the service stack.
    ///
    /// Notifications and button states go through the same UI hooks the
    /// request client was built with.
    pub fn new(
        services: &ServiceFactory,
        config: DashboardConfig,
        confirm: Arc<dyn ConfirmDialog>,
        downloader: Arc<dyn Downloader>,
    ) -> Self {
        let ui = services.api.client().ui().clone();

        Self {
            api: services.api.clone(),
            session: services.session.clone(),
            config,
            notifier: ui.notifier,
            buttons: ui.buttons,
            confirm,
            downloader,
            state: Mutex::new(DashboardState::default()),
        }
    }

    /// Snapshot of the current view state
    pub fn state(&self) -> DashboardState {
        lock(&self.state).clone()
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Load statistics, services and files, then start accepting events.
    ///
    /// Each step is its own error boundary; a failed step does not stop the
    /// following ones.
    pub async fn init(&self) {
        info!("Initializing data dashboard");

        self.guarded("Loading statistics", self.load_statistics()).await;
        self.guarded("Loading emergency services", self.load_emergency_services()).await;
        self.guarded("Loading uploaded files", self.load_uploaded_files()).await;

        lock(&self.state).listeners_attached = true;
        debug!("Dashboard listeners attached");
    }

    /// Run one user action inside the error boundary.
    ///
    /// Returns `false` when the action failed and was reported.
    pub async fn dispatch(&self, event: DashboardEvent) -> bool {
        let label = event.label();
        debug!(action = label, "Dispatching dashboard event");

        let result = match event {
            DashboardEvent::Refresh => self.refresh().await,
            DashboardEvent::Search(query) => {
                self.search(&query);
                Ok(())
            }
            DashboardEvent::FilterServiceType(service_type) => {
                self.filter_services(&service_type);
                Ok(())
            }
            DashboardEvent::Import { dataset, file } => self.import_data(&dataset, file).await.map(|_| ()),
            DashboardEvent::Export(dataset) => self.export_data(&dataset).await.map(|_| ()),
            DashboardEvent::ExportAll => self.export_all().await,
            DashboardEvent::DeleteFile(filename) => self.delete_file(&filename).await.map(|_| ()),
            DashboardEvent::ClearData(dataset) => self.clear_data(&dataset).await.map(|_| ()),
            DashboardEvent::DeleteEntry { entry_type, id } => {
                self.delete_entry(&entry_type, id).await.map(|_| ())
            }
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                self.report_failure(label, &e);
                false
            }
        }
    }

    async fn guarded<F>(&self, label: &str, action: F) -> bool
    where
        F: Future<Output = Result<()>>,
    {
        match action.await {
            Ok(()) => true,
            Err(e) => {
                self.report_failure(label, &e);
                false
            }
        }
    }

    fn report_failure(&self, label: &str, error: &ResQError) {
        log_action_failure(label, error);

        match error {
            ResQError::Precondition(message) => self.notifier.warning(message),
            ResQError::InvalidInput(message) => self.notifier.error(message),
            ResQError::Busy(_) => self.notifier.warning(&error.to_string()),
            _ => self
                .notifier
                .error(&format!("{} failed: {}", label, error.user_message())),
        }
    }

    async fn refresh(&self) -> Result<()> {
        self.load_statistics().await?;
        self.load_emergency_services().await?;
        self.load_uploaded_files().await
    }

    /// Fetch statistics and render the counters and both charts
    pub async fn load_statistics(&self) -> Result<()> {
        let token = self.session.ensure_admin_token().await?;
        let body = self.api.get_statistics(&token, UiOptions::quiet()).await?;
        let response: StatisticsResponse = serde_json::from_value(body)?;

        let counts = render::count_displays(&response.statistics);
        let service_chart = render::service_chart(&response.statistics);
        let location_chart = render::location_chart(&response.location_distribution, self.config.top_locations);

        let mut state = lock(&self.state);
        state.counts = Some(counts);
        state.service_chart = Some(service_chart);
        state.location_chart = Some(location_chart);

        debug!(?counts, "Statistics rendered");
        Ok(())
    }

    /// Fetch the emergency contacts and replace the service cards
    pub async fn load_emergency_services(&self) -> Result<()> {
        let body = self.api.list_emergency_contacts(UiOptions::quiet()).await?;
        let response: ContactsResponse = serde_json::from_value(body)?;

        let mut state = lock(&self.state);
        state.services = render::service_list(&response.contacts);
        state.apply_filters();

        debug!(count = response.contacts.len(), "Emergency services rendered");
        Ok(())
    }

    /// Fetch the uploaded files listing and replace the file rows
    pub async fn load_uploaded_files(&self) -> Result<()> {
        let response = match self.api.get_uploaded_csvs(UiOptions::quiet()).await {
            Ok(body) => serde_json::from_value::<FilesResponse>(body),
            Err(e) => {
                lock(&self.state).files = ListView::Empty(render::FILES_UNAVAILABLE_MESSAGE.to_string());
                return Err(e);
            }
        }?;

        lock(&self.state).files = render::file_list(&response.files);
        debug!(count = response.files.len(), "Uploaded files rendered");
        Ok(())
    }

    pub fn search(&self, query: &str) {
        let mut state = lock(&self.state);
        state.search_query = query.to_string();
        state.apply_filters();
    }

    pub fn filter_services(&self, service_type: &str) {
        let mut state = lock(&self.state);
        state.service_filter = service_type.to_string();
        state.apply_filters();
    }

    fn check_import_file(&self, file: Option<SelectedFile>) -> Result<SelectedFile> {
        let file = file.ok_or_else(|| ResQError::Precondition("Please select a file first".to_string()))?;

        let accepted = &self.config.accepted_import_extensions;
        let extension = file_extension(&file.name);
        let is_accepted = extension
            .as_deref()
            .map_or(false, |ext| accepted.iter().any(|a| a.eq_ignore_ascii_case(ext)));

        if !is_accepted {
            let kinds: Vec<String> = accepted.iter().map(|a| a.to_uppercase()).collect();
            return Err(ResQError::InvalidInput(format!("Please select a {} file", kinds.join(" or "))));
        }

        Ok(file)
    }

    /// Upload a dataset file and render the returned import statistics.
    ///
    /// A second import of the same dataset while one is in flight fails with
    /// [`ResQError::Busy`] without issuing a request.
    pub async fn import_data(&self, dataset: &str, file: Option<SelectedFile>) -> Result<ImportSummary> {
        let file = self.check_import_file(file)?;

        let button = import_button_id(dataset);
        let guard = ButtonGuard::acquire(self.buttons.as_ref(), &button)
            .ok_or_else(|| ResQError::Busy(format!("import of {}", dataset)))?;

        let token = self.session.ensure_admin_token().await?;
        let form = FormData::new().file("file", file.name.clone(), file.bytes);
        let body = self.api.import_dataset(dataset, form, &token, UiOptions::quiet()).await?;
        let response: ImportResponse = serde_json::from_value(body)?;

        let summary = render::import_summary(dataset, &response.stats, self.config.max_listed_errors);
        lock(&self.state).import_result = Some(summary.clone());

        log_admin_action("import", Some(dataset), Some(&file.name));
        self.notifier.success(&format!(
            "Import completed for {}: {} successful",
            dataset, response.stats.successful
        ));

        drop(guard);
        self.refresh_after_change(true).await;
        Ok(summary)
    }

    /// Request an export and hand the download URL to the downloader
    pub async fn export_data(&self, dataset: &str) -> Result<Url> {
        let body = self.api.export_dataset(dataset, UiOptions::quiet()).await?;
        let response: ExportResponse = serde_json::from_value(body)?;
        let url = self.api.client().resolve(&response.download_url)?;

        let filename = format!("{}_export.csv", dataset);
        self.downloader.download(&url, &filename);

        info!(dataset = dataset, url = %url, "Export downloaded");
        self.notifier.success(&format!("Export completed for {}", dataset));
        Ok(url)
    }

    /// Export every configured dataset in order, pausing between exports.
    ///
    /// A failed export is logged and skipped.
    pub async fn export_all(&self) -> Result<()> {
        let delay = Duration::from_millis(self.config.export_delay_ms);

        for (i, dataset) in self.config.export_all_types.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if let Err(e) = self.export_data(dataset).await {
                warn!(dataset = %dataset, error = %e, "Export failed, continuing");
            }
        }

        self.notifier.success("All exports completed");
        Ok(())
    }

    /// Delete an uploaded file after confirmation.
    ///
    /// Returns `false` when the user declined.
    pub async fn delete_file(&self, filename: &str) -> Result<bool> {
        if !self.confirm.confirm(&format!("Are you sure you want to delete {}?", filename)) {
            debug!(filename = filename, "File deletion cancelled");
            return Ok(false);
        }

        let token = self.session.ensure_admin_token().await?;
        self.api.delete_data_file(filename, &token, UiOptions::quiet()).await?;

        log_admin_action("delete_file", Some(filename), None);
        self.notifier.success(&format!("File {} deleted successfully", filename));

        self.refresh_after_change(true).await;
        Ok(true)
    }

    /// Remove every record of a dataset after confirmation
    pub async fn clear_data(&self, dataset: &str) -> Result<bool> {
        let message = format!(
            "Are you sure you want to clear all {} data? This action cannot be undone.",
            dataset
        );
        if !self.confirm.confirm(&message) {
            debug!(dataset = dataset, "Clear data cancelled");
            return Ok(false);
        }

        let token = self.session.ensure_admin_token().await?;
        self.api.clear_data(dataset, &token, UiOptions::quiet()).await?;

        log_admin_action("clear_data", Some(dataset), None);
        self.notifier.success(&format!("All {} data cleared successfully", dataset));

        self.refresh_after_change(false).await;
        Ok(true)
    }

    /// Remove one record after confirmation
    pub async fn delete_entry(&self, entry_type: &str, id: i64) -> Result<bool> {
        if !self.confirm.confirm(&format!("Are you sure you want to delete this {} entry?", entry_type)) {
            debug!(entry_type = entry_type, id = id, "Entry deletion cancelled");
            return Ok(false);
        }

        let token = self.session.ensure_admin_token().await?;
        self.api.delete_data_entry(entry_type, id, &token, UiOptions::quiet()).await?;

        let target = format!("{}/{}", entry_type, id);
        log_admin_action("delete_entry", Some(&target), None);
        self.notifier.success(&format!("{} entry deleted successfully", entry_type));

        self.refresh_after_change(false).await;
        Ok(true)
    }

    /// Reload statistics and lists after a mutation; each reload reports its own failure
    async fn refresh_after_change(&self, include_files: bool) {
        self.guarded("Loading statistics", self.load_statistics()).await;
        self.guarded("Loading emergency services", self.load_emergency_services()).await;
        if include_files {
            self.guarded("Loading uploaded files", self.load_uploaded_files()).await;
        }
    }
}
