//! Test context for unified test setup
//!
//! This module provides a unified test context that initializes the mock API
//! server, settings, UI collaborators and the service stack.

use std::sync::{Arc, Mutex};
use resqtrack::{
    config::Settings,
    dashboard::DataDashboard,
    services::{MemoryTokenStore, ServiceFactory, TokenStore, ADMIN_TOKEN_KEY},
    ui::{AutoConfirm, ButtonRegistry, ConfirmDialog, DenyAll, Downloader, LoadingOverlay, ToastKind, ToastManager, UiHooks},
};
use tempfile::TempDir;
use url::Url;

use super::{api_mock::ApiMockServer, test_data::test_admin_token};

/// Downloader that remembers what it was asked to save
#[derive(Debug, Default)]
pub struct RecordingDownloader {
    pub downloads: Mutex<Vec<(Url, String)>>,
}

impl RecordingDownloader {
    pub fn downloads(&self) -> Vec<(Url, String)> {
        self.downloads.lock().unwrap().clone()
    }
}

impl Downloader for RecordingDownloader {
    fn download(&self, url: &Url, filename: &str) {
        self.downloads.lock().unwrap().push((url.clone(), filename.to_string()));
    }
}

/// Configuration for the test context
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub admin_token: Option<String>,
    pub setup_default_mocks: bool,
    pub confirm: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            admin_token: Some(test_admin_token()),
            setup_default_mocks: true,
            confirm: true,
        }
    }
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub mock: ApiMockServer,
    pub settings: Settings,
    pub toasts: Arc<ToastManager>,
    pub overlay: Arc<LoadingOverlay>,
    pub buttons: Arc<ButtonRegistry>,
    pub downloader: Arc<RecordingDownloader>,
    pub store: Arc<MemoryTokenStore>,
    pub services: ServiceFactory,
    pub temp_dir: TempDir,
    confirm: bool,
}

impl TestContext {
    /// Create a new test context with all components initialized
    pub async fn new() -> Self {
        Self::new_with_config(TestConfig::default()).await
    }

    /// Create a new test context with custom configuration
    pub async fn new_with_config(config: TestConfig) -> Self {
        // Initialize logging once
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mock = ApiMockServer::new().await;
        if config.setup_default_mocks {
            mock.setup_default_mocks().await;
        }

        let settings = Self::create_test_settings(&mock);

        let toasts = Arc::new(ToastManager::new());
        let overlay = Arc::new(LoadingOverlay::new());
        let buttons = Arc::new(ButtonRegistry::new());
        let ui = UiHooks::new(toasts.clone(), overlay.clone(), buttons.clone());

        let store = Arc::new(MemoryTokenStore::new());
        if let Some(token) = &config.admin_token {
            store.set(ADMIN_TOKEN_KEY, token).expect("Failed to store token");
        }

        let services = ServiceFactory::with_store(&settings, ui, store.clone())
            .expect("Failed to create services");

        Self {
            mock,
            settings,
            toasts,
            overlay,
            buttons,
            downloader: Arc::new(RecordingDownloader::default()),
            store,
            services,
            temp_dir,
            confirm: config.confirm,
        }
    }

    /// Settings pointing at the mock server
    pub fn create_test_settings(mock: &ApiMockServer) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = mock.base_url.clone();
        settings.api.prefix = "/api".to_string();
        settings.api.timeout_seconds = Some(5);
        settings.dashboard.export_delay_ms = 10;
        settings
    }

    /// Dashboard wired to this context's collaborators
    pub fn dashboard(&self) -> DataDashboard {
        let confirm: Arc<dyn ConfirmDialog> = if self.confirm {
            Arc::new(AutoConfirm)
        } else {
            Arc::new(DenyAll)
        };

        DataDashboard::new(
            &self.services,
            self.settings.dashboard.clone(),
            confirm,
            self.downloader.clone(),
        )
    }

    /// Messages of all toasts of one kind, oldest first
    pub fn toast_messages(&self, kind: ToastKind) -> Vec<String> {
        self.toasts
            .toasts()
            .into_iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.message)
            .collect()
    }
}
