//! Data dashboard integration tests
//!
//! Drives the dashboard controller against a mock API server and checks the
//! rendered state, notifications and issued requests.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use resqtrack::{
    dashboard::{import_button_id, DashboardEvent, ListView, SelectedFile, Tone},
    ui::{ButtonLoader, ToastKind},
    ResQError,
};
use serde_json::json;

#[tokio::test]
async fn test_init_renders_statistics_services_and_files() {
    let ctx = TestContext::new().await;
    let dashboard = ctx.dashboard();

    dashboard.init().await;
    let state = dashboard.state();

    let counts = state.counts.expect("counts rendered");
    assert_eq!((counts.ngos, counts.volunteers, counts.hospitals), (12, 40, 8));
    assert_eq!(counts.emergency_services, 12);

    let chart = state.service_chart.expect("service chart rendered");
    assert_eq!(chart.values, vec![12, 40, 8, 5, 4, 3]);

    let locations = state.location_chart.expect("location chart rendered");
    assert_eq!(locations.values, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);
    assert!(!locations.labels.contains(&"Nagpur".to_string()));
    assert!(!locations.labels.contains(&"Kolkata".to_string()));

    assert_eq!(state.services.items().len(), 3);
    assert_eq!(state.services.items()[0].priority.tone, Tone::Danger);
    assert_eq!(state.files.items()[0].size, "1.5 KB");
    assert_eq!(state.files.items()[1].size, "0 Bytes");
    assert!(state.listeners_attached);

    let stats_requests = ctx.mock.requests_to("GET", "/data/stats").await;
    assert_eq!(
        header_value(&stats_requests[0], "authorization"),
        Some(format!("Bearer {}", test_admin_token()))
    );
    assert!(ctx.toasts.is_empty());
    assert!(!ctx.overlay.is_visible());
}

#[tokio::test]
async fn test_statistics_without_token_fail_before_request() {
    let ctx = TestContext::new_with_config(TestConfig {
        admin_token: None,
        setup_default_mocks: false,
        ..TestConfig::default()
    })
    .await;
    ctx.mock.mock_statistics(MockResponseConfig::default().expect(0)).await;
    ctx.mock.mock_emergency_contacts(MockResponseConfig::default()).await;
    ctx.mock.mock_files(MockResponseConfig::default()).await;

    let dashboard = ctx.dashboard();
    assert_matches!(dashboard.load_statistics().await, Err(ResQError::NotAuthenticated));

    dashboard.init().await;

    // the other init steps still run
    assert_eq!(dashboard.state().services.items().len(), 3);
    assert!(dashboard.state().counts.is_none());
    assert_eq!(
        ctx.toast_messages(ToastKind::Error),
        vec!["Loading statistics failed: Admin not authenticated".to_string()]
    );
}

#[tokio::test]
async fn test_files_failure_shows_placeholder() {
    let ctx = TestContext::new_with_config(TestConfig { setup_default_mocks: false, ..TestConfig::default() }).await;
    ctx.mock.mock_files(MockResponseConfig::status(500, json!({"error": "disk unavailable"}))).await;

    let dashboard = ctx.dashboard();
    assert!(dashboard.load_uploaded_files().await.is_err());
    assert_eq!(dashboard.state().files, ListView::Empty("No files found".to_string()));
}

#[tokio::test]
async fn test_import_renders_summary_and_refreshes() {
    let ctx = TestContext::new().await;
    ctx.mock
        .mock_route(
            "POST",
            "/data/import/ngos",
            MockResponseConfig::ok(import_body(7, 2, 1, &["e1", "e2", "e3", "e4", "e5", "e6"])).expect(1),
        )
        .await;

    let dashboard = ctx.dashboard();
    let file = SelectedFile::new("ngos.csv", sample_csv());
    let ok = dashboard
        .dispatch(DashboardEvent::Import { dataset: "ngos".to_string(), file: Some(file) })
        .await;
    assert!(ok);

    let summary = dashboard.state().import_result.expect("import summary rendered");
    assert_eq!((summary.successful, summary.failed, summary.skipped, summary.total), (7, 2, 1, 10));
    assert_eq!(summary.error_lines.len(), 6);
    assert_eq!(summary.error_lines.last().unwrap(), "... and 1 more errors");

    assert_eq!(
        ctx.toast_messages(ToastKind::Success),
        vec!["Import completed for ngos: 7 successful".to_string()]
    );

    // statistics, services and files reloaded after the import
    assert_eq!(ctx.mock.requests_to("GET", "/data/stats").await.len(), 1);
    assert_eq!(ctx.mock.requests_to("GET", "/data/files").await.len(), 1);
    assert!(ctx.buttons.busy_buttons().is_empty());

    let imports = ctx.mock.requests_to("POST", "/data/import/ngos").await;
    assert!(String::from_utf8_lossy(&imports[0].body).contains("filename=\"ngos.csv\""));
}

#[tokio::test]
async fn test_import_preconditions() {
    let ctx = TestContext::new_with_config(TestConfig { setup_default_mocks: false, ..TestConfig::default() }).await;
    ctx.mock
        .mock_route("POST", "/data/import/ngos", MockResponseConfig::default().expect(0))
        .await;

    let dashboard = ctx.dashboard();

    assert!(!dashboard.dispatch(DashboardEvent::Import { dataset: "ngos".to_string(), file: None }).await);

    let xlsx = SelectedFile::new("ngos.xlsx", vec![1, 2, 3]);
    assert!(!dashboard.dispatch(DashboardEvent::Import { dataset: "ngos".to_string(), file: Some(xlsx) }).await);

    assert_eq!(ctx.toast_messages(ToastKind::Warning), vec!["Please select a file first".to_string()]);
    assert_eq!(ctx.toast_messages(ToastKind::Error), vec!["Please select a CSV file".to_string()]);
}

#[tokio::test]
async fn test_import_on_busy_button_issues_no_request() {
    let ctx = TestContext::new_with_config(TestConfig { setup_default_mocks: false, ..TestConfig::default() }).await;
    ctx.mock
        .mock_route("POST", "/data/import/hospitals", MockResponseConfig::default().expect(0))
        .await;

    let button = import_button_id("hospitals");
    assert!(ctx.buttons.try_begin(&button));

    let dashboard = ctx.dashboard();
    let result = dashboard
        .import_data("hospitals", Some(SelectedFile::new("hospitals.csv", sample_csv())))
        .await;

    assert_matches!(result, Err(ResQError::Busy(_)));
    assert!(ctx.mock.requests().await.is_empty());
    // the in-flight import still owns the button
    assert!(ctx.buttons.is_loading(&button));
}

#[tokio::test]
async fn test_import_failure_reports_once() {
    let ctx = TestContext::new_with_config(TestConfig { setup_default_mocks: false, ..TestConfig::default() }).await;
    ctx.mock
        .mock_route("POST", "/data/import/ngos", MockResponseConfig::status(400, json!({"error": "Invalid CSV header"})))
        .await;

    let dashboard = ctx.dashboard();
    let file = SelectedFile::new("ngos.csv", sample_csv());
    assert!(!dashboard.dispatch(DashboardEvent::Import { dataset: "ngos".to_string(), file: Some(file) }).await);

    assert_eq!(ctx.toasts.len(), 1);
    assert_eq!(ctx.toasts.last().unwrap().message, "Import failed: Invalid CSV header");
    assert!(ctx.buttons.busy_buttons().is_empty());
}

#[tokio::test]
async fn test_export_resolves_download_url() {
    let ctx = TestContext::new_with_config(TestConfig { setup_default_mocks: false, ..TestConfig::default() }).await;
    ctx.mock
        .mock_route(
            "GET",
            "/data/export/volunteers",
            MockResponseConfig::ok(json!({"message": "ok", "download_url": "/uploads/volunteers_export.csv"})),
        )
        .await;

    let dashboard = ctx.dashboard();
    let url = dashboard.export_data("volunteers").await.unwrap();

    assert_eq!(url.as_str(), format!("{}/uploads/volunteers_export.csv", ctx.mock.base_url));
    assert_eq!(ctx.downloader.downloads(), vec![(url, "volunteers_export.csv".to_string())]);
    assert_eq!(
        ctx.toast_messages(ToastKind::Success),
        vec!["Export completed for volunteers".to_string()]
    );
}

#[tokio::test]
async fn test_export_all_continues_past_failures() {
    let ctx = TestContext::new_with_config(TestConfig { setup_default_mocks: false, ..TestConfig::default() }).await;
    ctx.mock
        .mock_route("GET", "/data/export/ngos", MockResponseConfig::ok(json!({"download_url": "/n.csv"})))
        .await;
    ctx.mock
        .mock_route("GET", "/data/export/volunteers", MockResponseConfig::status(500, json!({"error": "boom"})))
        .await;
    ctx.mock
        .mock_route("GET", "/data/export/hospitals", MockResponseConfig::ok(json!({"download_url": "/h.csv"})))
        .await;

    let dashboard = ctx.dashboard();
    assert!(dashboard.dispatch(DashboardEvent::ExportAll).await);

    let filenames: Vec<String> = ctx.downloader.downloads().into_iter().map(|(_, f)| f).collect();
    assert_eq!(filenames, vec!["ngos_export.csv", "hospitals_export.csv"]);
    assert_eq!(ctx.toasts.last().unwrap().message, "All exports completed");
}

#[tokio::test]
async fn test_declined_confirmation_issues_no_request() {
    let ctx = TestContext::new_with_config(TestConfig {
        setup_default_mocks: false,
        confirm: false,
        ..TestConfig::default()
    })
    .await;
    ctx.mock.mock_route("DELETE", "/data/delete-file", MockResponseConfig::default().expect(0)).await;
    ctx.mock.mock_route("DELETE", "/data/clear-data/ngos", MockResponseConfig::default().expect(0)).await;

    let dashboard = ctx.dashboard();
    assert!(!dashboard.delete_file("ngos.csv").await.unwrap());
    assert!(!dashboard.clear_data("ngos").await.unwrap());
    assert!(!dashboard.delete_entry("emergency_contact", 2).await.unwrap());

    assert!(ctx.mock.requests().await.is_empty());
    assert!(ctx.toasts.is_empty());
}

#[tokio::test]
async fn test_delete_entry_reloads_statistics_and_services() {
    let ctx = TestContext::new().await;
    ctx.mock
        .mock_route(
            "DELETE",
            "/data/delete-entry/emergency_contact/2",
            MockResponseConfig::ok(json!({"message": "Entry deleted"})).expect(1),
        )
        .await;

    let dashboard = ctx.dashboard();
    assert!(dashboard
        .dispatch(DashboardEvent::DeleteEntry { entry_type: "emergency_contact".to_string(), id: 2 })
        .await);

    assert_eq!(ctx.mock.requests_to("GET", "/data/stats").await.len(), 1);
    assert_eq!(ctx.mock.requests_to("GET", "/data/emergency-contacts").await.len(), 1);
    assert_eq!(
        ctx.toast_messages(ToastKind::Success),
        vec!["emergency_contact entry deleted successfully".to_string()]
    );
}

#[tokio::test]
async fn test_delete_file_sends_filename() {
    let ctx = TestContext::new().await;
    ctx.mock.mock_route("DELETE", "/data/delete-file", MockResponseConfig::ok(json!({}))).await;

    let dashboard = ctx.dashboard();
    assert!(dashboard.delete_file("ngos.csv").await.unwrap());

    let requests = ctx.mock.requests_to("DELETE", "/data/delete-file").await;
    assert_eq!(requests[0].body_json::<serde_json::Value>().unwrap(), json!({"filename": "ngos.csv"}));
    assert_eq!(ctx.mock.requests_to("GET", "/data/files").await.len(), 1);
}

#[tokio::test]
async fn test_search_and_filter_after_reload() {
    let ctx = TestContext::new().await;
    let dashboard = ctx.dashboard();
    dashboard.init().await;

    dashboard.dispatch(DashboardEvent::Search("FIRE".to_string())).await;
    let visible: Vec<String> = dashboard.state().visible_services().map(|c| c.title.clone()).collect();
    assert_eq!(visible, vec!["City Fire Brigade"]);

    dashboard.search("");
    dashboard.filter_services("blood_bank");
    dashboard.load_emergency_services().await.unwrap();

    // the filter survives a reload of the list
    let visible: Vec<i64> = dashboard.state().visible_services().map(|c| c.delete.id).collect();
    assert_eq!(visible, vec![2]);
}
