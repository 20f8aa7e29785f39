//! Mock ResQTrack API server for testing
//!
//! This module provides a mock HTTP server that simulates the ResQTrack REST API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

use super::test_data::{contacts_body, files_body, statistics_body};

/// Prefix every mounted route lives under
pub const API_PREFIX: &str = "/api";

/// Mock ResQTrack API server for testing
pub struct ApiMockServer {
    pub server: MockServer,
    pub base_url: String,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub body: Option<Value>,
    pub expected_calls: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            body: None,
            expected_calls: None,
        }
    }
}

impl MockResponseConfig {
    pub fn ok(body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn expect(mut self, calls: u64) -> Self {
        self.expected_calls = Some(calls);
        self
    }
}

impl ApiMockServer {
    /// Create a new mock API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();

        Self { server, base_url }
    }

    /// Full path of an API route under the prefix
    pub fn api_path(route: &str) -> String {
        format!("{}{}", API_PREFIX, route)
    }

    /// Mount a JSON response for `verb` on `route` (relative to the prefix)
    pub async fn mock_route(&self, verb: &str, route: &str, config: MockResponseConfig) {
        let mut template = ResponseTemplate::new(config.status)
            .set_body_json(config.body.unwrap_or_else(|| json!({})));

        if let Some(delay) = config.delay_ms {
            template = template.set_delay(std::time::Duration::from_millis(delay));
        }

        let mut mock = Mock::given(method(verb))
            .and(path(Self::api_path(route)))
            .respond_with(template);

        if let Some(calls) = config.expected_calls {
            mock = mock.expect(calls);
        }

        mock.mount(&self.server).await;
    }

    /// Mount a raw (non-JSON) response body
    pub async fn mock_raw(&self, verb: &str, route: &str, status: u16, body: &str) {
        Mock::given(method(verb))
            .and(path(Self::api_path(route)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_statistics(&self, config: MockResponseConfig) {
        let config = MockResponseConfig {
            body: config.body.or_else(|| Some(statistics_body())),
            ..config
        };
        self.mock_route("GET", "/data/stats", config).await;
    }

    pub async fn mock_emergency_contacts(&self, config: MockResponseConfig) {
        let config = MockResponseConfig {
            body: config.body.or_else(|| Some(contacts_body())),
            ..config
        };
        self.mock_route("GET", "/data/emergency-contacts", config).await;
    }

    pub async fn mock_files(&self, config: MockResponseConfig) {
        let config = MockResponseConfig {
            body: config.body.or_else(|| Some(files_body())),
            ..config
        };
        self.mock_route("GET", "/data/files", config).await;
    }

    /// Setup the three listings the dashboard loads on init
    pub async fn setup_default_mocks(&self) {
        self.mock_statistics(MockResponseConfig::default()).await;
        self.mock_emergency_contacts(MockResponseConfig::default()).await;
        self.mock_files(MockResponseConfig::default()).await;
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// All requests the server has seen so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Requests received for one route (relative to the prefix)
    pub async fn requests_to(&self, verb: &str, route: &str) -> Vec<Request> {
        let full_path = Self::api_path(route);
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.method.as_str() == verb && r.url.path() == full_path)
            .collect()
    }
}

/// Value of a header on a received request
pub fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
