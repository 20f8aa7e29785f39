//! Request client
//!
//! Thin wrapper around `reqwest` that selects JSON or multipart encoding,
//! injects the bearer token, reconciles paths with the configured API prefix,
//! parses every response body as JSON and surfaces failures through the
//! injected UI hooks.

use std::time::Duration;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;
use uuid::Uuid;
use crate::config::{ApiConfig, CredentialsMode};
use crate::ui::{ButtonGuard, LoadingGuard, UiHooks};
use crate::utils::errors::{ResQError, Result};
use crate::utils::helpers::normalize_path;
use crate::utils::logging::log_request_outcome;

pub use reqwest::Method;

/// One part of a multipart form
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        bytes: Vec<u8>,
        mime: Option<String>,
    },
}

/// Multipart form body, passed to the transport untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    parts: Vec<FormPart>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, name: impl Into<String>, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            filename: filename.into(),
            bytes,
            mime: None,
        });
        self
    }

    pub fn file_with_mime(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        bytes: Vec<u8>,
        mime: impl Into<String>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            filename: filename.into(),
            bytes,
            mime: Some(mime.into()),
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    fn into_multipart(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File { name, filename, bytes, mime } => {
                    let mut file_part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
                    if let Some(mime) = mime {
                        file_part = file_part.mime_str(&mime)?;
                    }
                    form.part(name, file_part)
                }
            };
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Form(FormData),
}

/// What to send
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    pub token: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            token: None,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn form(mut self, form: FormData) -> Self {
        self.body = Some(RequestBody::Form(form));
        self
    }

    pub fn token(mut self, token: Option<&str>) -> Self {
        self.token = token.map(str::to_string);
        self
    }

    pub fn is_form(&self) -> bool {
        matches!(self.body, Some(RequestBody::Form(_)))
    }
}

/// UI side effects around a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiOptions {
    pub show_loading: bool,
    pub show_toast: bool,
    pub button: Option<String>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            show_loading: true,
            show_toast: true,
            button: None,
        }
    }
}

impl UiOptions {
    /// No loading indicator, no toasts
    pub fn silent() -> Self {
        Self {
            show_loading: false,
            show_toast: false,
            button: None,
        }
    }

    /// Loading indicator but no toasts; the caller reports the outcome itself
    pub fn quiet() -> Self {
        Self {
            show_toast: false,
            ..Self::default()
        }
    }

    pub fn with_button(mut self, button: impl Into<String>) -> Self {
        self.button = Some(button.into());
        self
    }
}

/// HTTP client bound to one base URL and prefix
#[derive(Clone)]
pub struct RequestClient {
    http: Client,
    origin: Url,
    prefix: String,
    ui: UiHooks,
}

impl RequestClient {
    /// Create a new RequestClient from the API configuration
    pub fn new(config: &ApiConfig, ui: UiHooks) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(config.credentials == CredentialsMode::Include);

        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let http = builder.build().map_err(ResQError::Http)?;
        let origin = Url::parse(&config.base_url)?;

        Ok(Self {
            http,
            origin,
            prefix: config.prefix.trim_end_matches('/').to_string(),
            ui,
        })
    }

    pub fn ui(&self) -> &UiHooks {
        &self.ui
    }

    /// Base URL the API lives on, without the prefix
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Full URL for an API path, with or without the prefix
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.origin.as_str().trim_end_matches('/'),
            self.prefix,
            normalize_path(path, &self.prefix)
        )
    }

    /// Resolve a server-supplied URL (absolute or origin-relative)
    pub fn resolve(&self, url: &str) -> Result<Url> {
        Ok(self.origin.join(url)?)
    }

    /// Issue a request and return the parsed JSON body.
    ///
    /// Non-2xx statuses fail with [`ResQError::Api`]; transport failures with
    /// [`ResQError::Network`]. An empty or non-JSON body parses as `{}`.
    /// A busy button fails with [`ResQError::Busy`] before anything is sent.
    pub async fn request(&self, path: &str, options: RequestOptions, ui: UiOptions) -> Result<Value> {
        let _button = match ui.button.as_deref() {
            Some(button) => Some(
                ButtonGuard::acquire(self.ui.buttons.as_ref(), button)
                    .ok_or_else(|| ResQError::Busy(button.to_string()))?,
            ),
            None => None,
        };
        let _loading = ui
            .show_loading
            .then(|| LoadingGuard::show(self.ui.loading.as_ref()));

        let result = self.send(path, options).await;

        if ui.show_toast {
            match &result {
                Ok(body) => {
                    if let Some(message) = body.get("message").and_then(Value::as_str) {
                        self.ui.notifier.success(message);
                    }
                }
                Err(e) => self.ui.notifier.error(&e.user_message()),
            }
        }

        result
    }

    async fn send(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let request_id = Uuid::new_v4().to_string();
        let url = self.url_for(path);
        let method = options.method.clone();
        let is_form = options.is_form();

        debug!(request_id = %request_id, method = %method, url = %url, form = is_form, "Sending API request");

        let mut request = self.http.request(method.clone(), &url);

        if !is_form {
            request = request.header(CONTENT_TYPE, "application/json");
        }

        if let Some(token) = &options.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        request = match options.body {
            Some(RequestBody::Json(body)) => request.body(serde_json::to_vec(&body)?),
            Some(RequestBody::Form(form)) => request.multipart(form.into_multipart()?),
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log_request_outcome(&request_id, method.as_str(), &url, None, false);
                return Err(ResQError::Network(e));
            }
        };

        let status = response.status();
        let bytes = response.bytes().await.map_err(ResQError::Network)?;
        let body: Value = serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({}));

        log_request_outcome(&request_id, method.as_str(), &url, Some(status.as_u16()), status.is_success());

        if !status.is_success() {
            return Err(ResQError::from_response(status.as_u16(), body));
        }

        Ok(body)
    }
}
