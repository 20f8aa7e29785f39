//! Services module
//!
//! This module contains the request client, the API facade and session handling

pub mod api;
pub mod request;
pub mod session;

// Re-export commonly used services
pub use api::{AdminCollection, Encoding, Endpoint, Operation, ResQApi};
pub use request::{FormData, FormPart, Method, RequestBody, RequestClient, RequestOptions, UiOptions};
pub use session::{FileTokenStore, MemoryTokenStore, SessionManager, TokenStore, ADMIN_TOKEN_KEY};

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::ui::UiHooks;
use crate::utils::errors::Result;

/// Service factory wiring the client stack from settings
#[derive(Clone)]
pub struct ServiceFactory {
    pub api: ResQApi,
    pub session: SessionManager,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized.
    ///
    /// The token store is a file store when `auth.token_store_path` is set,
    /// in-memory otherwise.
    pub fn new(settings: &Settings, ui: UiHooks) -> Result<Self> {
        let store: Arc<dyn TokenStore> = match &settings.auth.token_store_path {
            Some(path) => Arc::new(FileTokenStore::new(path.clone())),
            None => Arc::new(MemoryTokenStore::new()),
        };

        Self::with_store(settings, ui, store)
    }

    /// Create the services around an explicit token store
    pub fn with_store(settings: &Settings, ui: UiHooks, store: Arc<dyn TokenStore>) -> Result<Self> {
        let client = RequestClient::new(&settings.api, ui)?;
        let api = ResQApi::new(client);
        let session = SessionManager::new(api.clone(), store, settings.auth.clone());

        Ok(Self { api, session })
    }
}
