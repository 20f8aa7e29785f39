//! Session and admin token management
//!
//! Holds the bearer token obtained at login, optionally persisted in a
//! key/value token store under a fixed key, and implements the configured
//! admin-token acquisition strategy.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use crate::config::{AdminAuthStrategy, AuthConfig};
use crate::models::{Credentials, LoginResponse};
use crate::services::api::ResQApi;
use crate::services::request::UiOptions;
use crate::ui::lock;
use crate::utils::errors::{ResQError, Result};

/// Key the admin token is persisted under
pub const ADMIN_TOKEN_KEY: &str = "adminToken";

/// Persistent key/value storage for tokens
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Token store that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(key: &str, value: &str) -> Self {
        let store = Self::new();
        lock(&store.values).insert(key.to_string(), value.to_string());
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.values).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.values).remove(key);
        Ok(())
    }
}

/// Token store backed by a JSON object on disk
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(HashMap::new()),
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(values) => Ok(values),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "Ignoring corrupted token store");
                    Ok(HashMap::new())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(values)?)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// Current session: in-memory token plus the persistent store
#[derive(Clone)]
pub struct SessionManager {
    api: ResQApi,
    store: Arc<dyn TokenStore>,
    config: AuthConfig,
    token: Arc<Mutex<Option<String>>>,
}

impl SessionManager {
    pub fn new(api: ResQApi, store: Arc<dyn TokenStore>, config: AuthConfig) -> Self {
        Self {
            api,
            store,
            config,
            token: Arc::new(Mutex::new(None)),
        }
    }

    /// Token held in memory, if any
    pub fn current_token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    /// Log in, keep the token in memory and persist it under [`ADMIN_TOKEN_KEY`]
    pub async fn login(&self, credentials: &Credentials, ui: UiOptions) -> Result<String> {
        let body = self.api.login(credentials, ui).await?;
        let response: LoginResponse = serde_json::from_value(body)?;

        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ResQError::Authentication("Admin authentication failed".to_string()))?;

        *lock(&self.token) = Some(token.clone());
        self.store.set(ADMIN_TOKEN_KEY, &token)?;

        info!(email = %credentials.email, role = ?credentials.role, "Logged in");
        Ok(token)
    }

    /// Forget the token in memory and in the store
    pub fn logout(&self) -> Result<()> {
        *lock(&self.token) = None;
        self.store.remove(ADMIN_TOKEN_KEY)?;
        info!("Logged out");
        Ok(())
    }

    /// Admin token for privileged calls.
    ///
    /// Uses the cached token, else the configured strategy. Fails with
    /// [`ResQError::NotAuthenticated`] before any request when the strategy
    /// has nothing to work with.
    pub async fn ensure_admin_token(&self) -> Result<String> {
        if let Some(token) = self.current_token() {
            return Ok(token);
        }

        let token = match self.config.strategy {
            AdminAuthStrategy::StoredToken => {
                let token = self
                    .store
                    .get(ADMIN_TOKEN_KEY)?
                    .filter(|t| !t.is_empty())
                    .ok_or(ResQError::NotAuthenticated)?;
                debug!("Admin token loaded from store");
                token
            }
            AdminAuthStrategy::Credentials => {
                let (email, password) = match (&self.config.admin_email, &self.config.admin_password) {
                    (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                        (email.clone(), password.clone())
                    }
                    _ => return Err(ResQError::NotAuthenticated),
                };
                let credentials = Credentials::new(email, password).with_role(self.config.admin_role.clone());
                return self.login(&credentials, UiOptions::silent()).await;
            }
        };

        *lock(&self.token) = Some(token.clone());
        Ok(token)
    }
}
