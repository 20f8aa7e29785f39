//! UI primitives
//!
//! Notification, loading, confirmation and download collaborators used by the
//! request client and the dashboard. Every collaborator is a trait with a
//! no-op implementation so the client also runs headless.

pub mod cta;
pub mod loading;
pub mod notify;
pub mod validation;

pub use cta::{intercept_cta, configured_counter_frame, counter_frame, story_for, CounterTargets, CtaPrompt, Story};
pub use loading::{ButtonGuard, ButtonLoader, ButtonRegistry, LoadingGuard, LoadingIndicator, LoadingOverlay, NoopButtonLoader, NoopLoadingIndicator};
pub use notify::{NoopNotifier, Notifier, Toast, ToastKind, ToastManager};
pub use validation::{FieldError, FieldValidator, Rule};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use url::Url;

/// Asks the user to confirm a destructive action
pub trait ConfirmDialog: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Hands a download URL to whatever saves files for the user
pub trait Downloader: Send + Sync {
    fn download(&self, url: &Url, filename: &str);
}

/// Confirms everything; for unattended runs
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl ConfirmDialog for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Declines everything
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl ConfirmDialog for DenyAll {
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDownloader;

impl Downloader for NoopDownloader {
    fn download(&self, _url: &Url, _filename: &str) {}
}

/// Shared UI collaborators injected into the request client and dashboard
#[derive(Clone)]
pub struct UiHooks {
    pub notifier: Arc<dyn Notifier>,
    pub loading: Arc<dyn LoadingIndicator>,
    pub buttons: Arc<dyn ButtonLoader>,
}

impl UiHooks {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        loading: Arc<dyn LoadingIndicator>,
        buttons: Arc<dyn ButtonLoader>,
    ) -> Self {
        Self { notifier, loading, buttons }
    }

    /// Hooks that do nothing, for tests and headless use
    pub fn noop() -> Self {
        Self::new(
            Arc::new(NoopNotifier),
            Arc::new(NoopLoadingIndicator),
            Arc::new(NoopButtonLoader),
        )
    }
}

impl Default for UiHooks {
    fn default() -> Self {
        Self::noop()
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
