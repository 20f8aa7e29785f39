//! Loading overlay and button-loading state

use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;
use super::lock;

/// Global "work in progress" indicator
pub trait LoadingIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// Per-button busy state.
///
/// `try_begin` must be atomic: a button that is already loading cannot be
/// acquired a second time until `finish` is called.
pub trait ButtonLoader: Send + Sync {
    fn try_begin(&self, button: &str) -> bool;
    fn finish(&self, button: &str);
    fn is_loading(&self, button: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLoadingIndicator;

impl LoadingIndicator for NoopLoadingIndicator {
    fn show(&self) {}
    fn hide(&self) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopButtonLoader;

impl ButtonLoader for NoopButtonLoader {
    fn try_begin(&self, _button: &str) -> bool {
        true
    }

    fn finish(&self, _button: &str) {}

    fn is_loading(&self, _button: &str) -> bool {
        false
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OverlayCounts {
    pub depth: usize,
    pub shown: usize,
    pub hidden: usize,
}

/// Reference-counted loading overlay; visible while any caller holds it
#[derive(Debug, Default)]
pub struct LoadingOverlay {
    counts: Mutex<OverlayCounts>,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.counts).depth > 0
    }

    pub fn counts(&self) -> OverlayCounts {
        *lock(&self.counts)
    }
}

impl LoadingIndicator for LoadingOverlay {
    fn show(&self) {
        let mut counts = lock(&self.counts);
        counts.depth += 1;
        counts.shown += 1;
        debug!(depth = counts.depth, "Loading overlay shown");
    }

    fn hide(&self) {
        let mut counts = lock(&self.counts);
        counts.depth = counts.depth.saturating_sub(1);
        counts.hidden += 1;
        debug!(depth = counts.depth, "Loading overlay hidden");
    }
}

/// Set of buttons currently showing a spinner (and disabled)
#[derive(Debug, Default)]
pub struct ButtonRegistry {
    busy: Mutex<HashSet<String>>,
}

impl ButtonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn busy_buttons(&self) -> Vec<String> {
        let mut busy: Vec<String> = lock(&self.busy).iter().cloned().collect();
        busy.sort();
        busy
    }
}

impl ButtonLoader for ButtonRegistry {
    fn try_begin(&self, button: &str) -> bool {
        let acquired = lock(&self.busy).insert(button.to_string());
        debug!(button = button, acquired = acquired, "Button loading requested");
        acquired
    }

    fn finish(&self, button: &str) {
        lock(&self.busy).remove(button);
        debug!(button = button, "Button loading finished");
    }

    fn is_loading(&self, button: &str) -> bool {
        lock(&self.busy).contains(button)
    }
}

/// Holds a button in its loading state until dropped
pub struct ButtonGuard<'a> {
    loader: &'a dyn ButtonLoader,
    button: String,
}

impl<'a> ButtonGuard<'a> {
    /// Acquire the button, or `None` when it is already busy
    pub fn acquire(loader: &'a dyn ButtonLoader, button: &str) -> Option<Self> {
        loader.try_begin(button).then(|| Self {
            loader,
            button: button.to_string(),
        })
    }
}

impl Drop for ButtonGuard<'_> {
    fn drop(&mut self) {
        self.loader.finish(&self.button);
    }
}

/// Shows the indicator on creation and hides it on drop
pub struct LoadingGuard<'a> {
    indicator: &'a dyn LoadingIndicator,
}

impl<'a> LoadingGuard<'a> {
    pub fn show(indicator: &'a dyn LoadingIndicator) -> Self {
        indicator.show();
        Self { indicator }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}
