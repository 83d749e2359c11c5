// ABOUTME: Narrow interfaces to services outside the workspace manager
// ABOUTME: File content caching, user settings, and error reporting

use async_trait::async_trait;
use parking_lot::RwLock;
use reviewdesk_logging::error;
use reviewdesk_types::PersistenceConfig;
use std::sync::Arc;

/// Warms the file content cache for reopened tabs
#[async_trait]
pub trait FileContentProvider: Send + Sync {
    /// Fetch and cache one file. Failures stay inside the provider.
    async fn cache_file(
        &self,
        file_path: &str,
        repository_url: &str,
        repository_branch: &str,
        auth_token: Option<&str>,
    );
}

/// User settings read by the workspace store
pub trait SettingsProvider: Send + Sync {
    /// Whether the layout should be saved across sessions
    fn persist_workspace(&self) -> bool;

    /// Whether the file sidebar is currently open
    fn sidebar_open(&self) -> bool;
}

/// Receives errors the workspace recovers from on its own
pub trait ErrorReporter: Send + Sync {
    fn report(&self, message: &str, error: &(dyn std::error::Error + 'static));
}

/// Reports errors through the tracing pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, message: &str, err: &(dyn std::error::Error + 'static)) {
        error!(error = %err, "{message}");
    }
}

/// Mutable settings shared between the UI and the store
#[derive(Debug, Clone)]
pub struct SharedSettings {
    inner: Arc<RwLock<SettingsState>>,
}

#[derive(Debug, Clone, Copy)]
struct SettingsState {
    persist_workspace: bool,
    sidebar_open: bool,
}

impl SharedSettings {
    pub fn new(persist_workspace: bool, sidebar_open: bool) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SettingsState {
                persist_workspace,
                sidebar_open,
            })),
        }
    }

    pub fn from_config(config: &PersistenceConfig) -> Self {
        Self::new(config.persist_workspace, true)
    }

    pub fn set_persist_workspace(&self, enabled: bool) {
        self.inner.write().persist_workspace = enabled;
    }

    pub fn set_sidebar_open(&self, open: bool) {
        self.inner.write().sidebar_open = open;
    }
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self::new(false, true)
    }
}

impl SettingsProvider for SharedSettings {
    fn persist_workspace(&self) -> bool {
        self.inner.read().persist_workspace
    }

    fn sidebar_open(&self) -> bool {
        self.inner.read().sidebar_open
    }
}
