// ABOUTME: Configuration data types
// ABOUTME: Pure data structures for layout geometry and workspace persistence settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level workspace configuration, read from `reviewdesk.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

/// Layout geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Width of the edge strips that create a new panel on drop
    #[serde(default = "default_dropzone_width")]
    pub dropzone_width_px: f64,
    /// Smallest pixel width a panel may be dragged to
    #[serde(default = "default_min_panel_width")]
    pub min_panel_width_px: f64,
    /// Smallest size percentage a panel may be resized to
    #[serde(default = "default_min_panel_size_percent")]
    pub min_panel_size_percent: f64,
    /// Width of the sidebar subtracted from divider positions while it is open
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            dropzone_width_px: default_dropzone_width(),
            min_panel_width_px: default_min_panel_width(),
            min_panel_size_percent: default_min_panel_size_percent(),
            sidebar_width_px: default_sidebar_width(),
        }
    }
}

/// Workspace persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Save the layout whenever it changes
    #[serde(default)]
    pub persist_workspace: bool,
    /// Quiet period before a change is written out
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,
    /// Override for the storage directory
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            persist_workspace: false,
            save_debounce_ms: default_save_debounce_ms(),
            storage_dir: None,
        }
    }
}

pub fn default_dropzone_width() -> f64 {
    200.0
}

pub fn default_min_panel_width() -> f64 {
    100.0
}

pub fn default_min_panel_size_percent() -> f64 {
    10.0
}

pub fn default_sidebar_width() -> f64 {
    250.0
}

pub fn default_save_debounce_ms() -> u64 {
    500
}
