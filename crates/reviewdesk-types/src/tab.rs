// ABOUTME: Tab, panel identifier and workspace key types shared across crates
// ABOUTME: Serialized forms use camelCase to match the saved workspace document

use serde::{Deserialize, Serialize};
use std::fmt;

/// Panel identifier, unique within one workspace
pub type PanelId = u64;

/// An open file inside a panel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Path of the file within the repository
    pub file_path: String,
    /// Panel currently holding this tab
    pub panel_id: PanelId,
}

impl Tab {
    pub fn new(file_path: impl Into<String>, panel_id: PanelId) -> Self {
        Self {
            file_path: file_path.into(),
            panel_id,
        }
    }
}

/// A tab being dragged, remembering the panel the drag started from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggedTab {
    pub file_path: String,
    pub panel_id: PanelId,
    pub from_panel_id: PanelId,
}

impl DraggedTab {
    /// Start dragging `file_path` out of `panel_id`
    pub fn new(file_path: impl Into<String>, panel_id: PanelId) -> Self {
        Self {
            file_path: file_path.into(),
            panel_id,
            from_panel_id: panel_id,
        }
    }
}

/// Identity of a workspace: one layout per repository and branch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceKey {
    pub repository_url: String,
    pub repository_branch: String,
}

impl WorkspaceKey {
    pub fn new(repository_url: impl Into<String>, repository_branch: impl Into<String>) -> Self {
        Self {
            repository_url: repository_url.into(),
            repository_branch: repository_branch.into(),
        }
    }

    /// Both halves of the key are present
    pub fn is_complete(&self) -> bool {
        !self.repository_url.is_empty() && !self.repository_branch.is_empty()
    }
}

impl fmt::Display for WorkspaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repository_url, self.repository_branch)
    }
}

/// What the globally selected file should become after an operation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionChange {
    #[default]
    Unchanged,
    Select(String),
    Clear,
}

impl SelectionChange {
    /// Apply this change to the caller's selected file
    pub fn apply(self, selected_file: &mut Option<String>) {
        match self {
            SelectionChange::Unchanged => {}
            SelectionChange::Select(file_path) => *selected_file = Some(file_path),
            SelectionChange::Clear => *selected_file = None,
        }
    }
}
