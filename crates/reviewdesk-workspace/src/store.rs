// ABOUTME: Workspace store owning the current layout, selected file and saved layouts
// ABOUTME: All layout mutations go through here so saves and selection stay consistent

use futures::future::join_all;
use reviewdesk_logging::{debug, info};
use reviewdesk_types::{LayoutConfig, PanelId, SelectionChange, WorkspaceConfig, WorkspaceKey};
use std::sync::Arc;

use crate::collaborators::{ErrorReporter, FileContentProvider, SettingsProvider};
use crate::drag_drop::DropIntent;
use crate::error::{PersistenceError, Result, WorkspaceError};
use crate::model::Workspace;
use crate::persistence::{FileStorage, WorkspacePersistence};
use crate::resize::ResizeController;

/// Result of a save request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Persistence is disabled or there is no project to save under
    Skipped,
    Saved,
    /// The write failed and was reported
    Failed,
}

pub struct WorkspaceStore {
    persistence: WorkspacePersistence,
    settings: Arc<dyn SettingsProvider>,
    reporter: Arc<dyn ErrorReporter>,
    layout: LayoutConfig,
    current: Workspace,
    selected_file: Option<String>,
    saved: Vec<Workspace>,
    revision: u64,
}

impl WorkspaceStore {
    pub fn new(
        persistence: WorkspacePersistence,
        settings: Arc<dyn SettingsProvider>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            persistence,
            settings,
            reporter,
            layout: LayoutConfig::default(),
            current: Workspace::default(),
            selected_file: None,
            saved: Vec::new(),
            revision: 0,
        }
    }

    /// Store backed by file storage in the configured or default directory
    pub fn from_config(
        config: &WorkspaceConfig,
        settings: Arc<dyn SettingsProvider>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Result<Self> {
        let storage = FileStorage::from_config(&config.persistence)?;
        debug!(dir = %storage.dir().display(), "Workspace storage opened");
        let persistence = WorkspacePersistence::new(Arc::new(storage));
        Ok(Self::new(persistence, settings, reporter).with_layout(config.layout.clone()))
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn workspace(&self) -> &Workspace {
        &self.current
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    /// Bumped by every mutation that changed the layout
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn settings(&self) -> &dyn SettingsProvider {
        self.settings.as_ref()
    }

    /// Read the saved collection from storage, falling back to empty on failure
    pub fn load_workspaces_from_storage(&mut self) -> &[Workspace] {
        self.saved = match self.persistence.load() {
            Ok(workspaces) => workspaces,
            Err(err) => {
                let message = match err {
                    PersistenceError::Parse { .. } => "Failed to parse workspace data.",
                    _ => "Failed to load workspace data.",
                };
                self.reporter.report(message, &err);
                Vec::new()
            }
        };
        &self.saved
    }

    /// Replace the saved collection without touching storage
    pub fn apply_workspaces(&mut self, workspaces: Vec<Workspace>) {
        self.saved = workspaces;
    }

    pub fn saved_workspaces(&self) -> &[Workspace] {
        &self.saved
    }

    pub fn workspace_by_repository(
        &self,
        repository_url: &str,
        repository_branch: &str,
    ) -> Option<&Workspace> {
        self.saved.iter().find(|w| {
            w.repository_url == repository_url && w.repository_branch == repository_branch
        })
    }

    pub fn has_workspace(&self, key: &WorkspaceKey) -> bool {
        self.workspace_by_repository(&key.repository_url, &key.repository_branch)
            .is_some()
    }

    pub fn exists_non_empty_workspace(
        &self,
        repository_url: &str,
        repository_branch: &str,
    ) -> bool {
        self.workspace_by_repository(repository_url, repository_branch)
            .is_some_and(|w| !w.is_empty())
    }

    /// Make the workspace for `repository_url`/`repository_branch` current.
    ///
    /// Adopts a saved non-empty layout when one exists, otherwise starts empty.
    /// Returns the file paths of every reopened tab.
    pub fn initialize_workspace(
        &mut self,
        repository_url: &str,
        repository_branch: &str,
    ) -> Result<Vec<String>> {
        let key = WorkspaceKey::new(repository_url, repository_branch);
        if !key.is_complete() {
            let err = WorkspaceError::missing_project_context(repository_url, repository_branch);
            self.reporter
                .report("Project information not available for workspace initialization", &err);
            return Err(err);
        }

        let restored = self
            .workspace_by_repository(repository_url, repository_branch)
            .filter(|w| !w.is_empty())
            .cloned();

        match restored {
            Some(mut workspace) => {
                workspace.remove_empty_panels();
                workspace.resync_panel_ids();
                workspace.renormalize_sizes();
                workspace.activate_first_tabs();
                workspace.repository_url = key.repository_url.clone();
                workspace.repository_branch = key.repository_branch.clone();

                self.selected_file = workspace
                    .panels()
                    .first()
                    .and_then(|p| p.active_file())
                    .map(str::to_string);

                info!(
                    workspace = %key,
                    panel_count = workspace.panels().len(),
                    tab_count = workspace.tab_count(),
                    "Workspace restored"
                );
                self.current = workspace;
            }
            None => {
                info!(workspace = %key, "Starting empty workspace");
                self.current = Workspace::new(&key);
                self.selected_file = None;
            }
        }

        Ok(self.open_file_paths())
    }

    /// File paths of every open tab, in panel order
    pub fn open_file_paths(&self) -> Vec<String> {
        self.current
            .panels()
            .iter()
            .flat_map(|p| p.open_tabs.iter())
            .map(|t| t.file_path.clone())
            .collect()
    }

    /// Ask `provider` to cache every open tab's file concurrently
    pub async fn warm_file_cache(
        &self,
        provider: &dyn FileContentProvider,
        auth_token: Option<&str>,
    ) -> usize {
        let repository_url = self.current.repository_url.as_str();
        let repository_branch = self.current.repository_branch.as_str();

        let requests: Vec<_> = self
            .current
            .panels()
            .iter()
            .flat_map(|p| p.open_tabs.iter())
            .map(|tab| {
                provider.cache_file(&tab.file_path, repository_url, repository_branch, auth_token)
            })
            .collect();

        let count = requests.len();
        join_all(requests).await;
        debug!(count, "File cache warmed");
        count
    }

    /// Upsert the current workspace into the saved set and write it out
    pub fn save_current_workspace(&mut self) -> SaveOutcome {
        if !self.settings.persist_workspace() {
            return SaveOutcome::Skipped;
        }

        let key = self.current.key();
        if !key.is_complete() {
            debug!("No project context, workspace not saved");
            return SaveOutcome::Skipped;
        }

        match self.saved.iter_mut().find(|w| w.key() == key) {
            Some(existing) => *existing = self.current.clone(),
            None => self.saved.push(self.current.clone()),
        }

        match self.persistence.save(&self.saved) {
            Ok(()) => {
                debug!(workspace = %key, revision = self.revision, "Workspace saved");
                SaveOutcome::Saved
            }
            Err(err) => {
                self.reporter.report("Failed to save workspace data.", &err);
                SaveOutcome::Failed
            }
        }
    }

    /// Run a model operation, apply its selection change and track the revision
    fn mutate<F>(&mut self, op: F) -> SelectionChange
    where
        F: FnOnce(&mut Workspace, Option<&str>) -> SelectionChange,
    {
        let before = self.current.panels().to_vec();
        let change = op(&mut self.current, self.selected_file.as_deref());
        if self.current.panels() != before.as_slice() {
            self.revision += 1;
        }
        change.clone().apply(&mut self.selected_file);
        change
    }

    pub fn create_panel(&mut self, initial_file_path: Option<&str>) -> PanelId {
        let mut id = 0;
        let change = self.mutate(|workspace, _| {
            id = workspace.create_panel(initial_file_path).id;
            SelectionChange::Unchanged
        });
        debug_assert_eq!(change, SelectionChange::Unchanged);
        id
    }

    pub fn close_panel(&mut self, panel_id: PanelId) -> SelectionChange {
        self.mutate(|workspace, selected| workspace.close_panel(panel_id, selected))
    }

    pub fn add_tab_to_panel(
        &mut self,
        file_path: &str,
        target_panel_id: Option<PanelId>,
    ) -> SelectionChange {
        self.mutate(|workspace, _| workspace.add_tab_to_panel(file_path, target_panel_id))
    }

    /// Show `file_path`, opening a tab in the first panel if it is not open anywhere
    pub fn open_file(&mut self, file_path: &str) -> SelectionChange {
        self.mutate(|workspace, _| workspace.open_file(file_path))
    }

    pub fn select_tab(&mut self, file_path: &str, panel_id: PanelId) -> SelectionChange {
        self.mutate(|workspace, _| workspace.select_tab(file_path, panel_id))
    }

    pub fn close_tab(&mut self, file_path: &str, panel_id: PanelId) -> SelectionChange {
        self.mutate(|workspace, selected| workspace.close_tab(file_path, panel_id, selected))
    }

    /// Carry out a completed drop
    pub fn apply_drop(&mut self, intent: &DropIntent) -> SelectionChange {
        self.mutate(|workspace, _| match intent {
            DropIntent::MoveToPanel {
                target_panel_id,
                dragged,
                insert_index,
            } => workspace.move_tab_between_panels(*target_panel_id, dragged, *insert_index),
            DropIntent::MoveToNewPanel {
                dragged,
                insert_position,
            } => workspace.move_tab_to_new_panel(dragged, *insert_position),
        })
    }

    /// Resize from a divider position in window pixels
    pub fn resize_panel(
        &mut self,
        panel_index: usize,
        divider_position_px: f64,
        resize: &ResizeController,
    ) -> bool {
        let sidebar_offset = if self.settings.sidebar_open() {
            self.layout.sidebar_width_px
        } else {
            0.0
        };

        let Some(percent) = resize.divider_moved(
            self.current.panels(),
            panel_index,
            divider_position_px,
            sidebar_offset,
        ) else {
            return false;
        };

        // The pixel clamp already enforced the minimum width
        let mut resized = false;
        self.mutate(|workspace, _| {
            resized = workspace.resize_panel_pair(panel_index, percent, 0.0);
            SelectionChange::Unchanged
        });
        resized
    }

    /// Resize in percentage space using the configured minimum percentage
    pub fn resize_panel_percent(&mut self, panel_index: usize, new_size_percent: f64) -> bool {
        let min_percent = self.layout.min_panel_size_percent;
        let mut resized = false;
        self.mutate(|workspace, _| {
            resized = workspace.resize_panel_pair(panel_index, new_size_percent, min_percent);
            SelectionChange::Unchanged
        });
        resized
    }
}

impl std::fmt::Debug for WorkspaceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceStore")
            .field("workspace", &self.current.key())
            .field("selected_file", &self.selected_file)
            .field("saved", &self.saved.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
