// ABOUTME: Panel and workspace model with the invariant-preserving layout operations
// ABOUTME: Keeps sizes summing to 100, tabs unique per panel, and empty panels removed

use reviewdesk_logging::{debug, info, warn};
use reviewdesk_types::{DraggedTab, PanelId, SelectionChange, Tab, WorkspaceKey};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::geometry::equal_sizes;

/// Total percentage shared by all panels
pub const FULL_WIDTH_PERCENT: f64 = 100.0;

/// A split region holding tabs, one of which may be active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: PanelId,
    #[serde(default)]
    pub open_tabs: Vec<Tab>,
    #[serde(default)]
    pub active_tab: Option<Tab>,
    /// Percentage of the container width
    #[serde(default)]
    pub size: f64,
}

impl Panel {
    /// Create a panel, optionally holding one active tab
    pub fn new(id: PanelId, initial_file_path: Option<&str>) -> Self {
        let open_tabs: Vec<Tab> = initial_file_path
            .map(|file_path| Tab::new(file_path, id))
            .into_iter()
            .collect();
        let active_tab = open_tabs.first().cloned();
        Self {
            id,
            open_tabs,
            active_tab,
            size: FULL_WIDTH_PERCENT,
        }
    }

    pub fn tab_index(&self, file_path: &str) -> Option<usize> {
        self.open_tabs.iter().position(|t| t.file_path == file_path)
    }

    pub fn has_tab(&self, file_path: &str) -> bool {
        self.tab_index(file_path).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.open_tabs.is_empty()
    }

    /// File path of the active tab
    pub fn active_file(&self) -> Option<&str> {
        self.active_tab.as_ref().map(|t| t.file_path.as_str())
    }

    pub fn is_active(&self, file_path: &str) -> bool {
        self.active_file() == Some(file_path)
    }

    /// Make an existing tab active. Returns false if the panel does not hold it.
    pub fn activate(&mut self, file_path: &str) -> bool {
        match self.tab_index(file_path) {
            Some(index) => {
                self.active_tab = Some(self.open_tabs[index].clone());
                true
            }
            None => false,
        }
    }

    /// Insert a tab for `file_path` and make it active, or activate the existing one.
    ///
    /// `insert_index` beyond the end appends. Returns true when a tab was added.
    pub fn insert_or_activate(&mut self, file_path: &str, insert_index: Option<usize>) -> bool {
        if self.activate(file_path) {
            return false;
        }

        let tab = Tab::new(file_path, self.id);
        match insert_index {
            Some(index) if index <= self.open_tabs.len() => {
                self.open_tabs.insert(index, tab.clone())
            }
            _ => self.open_tabs.push(tab.clone()),
        }
        self.active_tab = Some(tab);
        true
    }

    /// Remove a tab; if it was active the first remaining tab becomes active.
    pub fn remove_tab(&mut self, file_path: &str) -> Option<Tab> {
        let index = self.tab_index(file_path)?;
        let removed = self.open_tabs.remove(index);
        if self.is_active(file_path) {
            self.active_tab = self.open_tabs.first().cloned();
        }
        Some(removed)
    }

    /// Ordered file paths of the open tabs
    pub fn file_paths(&self) -> Vec<&str> {
        self.open_tabs.iter().map(|t| t.file_path.as_str()).collect()
    }
}

/// Hands out panel ids; ids are never reused while the counter lives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelIdCounter {
    last: PanelId,
}

impl PanelIdCounter {
    pub fn next_id(&mut self) -> PanelId {
        self.last += 1;
        self.last
    }

    /// Make sure future ids are greater than `max_seen`
    pub fn resync(&mut self, max_seen: PanelId) {
        self.last = self.last.max(max_seen);
    }

    /// The most recently issued id
    pub fn last(&self) -> PanelId {
        self.last
    }
}

/// The full split layout for one repository and branch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub repository_url: String,
    pub repository_branch: String,
    #[serde(default)]
    panels: Vec<Panel>,
    #[serde(skip)]
    panel_ids: PanelIdCounter,
}

/// Layout equality; the id counter is bookkeeping and not compared
impl PartialEq for Workspace {
    fn eq(&self, other: &Self) -> bool {
        self.repository_url == other.repository_url
            && self.repository_branch == other.repository_branch
            && self.panels == other.panels
    }
}

impl Workspace {
    /// An empty workspace for `key`
    pub fn new(key: &WorkspaceKey) -> Self {
        Self {
            repository_url: key.repository_url.clone(),
            repository_branch: key.repository_branch.clone(),
            panels: Vec::new(),
            panel_ids: PanelIdCounter::default(),
        }
    }

    /// Build a workspace from existing panels, e.g. restored from storage
    pub fn from_panels(key: &WorkspaceKey, panels: Vec<Panel>) -> Self {
        let mut workspace = Self::new(key);
        workspace.panels = panels;
        workspace.resync_panel_ids();
        workspace
    }

    pub fn key(&self) -> WorkspaceKey {
        WorkspaceKey::new(self.repository_url.clone(), self.repository_branch.clone())
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, panel_id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == panel_id)
    }

    fn panel_mut(&mut self, panel_id: PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id == panel_id)
    }

    pub fn panel_index(&self, panel_id: PanelId) -> Option<usize> {
        self.panels.iter().position(|p| p.id == panel_id)
    }

    /// First panel holding a tab for `file_path`
    pub fn find_panel_with_file(&self, file_path: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.has_tab(file_path))
    }

    /// Ordered file paths of one panel's tabs, empty for unknown panels
    pub fn current_tabs(&self, panel_id: PanelId) -> Vec<&str> {
        self.panel(panel_id)
            .map(Panel::file_paths)
            .unwrap_or_default()
    }

    /// Active file of one panel
    pub fn active_file(&self, panel_id: PanelId) -> Option<&str> {
        self.panel(panel_id).and_then(Panel::active_file)
    }

    pub fn total_size(&self) -> f64 {
        self.panels.iter().map(|p| p.size).sum()
    }

    pub fn tab_count(&self) -> usize {
        self.panels.iter().map(|p| p.open_tabs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn last_panel_id(&self) -> PanelId {
        self.panel_ids.last()
    }

    /// Give every panel an equal share of the container
    pub fn renormalize_sizes(&mut self) {
        if let Some(size) = equal_sizes(self.panels.len()) {
            for panel in &mut self.panels {
                panel.size = size;
            }
        }
    }

    /// Advance the id counter past every id already in use.
    ///
    /// Panels sharing an id with an earlier panel get a fresh id, along with
    /// their tabs. Returns how many panels were renumbered.
    pub fn resync_panel_ids(&mut self) -> usize {
        let max_seen = self.panels.iter().map(|p| p.id).max().unwrap_or(0);
        self.panel_ids.resync(max_seen);

        let mut seen = HashSet::new();
        let mut renumbered = 0;
        for panel in &mut self.panels {
            if seen.insert(panel.id) {
                continue;
            }

            let id = self.panel_ids.next_id();
            warn!(old_id = panel.id, new_id = id, "Renumbering duplicate panel id");
            panel.id = id;
            for tab in panel.open_tabs.iter_mut().chain(panel.active_tab.as_mut()) {
                tab.panel_id = id;
            }
            seen.insert(id);
            renumbered += 1;
        }
        renumbered
    }

    /// Make the first tab of every panel its active tab
    pub fn activate_first_tabs(&mut self) {
        for panel in &mut self.panels {
            panel.active_tab = panel.open_tabs.first().cloned();
        }
    }

    /// Drop panels without tabs, renormalizing if any were removed
    pub fn remove_empty_panels(&mut self) -> usize {
        let before = self.panels.len();
        self.panels.retain(|p| !p.is_empty());
        let removed = before - self.panels.len();
        if removed > 0 {
            self.renormalize_sizes();
        }
        removed
    }

    /// Append a new panel and renormalize all sizes
    pub fn create_panel(&mut self, initial_file_path: Option<&str>) -> &Panel {
        let id = self.panel_ids.next_id();
        self.panels.push(Panel::new(id, initial_file_path));
        self.renormalize_sizes();

        info!(
            panel_id = id,
            panel_count = self.panels.len(),
            initial_file = ?initial_file_path,
            "Panel created"
        );

        let index = self.panels.len() - 1;
        &self.panels[index]
    }

    /// Remove a panel; reports the new selection if the panel showed `selected_file`.
    pub fn close_panel(
        &mut self,
        panel_id: PanelId,
        selected_file: Option<&str>,
    ) -> SelectionChange {
        let Some(index) = self.panel_index(panel_id) else {
            debug!(panel_id, "Close requested for unknown panel");
            return SelectionChange::Unchanged;
        };

        let closed = self.panels.remove(index);
        self.renormalize_sizes();

        info!(
            panel_id,
            panel_count = self.panels.len(),
            "Panel closed"
        );

        let held_selection = matches!(
            (closed.active_file(), selected_file),
            (Some(active), Some(selected)) if active == selected
        );
        if !held_selection {
            return SelectionChange::Unchanged;
        }

        match self.panels.first().and_then(Panel::active_file) {
            Some(next) => SelectionChange::Select(next.to_string()),
            None => SelectionChange::Clear,
        }
    }

    /// Add a tab to `target_panel_id`, or to the first panel when none is given.
    pub fn add_tab_to_panel(
        &mut self,
        file_path: &str,
        target_panel_id: Option<PanelId>,
    ) -> SelectionChange {
        let target = match target_panel_id {
            Some(panel_id) => match self.panel_mut(panel_id) {
                Some(panel) => panel,
                None => {
                    debug!(panel_id, file_path, "Add tab to unknown panel ignored");
                    return SelectionChange::Unchanged;
                }
            },
            None => {
                if self.panels.is_empty() {
                    self.create_panel(None);
                }
                &mut self.panels[0]
            }
        };

        let panel_id = target.id;
        if target.insert_or_activate(file_path, None) {
            debug!(panel_id, file_path, "Tab opened");
        }

        SelectionChange::Select(file_path.to_string())
    }

    /// Activate `file_path` in whichever panel already has it, else add it to the first panel
    pub fn open_file(&mut self, file_path: &str) -> SelectionChange {
        match self.find_panel_with_file(file_path).map(|p| p.id) {
            Some(panel_id) => self.select_tab(file_path, panel_id),
            None => self.add_tab_to_panel(file_path, None),
        }
    }

    pub fn select_tab(&mut self, file_path: &str, panel_id: PanelId) -> SelectionChange {
        let Some(panel) = self.panel_mut(panel_id) else {
            return SelectionChange::Unchanged;
        };

        if panel.activate(file_path) {
            SelectionChange::Select(file_path.to_string())
        } else {
            SelectionChange::Unchanged
        }
    }

    /// Close a tab, closing its panel too when it was the last one.
    pub fn close_tab(
        &mut self,
        file_path: &str,
        panel_id: PanelId,
        selected_file: Option<&str>,
    ) -> SelectionChange {
        let Some(panel) = self.panel_mut(panel_id) else {
            return SelectionChange::Unchanged;
        };

        let was_active = panel.is_active(file_path);
        if panel.remove_tab(file_path).is_none() {
            return SelectionChange::Unchanged;
        }

        debug!(panel_id, file_path, "Tab closed");

        let change = if panel.is_empty() {
            // The closed tab stays the panel's active tab until the panel goes,
            // so the panel close can hand the selection on.
            panel.active_tab = was_active.then(|| Tab::new(file_path, panel_id));
            self.close_panel(panel_id, selected_file)
        } else if was_active {
            match panel.active_file() {
                Some(next) => SelectionChange::Select(next.to_string()),
                None => SelectionChange::Unchanged,
            }
        } else {
            SelectionChange::Unchanged
        };

        if self.panels.is_empty() {
            SelectionChange::Clear
        } else {
            change
        }
    }

    /// Take a tab out of its source panel, closing the panel if it empties.
    ///
    /// Returns None if the source panel does not hold the tab.
    fn detach_dragged(&mut self, dragged: &DraggedTab) -> Option<bool> {
        let source = self.panel_mut(dragged.from_panel_id)?;
        source.remove_tab(&dragged.file_path)?;
        Some(source.is_empty())
    }

    /// Move a dragged tab into another existing panel.
    pub fn move_tab_between_panels(
        &mut self,
        target_panel_id: PanelId,
        dragged: &DraggedTab,
        insert_index: Option<usize>,
    ) -> SelectionChange {
        if dragged.from_panel_id == target_panel_id {
            debug!(
                panel_id = target_panel_id,
                file_path = %dragged.file_path,
                "Tab dropped on its own panel"
            );
            return SelectionChange::Unchanged;
        }

        let source_holds_tab = self
            .panel(dragged.from_panel_id)
            .is_some_and(|p| p.has_tab(&dragged.file_path));
        if !source_holds_tab || self.panel(target_panel_id).is_none() {
            debug!(
                from_panel_id = dragged.from_panel_id,
                to_panel_id = target_panel_id,
                file_path = %dragged.file_path,
                "Move between panels ignored"
            );
            return SelectionChange::Unchanged;
        }

        let source_emptied = self.detach_dragged(dragged).unwrap_or(false);

        if let Some(target) = self.panel_mut(target_panel_id) {
            target.insert_or_activate(&dragged.file_path, insert_index);
        }

        if source_emptied {
            self.close_panel(dragged.from_panel_id, None);
        }

        info!(
            from_panel_id = dragged.from_panel_id,
            to_panel_id = target_panel_id,
            file_path = %dragged.file_path,
            "Tab moved"
        );

        SelectionChange::Select(dragged.file_path.clone())
    }

    /// Move a dragged tab into a brand-new panel spliced in at `insert_position`.
    pub fn move_tab_to_new_panel(
        &mut self,
        dragged: &DraggedTab,
        insert_position: usize,
    ) -> SelectionChange {
        let Some(source_emptied) = self.detach_dragged(dragged) else {
            debug!(
                from_panel_id = dragged.from_panel_id,
                file_path = %dragged.file_path,
                "Move to new panel ignored"
            );
            return SelectionChange::Unchanged;
        };

        let id = self.panel_ids.next_id();
        let index = insert_position.min(self.panels.len());
        self.panels
            .insert(index, Panel::new(id, Some(dragged.file_path.as_str())));
        self.renormalize_sizes();

        if source_emptied {
            self.close_panel(dragged.from_panel_id, None);
        }

        info!(
            from_panel_id = dragged.from_panel_id,
            panel_id = id,
            position = index,
            panel_count = self.panels.len(),
            file_path = %dragged.file_path,
            "Tab moved to new panel"
        );

        SelectionChange::Select(dragged.file_path.clone())
    }

    /// Resize the panel at `panel_index` against its right neighbour, in percent.
    ///
    /// The pair keeps its combined size and neither side drops below `min_percent`.
    pub fn resize_panel_pair(
        &mut self,
        panel_index: usize,
        new_size_percent: f64,
        min_percent: f64,
    ) -> bool {
        if panel_index + 1 >= self.panels.len() || !new_size_percent.is_finite() {
            return false;
        }

        let total = self.panels[panel_index].size + self.panels[panel_index + 1].size;
        let upper = (total - min_percent).max(min_percent);
        let current = new_size_percent.clamp(min_percent, upper).min(total);

        self.panels[panel_index].size = current;
        self.panels[panel_index + 1].size = total - current;

        debug!(
            panel_index,
            current_size = current,
            next_size = total - current,
            "Panels resized"
        );
        true
    }
}
