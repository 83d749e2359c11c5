// ABOUTME: Dispatches panel UI events to the drag, resize and store components
// ABOUTME: Schedules debounced saves whenever the layout revision moves

use reviewdesk_events::WorkspaceEvent as Event;
use reviewdesk_logging::{debug, warn};
use reviewdesk_types::{SelectionChange, WorkspaceConfig};
use std::time::Instant;

use crate::debounce::SaveDebouncer;
use crate::drag_drop::{DragDropController, DragOutcome};
use crate::resize::ResizeController;
use crate::store::{SaveOutcome, WorkspaceStore};

pub struct WorkspaceController {
    store: WorkspaceStore,
    drag: DragDropController,
    resize: ResizeController,
    debouncer: SaveDebouncer,
}

impl WorkspaceController {
    pub fn new(store: WorkspaceStore, config: &WorkspaceConfig) -> Self {
        let store = store.with_layout(config.layout.clone());
        Self {
            store,
            drag: DragDropController::new(config.layout.dropzone_width_px),
            resize: ResizeController::new(config.layout.min_panel_width_px),
            debouncer: SaveDebouncer::from_millis(config.persistence.save_debounce_ms),
        }
    }

    pub fn store(&self) -> &WorkspaceStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut WorkspaceStore {
        &mut self.store
    }

    pub fn drag(&self) -> &DragDropController {
        &self.drag
    }

    pub fn resize(&self) -> &ResizeController {
        &self.resize
    }

    /// Apply one UI event. Returns how the selected file changed.
    pub fn handle(&mut self, event: &Event, now: Instant) -> SelectionChange {
        let revision = self.store.revision();

        let change = match event {
            Event::TabSelected {
                file_path,
                panel_id,
            } => self.store.select_tab(file_path, *panel_id),

            Event::TabClosed {
                file_path,
                panel_id,
            } => self.store.close_tab(file_path, *panel_id),

            Event::TabDragStart {
                file_path,
                panel_id,
            } => {
                if let Err(err) = self.drag.start_drag(file_path, *panel_id) {
                    warn!(error = %err, file_path = %file_path, "Ignoring drag start");
                }
                SelectionChange::Unchanged
            }

            Event::TabDragEnd => {
                self.drag.end_drag();
                SelectionChange::Unchanged
            }

            Event::TabDrop {
                panel_id,
                insert_index,
            } => {
                let outcome = self.drag.drop_on_panel(*panel_id, *insert_index);
                self.apply_outcome(outcome)
            }

            Event::PanelDragOver { panel_id } => {
                self.drag.panel_drag_over(*panel_id);
                SelectionChange::Unchanged
            }

            Event::PanelDragLeave {
                panel_id,
                still_inside,
            } => {
                self.drag.panel_drag_leave(*panel_id, *still_inside);
                SelectionChange::Unchanged
            }

            Event::PanelResize {
                panel_index,
                divider_position_px,
            } => {
                if !self
                    .store
                    .resize_panel(*panel_index, *divider_position_px, &self.resize)
                {
                    debug!(panel_index, "Resize rejected");
                }
                SelectionChange::Unchanged
            }

            Event::DropZoneDragOver(pointer) => {
                self.drag.container_drag_over(*pointer);
                SelectionChange::Unchanged
            }

            Event::DropZoneDragLeave { still_inside } => {
                self.drag.container_drag_leave(*still_inside);
                SelectionChange::Unchanged
            }

            Event::DropZoneDrop(pointer) => {
                let panel_count = self.store.workspace().panels().len();
                let outcome = self.drag.drop_on_container(*pointer, panel_count);
                self.apply_outcome(outcome)
            }

            Event::FileOpened { file_path } => self.store.open_file(file_path),

            Event::ContainerResized { width_px } => {
                self.resize.set_container_width(*width_px);
                SelectionChange::Unchanged
            }
        };

        if self.store.revision() != revision {
            self.debouncer.register(self.store.revision(), now);
        }

        change
    }

    fn apply_outcome(&mut self, outcome: DragOutcome) -> SelectionChange {
        match outcome {
            DragOutcome::Dropped(intent) => self.store.apply_drop(&intent),
            DragOutcome::Cancelled | DragOutcome::Ignored => SelectionChange::Unchanged,
        }
    }

    /// Save once the debounce window has passed since the last layout change
    pub fn tick(&mut self, now: Instant) -> Option<SaveOutcome> {
        self.debouncer
            .flush_ready(now)
            .map(|_| self.store.save_current_workspace())
    }

    /// Save any pending change immediately
    pub fn flush(&mut self) -> Option<SaveOutcome> {
        self.debouncer
            .flush_now()
            .map(|_| self.store.save_current_workspace())
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }
}
