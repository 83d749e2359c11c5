// ABOUTME: Drag session state machine for moving tabs between and out of panels
// ABOUTME: Turns pointer events into drop intents without touching the workspace itself

use reviewdesk_events::PointerPosition;
use reviewdesk_logging::debug;
use reviewdesk_types::{DraggedTab, PanelId};
use std::collections::HashSet;

use crate::error::DragError;
use crate::geometry::{determine_drop_position, in_left_drop_zone, in_right_drop_zone};

/// Coarse state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// Highlight flags for the container's edge drop zones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZones {
    pub left_active: bool,
    pub right_active: bool,
}

/// Highlight flags for one panel body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelHighlight {
    pub is_drag_over: bool,
    pub show_drop_zone: bool,
}

/// An in-flight drag
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub dragged: DraggedTab,
    pub zones: DropZones,
    hovered_panels: HashSet<PanelId>,
}

impl DragSession {
    fn new(dragged: DraggedTab) -> Self {
        Self {
            dragged,
            zones: DropZones::default(),
            hovered_panels: HashSet::new(),
        }
    }
}

/// The layout change a completed drop asks for
#[derive(Debug, Clone, PartialEq)]
pub enum DropIntent {
    MoveToPanel {
        target_panel_id: PanelId,
        dragged: DraggedTab,
        insert_index: Option<usize>,
    },
    MoveToNewPanel {
        dragged: DraggedTab,
        insert_position: usize,
    },
}

/// Result of feeding a drop or drag-end into the controller
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Nothing to do; any session is left as it was
    Ignored,
    /// The session ended without a layout change
    Cancelled,
    Dropped(DropIntent),
}

/// Tracks at most one drag session at a time
#[derive(Debug, Clone)]
pub struct DragDropController {
    session: Option<DragSession>,
    dropzone_width: f64,
}

impl DragDropController {
    pub fn new(dropzone_width: f64) -> Self {
        Self {
            session: None,
            dropzone_width,
        }
    }

    pub fn phase(&self) -> DragPhase {
        match self.session {
            Some(_) => DragPhase::Dragging,
            None => DragPhase::Idle,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn dragged_tab(&self) -> Option<&DraggedTab> {
        self.session.as_ref().map(|s| &s.dragged)
    }

    pub fn drop_zones(&self) -> DropZones {
        self.session.as_ref().map(|s| s.zones).unwrap_or_default()
    }

    pub fn panel_highlight(&self, panel_id: PanelId) -> PanelHighlight {
        let hovered = self
            .session
            .as_ref()
            .is_some_and(|s| s.hovered_panels.contains(&panel_id));
        PanelHighlight {
            is_drag_over: hovered,
            show_drop_zone: hovered,
        }
    }

    /// Begin dragging a tab. Fails if a drag is already in flight.
    pub fn start_drag(&mut self, file_path: &str, panel_id: PanelId) -> Result<(), DragError> {
        if let Some(session) = &self.session {
            return Err(DragError::SessionActive {
                file_path: session.dragged.file_path.clone(),
                panel_id: session.dragged.from_panel_id,
            });
        }

        debug!(file_path, panel_id, "Drag started");
        self.session = Some(DragSession::new(DraggedTab::new(file_path, panel_id)));
        Ok(())
    }

    /// Pointer entered a panel body; only panels other than the origin light up
    pub fn panel_drag_over(&mut self, panel_id: PanelId) {
        if let Some(session) = self.session.as_mut()
            && session.dragged.from_panel_id != panel_id
        {
            session.hovered_panels.insert(panel_id);
        }
    }

    /// Pointer left a panel body. `still_inside` is true when it moved onto a child element.
    pub fn panel_drag_leave(&mut self, panel_id: PanelId, still_inside: bool) {
        if still_inside {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.hovered_panels.remove(&panel_id);
        }
    }

    /// Pointer moved over the split container
    pub fn container_drag_over(&mut self, pointer: PointerPosition) {
        let dropzone_width = self.dropzone_width;
        if let Some(session) = self.session.as_mut() {
            session.zones = DropZones {
                left_active: in_left_drop_zone(pointer.relative_x, dropzone_width),
                right_active: in_right_drop_zone(
                    pointer.relative_x,
                    pointer.container_width,
                    dropzone_width,
                ),
            };
        }
    }

    /// Pointer left the split container
    pub fn container_drag_leave(&mut self, still_inside: bool) {
        if still_inside {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.zones = DropZones::default();
        }
    }

    /// Drop onto an existing panel
    pub fn drop_on_panel(
        &mut self,
        target_panel_id: PanelId,
        insert_index: Option<usize>,
    ) -> DragOutcome {
        let Some(session) = self.session.take() else {
            return DragOutcome::Ignored;
        };

        if session.dragged.from_panel_id == target_panel_id {
            debug!(panel_id = target_panel_id, "Drop on origin panel cancelled");
            return DragOutcome::Cancelled;
        }

        DragOutcome::Dropped(DropIntent::MoveToPanel {
            target_panel_id,
            dragged: session.dragged,
            insert_index,
        })
    }

    /// Drop onto the container; only the edge zones create a panel
    pub fn drop_on_container(
        &mut self,
        pointer: PointerPosition,
        panel_count: usize,
    ) -> DragOutcome {
        let Some(session) = self.session.as_mut() else {
            return DragOutcome::Ignored;
        };
        session.zones = DropZones::default();

        let Some(insert_position) = determine_drop_position(
            pointer.relative_x,
            pointer.container_width,
            self.dropzone_width,
            panel_count,
        ) else {
            debug!(
                relative_x = pointer.relative_x,
                container_width = pointer.container_width,
                "Drop outside edge zones ignored"
            );
            return DragOutcome::Ignored;
        };

        match self.session.take() {
            Some(session) => DragOutcome::Dropped(DropIntent::MoveToNewPanel {
                dragged: session.dragged,
                insert_position,
            }),
            None => DragOutcome::Ignored,
        }
    }

    /// Drag ended; cancels a session that no drop consumed
    pub fn end_drag(&mut self) -> DragOutcome {
        match self.session.take() {
            Some(session) => {
                debug!(file_path = %session.dragged.file_path, "Drag cancelled");
                DragOutcome::Cancelled
            }
            None => DragOutcome::Ignored,
        }
    }
}

impl Default for DragDropController {
    fn default() -> Self {
        Self::new(reviewdesk_types::config::default_dropzone_width())
    }
}
