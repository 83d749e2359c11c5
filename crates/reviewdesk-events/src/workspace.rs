// ABOUTME: Workspace events for tab selection, drag-and-drop and panel resizing
// ABOUTME: Immutable facts reported by the panel UI about what the user did

use reviewdesk_types::PanelId;

/// Workspace events emitted by the panel UI
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Tab events
    TabSelected {
        file_path: String,
        panel_id: PanelId,
    },

    TabClosed {
        file_path: String,
        panel_id: PanelId,
    },

    TabDragStart {
        file_path: String,
        panel_id: PanelId,
    },

    TabDragEnd,

    TabDrop {
        panel_id: PanelId,
        insert_index: Option<usize>,
    },

    /// Per-panel drag hover
    PanelDragOver {
        panel_id: PanelId,
    },

    PanelDragLeave {
        panel_id: PanelId,
        /// The pointer moved to an element still inside the panel
        still_inside: bool,
    },

    /// Divider between `panel_index` and `panel_index + 1` was dragged
    PanelResize {
        panel_index: usize,
        divider_position_px: f64,
    },

    /// Container-level drag events feeding the edge drop zones
    DropZoneDragOver(PointerPosition),

    DropZoneDragLeave {
        still_inside: bool,
    },

    DropZoneDrop(PointerPosition),

    /// A file was chosen elsewhere in the app, e.g. the file tree
    FileOpened {
        file_path: String,
    },

    /// The split container was laid out with a new width
    ContainerResized {
        width_px: f64,
    },
}

/// Pointer position relative to the left edge of the split container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub relative_x: f64,
    pub container_width: f64,
}

impl PointerPosition {
    pub fn new(relative_x: f64, container_width: f64) -> Self {
        Self {
            relative_x,
            container_width,
        }
    }
}
