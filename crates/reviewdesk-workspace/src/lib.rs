// ABOUTME: Split panel workspace management for the review UI
// ABOUTME: Layout model, drag and resize controllers, store, and persistence port

pub mod collaborators;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod drag_drop;
pub mod error;
pub mod geometry;
pub mod model;
pub mod persistence;
pub mod resize;
pub mod store;

pub use collaborators::{
    ErrorReporter, FileContentProvider, SettingsProvider, SharedSettings, TracingErrorReporter,
};
pub use controller::WorkspaceController;
pub use drag_drop::{DragDropController, DragOutcome, DragPhase, DropIntent, DropZones};
pub use error::{DragError, PersistenceError, Result, WorkspaceError};
pub use geometry::determine_drop_position;
pub use model::{Panel, Workspace};
pub use persistence::{
    FileStorage, MemoryStorage, SAVED_WORKSPACES_KEY, WorkspacePersistence, WorkspaceStorage,
};
pub use resize::ResizeController;
pub use store::{SaveOutcome, WorkspaceStore};
