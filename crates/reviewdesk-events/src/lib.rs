// ABOUTME: Cross-crate event definitions for decoupled communication
// ABOUTME: The UI layer emits these and the workspace controller consumes them

pub mod workspace;

pub use workspace::{Event as WorkspaceEvent, PointerPosition};
