// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer for all other reviewdesk crates

pub mod config;
pub mod tab;

// Re-export commonly used types
pub use config::{LayoutConfig, PersistenceConfig, WorkspaceConfig};
pub use tab::{DraggedTab, PanelId, SelectionChange, Tab, WorkspaceKey};
