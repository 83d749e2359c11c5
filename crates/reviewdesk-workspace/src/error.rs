// ABOUTME: Error types for workspace initialization, persistence and drag sessions
// ABOUTME: Provides structured error handling with context and proper error chains

use reviewdesk_types::PanelId;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkspaceError>;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(
        "Project information not available for workspace initialization (repository '{repository_url}', branch '{repository_branch}')"
    )]
    MissingProjectContext {
        repository_url: String,
        repository_branch: String,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl WorkspaceError {
    /// Create a missing project context error
    pub fn missing_project_context<U: Into<String>, B: Into<String>>(
        repository_url: U,
        repository_branch: B,
    ) -> Self {
        Self::MissingProjectContext {
            repository_url: repository_url.into(),
            repository_branch: repository_branch.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse workspace data stored under '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize workspace data: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("No data directory available for workspace storage")]
    NoStorageDir,

    #[error("Invalid storage key '{key}'")]
    InvalidKey { key: String },

    #[error("Failed to write workspace data to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Create a parse error for the document under `key`
    pub fn parse<S: Into<String>>(key: S, source: serde_json::Error) -> Self {
        Self::Parse {
            key: key.into(),
            source,
        }
    }

    /// Create an invalid key error
    pub fn invalid_key<S: Into<String>>(key: S) -> Self {
        Self::InvalidKey { key: key.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("A drag of '{file_path}' from panel {panel_id} is already in progress")]
    SessionActive { file_path: String, panel_id: PanelId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_project_context_message() {
        let err = WorkspaceError::missing_project_context("", "main");
        assert!(
            err.to_string()
                .starts_with("Project information not available for workspace initialization")
        );
    }

    #[test]
    fn test_persistence_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: WorkspaceError = PersistenceError::from(io).into();
        assert!(matches!(err, WorkspaceError::Persistence(PersistenceError::Io(_))));
    }
}
