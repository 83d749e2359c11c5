// ABOUTME: Storage port for the saved workspace collection
// ABOUTME: One JSON document per storage key, backed by files or memory

use parking_lot::Mutex;
use reviewdesk_logging::{debug, info};
use reviewdesk_types::PersistenceConfig;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::PersistenceError;
use crate::model::Workspace;

/// Storage key holding every saved workspace
pub const SAVED_WORKSPACES_KEY: &str = "cc_savedWorkspace";

const APP_DIR_NAME: &str = "reviewdesk";

/// Key/value string storage
pub trait WorkspaceStorage: Send + Sync {
    /// Read the document under `key`, `None` if nothing has been stored
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the document under `key`
    fn write(&self, key: &str, contents: &str) -> Result<(), PersistenceError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the platform data directory, e.g. `~/.local/share/reviewdesk`
    pub fn in_data_dir() -> Result<Self, PersistenceError> {
        let data_dir = dirs::data_dir().ok_or(PersistenceError::NoStorageDir)?;
        Ok(Self::new(data_dir.join(APP_DIR_NAME)))
    }

    /// Storage under `storage_dir` when configured, else the platform data directory
    pub fn from_config(config: &PersistenceConfig) -> Result<Self, PersistenceError> {
        match &config.storage_dir {
            Some(dir) => Ok(Self::new(dir.clone())),
            None => Self::in_data_dir(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PersistenceError::invalid_key(key));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl WorkspaceStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // Write to a sibling temp file and rename so readers never see a partial document
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, contents).map_err(|source| PersistenceError::Write {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| PersistenceError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = contents.len(), "Workspace document written");
        Ok(())
    }
}

/// In-process storage, mainly for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw document under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    /// Seed a raw document, e.g. to simulate corrupt data
    pub fn insert(&self, key: &str, contents: impl Into<String>) {
        self.entries.lock().insert(key.to_string(), contents.into());
    }
}

impl WorkspaceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), PersistenceError> {
        self.insert(key, contents);
        Ok(())
    }
}

/// Serializes the saved workspace collection under one storage key
#[derive(Clone)]
pub struct WorkspacePersistence {
    storage: Arc<dyn WorkspaceStorage>,
    key: String,
}

impl WorkspacePersistence {
    pub fn new(storage: Arc<dyn WorkspaceStorage>) -> Self {
        Self::with_key(storage, SAVED_WORKSPACES_KEY)
    }

    pub fn with_key(storage: Arc<dyn WorkspaceStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load every saved workspace. A missing document is an empty collection.
    pub fn load(&self) -> Result<Vec<Workspace>, PersistenceError> {
        let Some(contents) = self.storage.read(&self.key)? else {
            debug!(key = %self.key, "No saved workspaces");
            return Ok(Vec::new());
        };

        let mut workspaces: Vec<Workspace> = serde_json::from_str(&contents)
            .map_err(|source| PersistenceError::parse(self.key.clone(), source))?;
        for workspace in &mut workspaces {
            workspace.resync_panel_ids();
        }

        info!(key = %self.key, count = workspaces.len(), "Saved workspaces loaded");
        Ok(workspaces)
    }

    /// Replace the stored collection with `workspaces`
    pub fn save(&self, workspaces: &[Workspace]) -> Result<(), PersistenceError> {
        let contents = serde_json::to_string(workspaces).map_err(PersistenceError::Serialize)?;
        self.storage.write(&self.key, &contents)
    }
}

impl std::fmt::Debug for WorkspacePersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspacePersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
