//! Locally persisted client state.
//!
//! Mirrors what the explorer keeps in browser storage: the auth token
//! and the trash list, nothing else. Session-local folders and any
//! restored-but-not-reuploaded files are deliberately absent, so they do
//! not survive a new session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::result::AppResult;
use nimbus_entity::trash::TrashEntry;

/// Client state persisted between invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientState {
    /// Bearer token from the last login, cleared on logout.
    pub token: Option<String>,
    /// The trash list.
    #[serde(default)]
    pub trash: Vec<TrashEntry>,
}

impl ClientState {
    /// Load state from disk. A missing file yields the default state.
    pub fn load(path: &Path) -> AppResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Corrupt client state file: {}", path.display()),
                    e,
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read client state: {}", path.display()),
                e,
            )),
        }
    }

    /// Save state to disk, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Default state file location: `<platform data dir>/nimbus/state.json`,
/// falling back to the working directory.
pub fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nimbus")
        .join("state.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nimbus_core::types::{FileId, UserId};
    use nimbus_entity::file::FileRecord;

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let state = ClientState::load(&dir.path().join("state.json")).unwrap();
        assert!(state.token.is_none());
        assert!(state.trash.is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let record = FileRecord {
            id: FileId::new(),
            owner_id: UserId::new(),
            folder: "docs".to_string(),
            name: "a.txt".to_string(),
            size_bytes: 1,
            mime_type: None,
            storage_key: "k".to_string(),
            uploaded_at: Utc::now(),
        };
        let state = ClientState {
            token: Some("jwt".to_string()),
            trash: vec![TrashEntry::from_record(record, Utc::now())],
        };

        state.save(&path).unwrap();
        let loaded = ClientState::load(&path).unwrap();
        assert_eq!(loaded.token.as_deref(), Some("jwt"));
        assert_eq!(loaded.trash.len(), 1);
        assert_eq!(loaded.trash[0].original_folder, "docs");
    }
}
