//! Trash entry value object.
//!
//! Trash is a client-side concept: the server deletes the record and blob
//! outright, while the client keeps this copy in its locally persisted
//! trash list. Restoring therefore only re-adds the copy to the client's
//! file list; the backing blob is already gone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::file::FileRecord;

/// A trashed file: a copy of the record plus trash bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashEntry {
    /// The record as it was when trashed.
    #[serde(flatten)]
    pub file: FileRecord,
    /// When the file was moved to trash.
    pub deleted_at: DateTime<Utc>,
    /// The folder the file lived in before trashing.
    pub original_folder: String,
}

impl TrashEntry {
    /// Create a trash entry from a record being deleted.
    pub fn from_record(file: FileRecord, deleted_at: DateTime<Utc>) -> Self {
        let original_folder = file.folder.clone();
        Self {
            file,
            deleted_at,
            original_folder,
        }
    }

    /// Strip the trash bookkeeping, yielding the record to reinsert into
    /// the active file list.
    pub fn into_restored(self) -> FileRecord {
        self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::types::{FileId, UserId};

    #[test]
    fn test_restore_strips_trash_fields() {
        let record = FileRecord {
            id: FileId::new(),
            owner_id: UserId::new(),
            folder: "docs".to_string(),
            name: "a.txt".to_string(),
            size_bytes: 1,
            mime_type: Some("text/plain".to_string()),
            storage_key: "k".to_string(),
            uploaded_at: Utc::now(),
        };
        let entry = TrashEntry::from_record(record.clone(), Utc::now());
        assert_eq!(entry.original_folder, "docs");

        let restored = entry.into_restored();
        assert_eq!(restored.id, record.id);
        assert_eq!(restored.folder, "docs");
    }
}
