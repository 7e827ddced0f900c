//! File record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nimbus_core::types::{FileId, UserId};

/// Metadata describing one uploaded blob.
///
/// The `folder` field is a free-form label, not a reference to a managed
/// entity: a user's folder set is simply the distinct set of labels
/// across their records. Records are created on upload and deleted on
/// explicit delete; nothing updates them in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    /// Unique record identifier.
    pub id: FileId,
    /// The owning user.
    pub owner_id: UserId,
    /// Folder label the file was uploaded under.
    pub folder: String,
    /// The original file name (including extension).
    pub name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type as supplied by the uploader.
    pub mime_type: Option<String>,
    /// The derived object-store key addressing the blob.
    pub storage_key: String,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
}

impl FileRecord {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
///
/// The id is generated before insertion because the object-store key is
/// derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRecord {
    /// Pre-generated record identifier.
    pub id: FileId,
    /// The owning user.
    pub owner_id: UserId,
    /// Folder label.
    pub folder: String,
    /// Original file name.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Derived object-store key.
    pub storage_key: String,
}
