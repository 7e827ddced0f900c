//! File listing, download, and deletion.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use nimbus_core::error::AppError;
use nimbus_core::traits::ObjectStore;
use nimbus_core::types::FileId;
use nimbus_database::repositories::file::FileRepository;
use nimbus_entity::file::FileRecord;

use crate::context::RequestContext;
use crate::file::upload::effective_content_type;

/// Handles listing, download, and deletion of file records.
#[derive(Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Object store.
    store: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish()
    }
}

/// A user's files together with the folder set derived from them.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FolderListing {
    /// Distinct folder labels across the user's records.
    pub folders: Vec<String>,
    /// All of the user's records.
    pub files: Vec<FileRecord>,
}

/// Result containing blob content and headers for a download.
#[derive(Debug)]
pub struct DownloadResult {
    /// Blob content.
    pub data: Bytes,
    /// MIME type for the Content-Type header.
    pub content_type: String,
    /// File name for the Content-Disposition header.
    pub filename: String,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(file_repo: Arc<FileRepository>, store: Arc<dyn ObjectStore>) -> Self {
        Self { file_repo, store }
    }

    /// Every record belonging to the caller.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<FileRecord>, AppError> {
        self.file_repo.find_by_owner(ctx.user_id).await
    }

    /// The caller's records plus their derived folder set.
    pub async fn folder_listing(&self, ctx: &RequestContext) -> Result<FolderListing, AppError> {
        let folders = self.file_repo.distinct_folders(ctx.user_id).await?;
        let files = self.file_repo.find_by_owner(ctx.user_id).await?;
        Ok(FolderListing { folders, files })
    }

    /// Deletes a record and its blob.
    ///
    /// The blob is addressed by the key stored on the record, the same
    /// key the upload derived, and is deleted before the record, so a
    /// failure surfaces while the metadata still exists.
    pub async fn delete(&self, ctx: &RequestContext, id: FileId) -> Result<(), AppError> {
        let record = self.find_owned(ctx, id).await?;

        self.store.delete(&record.storage_key).await?;
        self.file_repo.delete(id).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %id,
            key = %record.storage_key,
            "File deleted"
        );
        Ok(())
    }

    /// Reads a record's blob for inline viewing or download.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        id: FileId,
    ) -> Result<DownloadResult, AppError> {
        let record = self.find_owned(ctx, id).await?;
        let data = self.store.get(&record.storage_key).await?;

        let content_type = effective_content_type(&record.name, record.mime_type.as_deref())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Ok(DownloadResult {
            data,
            content_type,
            filename: record.name,
        })
    }

    /// Looks up a record, treating other users' records as absent.
    async fn find_owned(
        &self,
        ctx: &RequestContext,
        id: FileId,
    ) -> Result<FileRecord, AppError> {
        self.file_repo
            .find_by_id(id)
            .await?
            .filter(|record| record.owner_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("File not found"))
    }
}
