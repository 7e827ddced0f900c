//! File upload, listing, download, and delete handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use nimbus_core::error::AppError;
use nimbus_core::types::FileId;
use nimbus_entity::file::FileRecord;
use nimbus_service::file::service::FolderListing;
use nimbus_service::file::upload::UploadParams;

use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /files/upload — multipart fields `file` and `folder`
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<FileRecord>, ApiError> {
    let mut folder = String::new();
    let mut file_name: Option<String> = None;
    let mut mime_type: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "folder" => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                mime_type = field.content_type().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let (file_name, data) = match (file_name, data) {
        (Some(name), Some(data)) => (name, data),
        _ => return Err(AppError::validation("No file uploaded").into()),
    };

    let file = state
        .upload_service
        .upload(
            &auth,
            UploadParams {
                folder,
                file_name,
                mime_type,
                data,
            },
        )
        .await?;

    Ok(Json(file))
}

/// GET /files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<FileRecord>>, ApiError> {
    let files = state.file_service.list(&auth).await?;
    Ok(Json(files))
}

/// GET /files/folders
pub async fn folder_listing(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<FolderListing>, ApiError> {
    let listing = state.file_service.folder_listing(&auth).await?;
    Ok(Json(listing))
}

/// DELETE /files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FileId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.file_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// GET /files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FileId>,
) -> Result<Response, ApiError> {
    let result = state.file_service.download(&auth, id).await?;

    // Inline disposition so browsers render the blob in place.
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", result.filename),
        )
        .header(header::CONTENT_LENGTH, result.data.len())
        .body(Body::from(result.data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}
