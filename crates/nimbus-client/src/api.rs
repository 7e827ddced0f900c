//! HTTP client for the Nimbus server API.

use bytes::Bytes;
use serde::Deserialize;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_core::types::FileId;
use nimbus_entity::file::FileRecord;

use crate::explorer::Listing;

/// Error body returned by the server on failures.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    token: String,
}

/// Client for the Nimbus REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given server, optionally authenticated.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> AppResult<reqwest::RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| AppError::unauthorized("Not logged in. Run `nimbus login` first"))?;
        Ok(req.bearer_auth(token))
    }

    /// POST /auth/register
    pub async fn register(&self, username: &str, email: &str, password: &str) -> AppResult<()> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(request_error)?;

        expect_success(response).await.map(|_| ())
    }

    /// POST /auth/login — returns the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(request_error)?;

        let body: LoginBody = expect_success(response)
            .await?
            .json()
            .await
            .map_err(request_error)?;
        Ok(body.token)
    }

    /// GET /files/folders
    pub async fn folder_listing(&self) -> AppResult<Listing> {
        let response = self
            .authed(self.http.get(self.url("/files/folders")))?
            .send()
            .await
            .map_err(request_error)?;

        expect_success(response)
            .await?
            .json()
            .await
            .map_err(request_error)
    }

    /// POST /files/upload — multipart `file` + `folder`
    pub async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        mime_type: Option<&str>,
        data: Vec<u8>,
    ) -> AppResult<FileRecord> {
        let mut part = reqwest::multipart::Part::bytes(data).file_name(file_name.to_string());
        if let Some(mime) = mime_type {
            part = part
                .mime_str(mime)
                .map_err(|e| AppError::validation(format!("Invalid MIME type: {e}")))?;
        }

        let form = reqwest::multipart::Form::new()
            .text("folder", folder.to_string())
            .part("file", part);

        let response = self
            .authed(self.http.post(self.url("/files/upload")))?
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;

        expect_success(response)
            .await?
            .json()
            .await
            .map_err(request_error)
    }

    /// DELETE /files/{id}
    pub async fn delete_file(&self, id: FileId) -> AppResult<()> {
        let response = self
            .authed(self.http.delete(self.url(&format!("/files/{id}"))))?
            .send()
            .await
            .map_err(request_error)?;

        expect_success(response).await.map(|_| ())
    }

    /// GET /files/{id}/download
    pub async fn download(&self, id: FileId) -> AppResult<Bytes> {
        let response = self
            .authed(self.http.get(self.url(&format!("/files/{id}/download"))))?
            .send()
            .await
            .map_err(request_error)?;

        expect_success(response)
            .await?
            .bytes()
            .await
            .map_err(request_error)
    }
}

fn request_error(e: reqwest::Error) -> AppError {
    AppError::with_source(
        nimbus_core::error::ErrorKind::Internal,
        format!("Request failed: {e}"),
        e,
    )
}

/// Map non-2xx responses to the matching `AppError` kind using the
/// server's `{message}` body.
async fn expect_success(response: reqwest::Response) -> AppResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ApiErrorBody>()
        .await
        .map(|b| b.message)
        .unwrap_or_else(|_| format!("Server returned {status}"));

    Err(match status.as_u16() {
        400 => AppError::validation(message),
        401 => AppError::unauthorized(message),
        404 => AppError::not_found(message),
        409 => AppError::conflict(message),
        _ => AppError::internal(message),
    })
}
