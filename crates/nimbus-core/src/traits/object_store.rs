//! Object-store trait for pluggable blob storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Attributes attached to a blob when it is written.
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// MIME type stored with the object, served back on reads.
    pub content_type: Option<String>,
    /// Content-Disposition stored with the object. Nimbus uploads use
    /// `inline` so browsers render blobs in place instead of downloading.
    pub content_disposition: Option<String>,
}

impl PutOptions {
    /// Options for an inline-viewable object with the given MIME type.
    pub fn inline(content_type: Option<String>) -> Self {
        Self {
            content_type,
            content_disposition: Some("inline".to_string()),
        }
    }
}

/// Trait for blob storage backends.
///
/// Implementations exist for the local filesystem and S3-compatible
/// object stores. The trait is defined here in `nimbus-core` and
/// implemented in `nimbus-storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write a blob under the given key, overwriting any existing object.
    async fn put(&self, key: &str, data: Bytes, opts: &PutOptions) -> AppResult<()>;

    /// Read a blob into memory as a complete byte vector.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Delete the blob at the given key. Deleting a missing key is not an
    /// error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a blob exists at the given key.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
