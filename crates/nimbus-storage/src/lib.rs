//! # nimbus-storage
//!
//! Object-store implementations for Nimbus (local filesystem and
//! S3-compatible backends) plus the upload staging area.

pub mod providers;
pub mod staging;

use std::sync::Arc;

use nimbus_core::config::StorageConfig;
use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_core::traits::ObjectStore;

/// Construct the object store selected by configuration.
pub async fn build_object_store(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    match config.provider.as_str() {
        "local" => {
            let store = providers::local::LocalObjectStore::new(&config.local.root_path).await?;
            Ok(Arc::new(store))
        }
        "s3" => {
            let store = providers::s3::S3ObjectStore::new(&config.s3).await?;
            Ok(Arc::new(store))
        }
        other => Err(AppError::configuration(format!(
            "Unknown storage provider '{other}' (expected 'local' or 's3')"
        ))),
    }
}
