//! File upload, listing, download, and deletion.

pub mod service;
pub mod upload;

pub use service::{DownloadResult, FileService, FolderListing};
pub use upload::{UploadParams, UploadService};
