//! # nimbus-service
//!
//! Business logic for Nimbus: the upload pipeline, file listing and
//! deletion, and account registration/login. Services are thin
//! orchestrations over the repositories and the object store; they own
//! no state beyond their injected dependencies.

pub mod auth;
pub mod context;
pub mod file;

pub use context::RequestContext;
