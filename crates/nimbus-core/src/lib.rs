//! # nimbus-core
//!
//! Core crate for Nimbus. Contains the unified error system, typed
//! identifiers, object-key derivation, configuration schemas, and the
//! object-store trait.
//!
//! This crate has **no** internal dependencies on other Nimbus crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
