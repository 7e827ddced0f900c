//! # nimbus-database
//!
//! PostgreSQL access for Nimbus: pool construction, embedded migrations,
//! and the repository implementations.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
