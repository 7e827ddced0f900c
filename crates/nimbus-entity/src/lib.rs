//! # nimbus-entity
//!
//! Domain entity models for Nimbus. Database entities derive `Debug`,
//! `Clone`, `Serialize`, `Deserialize`, and `sqlx::FromRow`; the trash
//! entry is a client-side value object that never touches the database.

pub mod file;
pub mod trash;
pub mod user;
