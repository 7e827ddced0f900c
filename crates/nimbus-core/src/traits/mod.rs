//! Trait definitions shared across crates.

pub mod object_store;

pub use object_store::{ObjectStore, PutOptions};
