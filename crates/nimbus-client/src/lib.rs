//! # nimbus-client
//!
//! Client-side library for the Nimbus CLI: the HTTP API client, the
//! file-explorer view model, registration form validation, and the
//! locally persisted client state (token + trash list).

pub mod api;
pub mod explorer;
pub mod register;
pub mod state;
