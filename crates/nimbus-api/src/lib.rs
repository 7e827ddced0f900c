//! # nimbus-api
//!
//! HTTP layer for Nimbus: Axum router, handlers, DTOs, the bearer-token
//! extractor, and the error → HTTP response mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use router::build_router;
pub use state::AppState;
