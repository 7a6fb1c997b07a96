//! HTTP server layer
//!
//! Axum server with:
//! - Server-rendered HTML pages for every wishlist operation
//! - Static files (including uploaded images) from the public dir
//! - Request tracing
//! - Graceful shutdown

pub mod error;
pub mod routes;
pub mod server;
pub mod views;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
