//! REST API for the on-chain value dashboard.
//!
//! This crate serves the dense chart series the dashboard plots:
//! - Per-asset chart endpoint with a caller-selected step size
//! - Array-of-arrays payloads ready for direct chart consumption
//! - Request tracing and CORS via tower layers

/// Error types.
pub mod error;
/// API response and query models.
pub mod models;
/// Route definitions and handlers.
pub mod routes;
/// Server startup.
pub mod server;
/// Application state.
pub mod state;

pub use error::ApiError;
pub use models::{ChartQuery, ChartResponse};
pub use routes::router;
pub use server::serve;
pub use state::AppState;
