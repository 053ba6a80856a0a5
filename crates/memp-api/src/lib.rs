//! # memp-api
//!
//! HTTP API layer for MEMP Shore built on Axum.
//!
//! Exposes the report lifecycle and attachment endpoints, static serving of
//! the public upload tree, middleware (logging, CORS, compression),
//! extractors, DTOs, and the mapping from `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::{AppState, Repositories};
