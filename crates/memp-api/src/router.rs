//! Route definitions for the MEMP Shore HTTP API.
//!
//! JSON routes are mounted under `/api`; the public upload tree is served
//! statically under `/<public_segment>`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Slack on top of the upload ceiling for multipart framing, so oversized
/// files are rejected by the upload handler with a typed error.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Build the complete Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.attachments.max_upload_size() as usize + MULTIPART_OVERHEAD;
    let public_route = format!("/{}", state.config.attachments.public_segment.trim_matches('/'));

    let api_routes = Router::new()
        .merge(report_routes())
        .merge(attachment_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .nest_service(&public_route, ServeDir::new(state.files.public_root()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Report lifecycle endpoints
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", post(handlers::report::generate_report))
        .route(
            "/reports/{id}",
            get(handlers::report::get_report).delete(handlers::report::delete_report),
        )
        .route(
            "/reports/{id}/regenerate",
            post(handlers::report::regenerate_report),
        )
        .route(
            "/reports/{id}/finalize",
            post(handlers::report::finalize_report),
        )
        .route(
            "/vessels/{vessel_id}/reports",
            get(handlers::report::list_vessel_reports),
        )
}

/// Attachment upload, listing and removal
fn attachment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reports/{id}/attachments",
            post(handlers::attachment::upload_attachment)
                .get(handlers::attachment::list_attachments),
        )
        .route(
            "/attachments/{id}",
            delete(handlers::attachment::delete_attachment),
        )
}

/// Liveness and database check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
