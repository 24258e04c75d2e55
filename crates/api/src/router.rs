//! Shared application router builder.
//!
//! Both the production binary (`main.rs`) and the integration tests build
//! the router through [`build_router`] so they exercise the same
//! middleware stack.

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers;
use crate::state::AppState;

/// Default request timeout used when no configuration is supplied.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build the full application [`Router`].
pub fn build_router(state: AppState, request_timeout_secs: u64) -> Router {
    Router::new()
        // Health check at root level (not under /api/v1).
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api_routes())
        // -- Middleware stack (applied bottom-up) --
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_secs),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/ratings",
            post(handlers::ratings::submit_rating).get(handlers::ratings::list_ratings),
        )
        .route(
            "/users/{user}/rated-images",
            get(handlers::ratings::rated_images),
        )
        .route(
            "/users/{user}/last-rating",
            delete(handlers::ratings::undo_last_rating),
        )
        .route("/users", delete(handlers::ratings::purge_users))
        .route("/images/flagged", get(handlers::ratings::flagged_images))
        .route(
            "/images/{image_id}/ratings",
            delete(handlers::ratings::purge_image),
        )
        .route("/stats/overview", get(handlers::stats::overview))
        .route("/stats/images", get(handlers::stats::image_stats))
        .route("/stats/users", get(handlers::stats::user_stats))
        .route("/export.csv", get(handlers::export::export_csv))
}
