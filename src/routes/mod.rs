//! HTTP route definitions and handlers.
//!
//! Routes are grouped by audience: login/logout, the public page views, the
//! session-guarded admin pages, plus static info, health and assets.

mod admin_routes;
mod auth_routes;
mod forms;
mod health_routes;
mod info_routes;
mod page_routes;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info_span, Span};

use crate::state::AppState;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router, mounts the public asset
/// directory under `/public` and attaches the application state.
pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.public_dir);

    Router::new()
        .merge(auth_routes::routes())
        .merge(page_routes::routes())
        .merge(admin_routes::routes())
        .merge(info_routes::routes())
        .merge(health_routes::routes())
        .nest_service("/public", assets)
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .with_state(state)
}

fn make_span(request: &Request<Body>) -> Span {
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
    )
}
