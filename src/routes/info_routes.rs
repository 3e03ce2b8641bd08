//! The static about page.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::{routing::get, Router};
use minijinja::context;

use crate::state::AppState;
use crate::utils::http_helpers::render_view;

pub fn routes() -> Router<AppState> {
    Router::new().route("/info", get(info))
}

async fn info(State(state): State<AppState>) -> Response {
    render_view(&state, StatusCode::OK, "info.html", context! {})
}
