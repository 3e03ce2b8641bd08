//! Public page views: the index and single pages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use minijinja::context;
use tracing::error;

use crate::models::Slug;
use crate::state::AppState;
use crate::store::StoreError;
use crate::utils::http_helpers::{render_view, HTTPError};

pub const PAGE_NOT_FOUND: &str = "Page not found";
pub const NO_PAGES: &str = "No pages to load!";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/page/{name}", get(show_page))
}

/// Lists every stored page.
async fn index(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(pages) => render_view(&state, StatusCode::OK, "index.html", context! { pages }),
        Err(e) => {
            error!("Failed to list pages: {}", e);
            HTTPError::internal(NO_PAGES).into_response()
        }
    }
}

async fn show_page(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(slug) = Slug::parse(&name) else {
        return HTTPError::not_found(PAGE_NOT_FOUND).into_response();
    };

    match state.store.read(&slug).await {
        Ok(content) => render_view(
            &state,
            StatusCode::OK,
            "page.html",
            context! { name => slug.as_str(), content },
        ),
        Err(StoreError::NotFound(_)) => HTTPError::not_found(PAGE_NOT_FOUND).into_response(),
        Err(e) => {
            error!("Failed to read page '{}': {}", slug, e);
            HTTPError::not_found(PAGE_NOT_FOUND).into_response()
        }
    }
}
