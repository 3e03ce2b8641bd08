use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

/// A general purpose HTTP error: a status code and a static plain-text message.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Converts our `HTTPError` into an HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        (
            self.status,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.message,
        )
            .into_response()
    }
}

/// Renders `template` with `ctx` as an HTML response with the given status.
/// A template failure becomes a 500.
pub fn render_view<S: Serialize>(
    state: &AppState,
    status: StatusCode,
    template: &str,
    ctx: S,
) -> Response {
    match state.views.render(template, ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render {}: {}", template, e);
            HTTPError::internal("Error rendering the page").into_response()
        }
    }
}
