//! Login and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing::get, Form, Router};
use minijinja::context;
use tracing::{error, info, warn};

use super::forms::{LoginForm, LOGIN_RULES};
use crate::session::cookie::{clear_session_cookie, session_cookie, session_id};
use crate::session::guard::LOGIN_PATH;
use crate::session::SessionData;
use crate::state::AppState;
use crate::utils::http_helpers::{render_view, HTTPError};
use crate::validation::{validate, FieldError};

pub const ADMIN_PATH: &str = "/admin";
const INVALID_CREDENTIALS: &str = "Invalid credentials!";

/// Registers login/logout routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

async fn login_form(State(state): State<AppState>) -> Response {
    render_view(&state, StatusCode::OK, "login.html", context! {})
}

/// Checks the submitted credentials and, on a match, starts a logged-in session.
///
/// Wrong credentials re-render the form with a 200, just like the plain form
/// display; only missing fields produce a 400.
async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    if let Err(errors) = validate(&form, LOGIN_RULES) {
        return render_view(&state, StatusCode::BAD_REQUEST, "login.html", context! { errors });
    }

    if !state.credentials.matches(&form.username, &form.password) {
        warn!("Rejected login for user '{}'", form.username);
        let errors = vec![FieldError::general(INVALID_CREDENTIALS)];
        return render_view(&state, StatusCode::OK, "login.html", context! { errors });
    }

    let session_config = &state.config.session;

    // A fresh id on every login; the previous session, if any, is dropped.
    if let Some(previous) = session_id(&headers, &session_config.cookie_name) {
        if let Err(e) = state.sessions.destroy(&previous).await {
            warn!("Could not drop previous session: {}", e);
        }
    }

    let id = match state.sessions.create(SessionData { logged_in: true }).await {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to create session: {}", e);
            return HTTPError::internal("Error starting the session").into_response();
        }
    };

    let cookie = match session_cookie(
        &session_config.cookie_name,
        &id,
        session_config.idle_timeout(),
    ) {
        Ok(cookie) => cookie,
        Err(e) => {
            error!("Invalid session cookie: {}", e);
            return HTTPError::internal("Error starting the session").into_response();
        }
    };

    info!("Admin '{}' logged in", form.username);
    ([(SET_COOKIE, cookie)], Redirect::to(ADMIN_PATH)).into_response()
}

/// Destroys the current session. If the session backend fails, the visitor is
/// sent back to the admin page and stays logged in.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookie_name = &state.config.session.cookie_name;
    let Some(id) = session_id(&headers, cookie_name) else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    if let Err(e) = state.sessions.destroy(&id).await {
        error!("Failed to destroy session: {}", e);
        return Redirect::to(ADMIN_PATH).into_response();
    }

    info!("Admin logged out");
    match clear_session_cookie(cookie_name) {
        Ok(cookie) => ([(SET_COOKIE, cookie)], Redirect::to(LOGIN_PATH)).into_response(),
        Err(_) => Redirect::to(LOGIN_PATH).into_response(),
    }
}
