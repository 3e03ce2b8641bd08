//! Session-guarded administration: landing page and page create/edit/delete.
//!
//! Every handler takes an [`AdminSession`], so anonymous requests are
//! redirected to the login page before any form is read or file touched.
//! Handlers hand the session back as a response part, which re-issues the
//! session cookie on every admin response.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing::get, Form, Router};
use minijinja::context;
use tracing::{error, info, warn};

use super::auth_routes::ADMIN_PATH;
use super::forms::{PageForm, CREATE_RULES, EDIT_RULES};
use super::page_routes::{NO_PAGES, PAGE_NOT_FOUND};
use crate::models::Slug;
use crate::session::AdminSession;
use crate::state::AppState;
use crate::utils::http_helpers::{render_view, HTTPError};
use crate::validation::validate;

const CREATE_FAILED: &str = "Error creating the page";
const EDIT_FAILED: &str = "Error editing the page";
const DELETE_FAILED: &str = "Error deleting the page";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_home))
        .route("/admin/create", get(create_form).post(create_page))
        .route("/admin/edit/{name}", get(edit_form).post(edit_page))
        .route("/admin/delete/{name}", get(delete_page))
}

async fn admin_home(admin: AdminSession, State(state): State<AppState>) -> Response {
    let response = match state.store.list().await {
        Ok(pages) => render_view(&state, StatusCode::OK, "admin.html", context! { pages }),
        Err(e) => {
            error!("Failed to list pages for admin: {}", e);
            HTTPError::internal(NO_PAGES).into_response()
        }
    };
    (admin, response).into_response()
}

async fn create_form(admin: AdminSession, State(state): State<AppState>) -> Response {
    let response = render_view(&state, StatusCode::OK, "create.html", context! {});
    (admin, response).into_response()
}

/// Writes `<url>.txt`, silently replacing any page with the same slug.
async fn create_page(
    admin: AdminSession,
    State(state): State<AppState>,
    Form(form): Form<PageForm>,
) -> Response {
    (admin, save_new_page(&state, form).await).into_response()
}

async fn save_new_page(state: &AppState, form: PageForm) -> Response {
    if let Err(errors) = validate(&form, CREATE_RULES) {
        return render_view(
            state,
            StatusCode::BAD_REQUEST,
            "create.html",
            context! { errors, url => form.url, content => form.content },
        );
    }
    // CREATE_RULES already accepts only valid slugs; this is the type conversion.
    let Some(slug) = Slug::parse(&form.url) else {
        return HTTPError::internal(CREATE_FAILED).into_response();
    };

    match state.store.write(&slug, &form.content).await {
        Ok(()) => {
            info!("Saved page '{}'", slug);
            Redirect::to(ADMIN_PATH).into_response()
        }
        Err(e) => {
            error!("Failed to create page '{}': {}", slug, e);
            HTTPError::internal(CREATE_FAILED).into_response()
        }
    }
}

/// Shows the edit form pre-filled with the page's current content.
async fn edit_form(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let response = match Slug::parse(&name) {
        None => HTTPError::not_found(PAGE_NOT_FOUND).into_response(),
        Some(slug) => match state.store.read(&slug).await {
            Ok(content) => render_view(
                &state,
                StatusCode::OK,
                "edit.html",
                context! { url => slug.as_str(), content },
            ),
            Err(e) => {
                warn!("Cannot edit page '{}': {}", slug, e);
                HTTPError::not_found(PAGE_NOT_FOUND).into_response()
            }
        },
    };
    (admin, response).into_response()
}

/// Replaces the page's content. The slug comes from the route and is not
/// part of the validated form.
async fn edit_page(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<PageForm>,
) -> Response {
    (admin, update_page(&state, name, form).await).into_response()
}

async fn update_page(state: &AppState, name: String, form: PageForm) -> Response {
    if let Err(errors) = validate(&form, EDIT_RULES) {
        return render_view(
            state,
            StatusCode::BAD_REQUEST,
            "edit.html",
            context! { errors, url => name, content => form.content },
        );
    }

    let Some(slug) = Slug::parse(&name) else {
        warn!("Refusing to edit page with unusable name");
        return HTTPError::internal(EDIT_FAILED).into_response();
    };

    match state.store.write(&slug, &form.content).await {
        Ok(()) => {
            info!("Updated page '{}'", slug);
            Redirect::to(ADMIN_PATH).into_response()
        }
        Err(e) => {
            error!("Failed to edit page '{}': {}", slug, e);
            HTTPError::internal(EDIT_FAILED).into_response()
        }
    }
}

/// Deletes without confirmation. A page that does not exist is reported like
/// any other filesystem failure.
async fn delete_page(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    (admin, remove_page(&state, &name).await).into_response()
}

async fn remove_page(state: &AppState, name: &str) -> Response {
    let Some(slug) = Slug::parse(name) else {
        warn!("Refusing to delete page with unusable name");
        return HTTPError::internal(DELETE_FAILED).into_response();
    };

    match state.store.delete(&slug).await {
        Ok(()) => {
            info!("Deleted page '{}'", slug);
            Redirect::to(ADMIN_PATH).into_response()
        }
        Err(e) => {
            error!("Failed to delete page '{}': {}", slug, e);
            HTTPError::internal(DELETE_FAILED).into_response()
        }
    }
}
