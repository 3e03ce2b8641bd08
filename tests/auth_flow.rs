mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::header::SET_COOKIE;
use axum::http::{Method, StatusCode};
use flatpage::session::{MemorySessionStore, SessionData, SessionError, SessionStore};
use uuid::Uuid;

use common::*;

#[tokio::test]
async fn protected_routes_redirect_anonymous_visitors() {
    let app = build_app().await;

    for path in [
        "/admin",
        "/admin/create",
        "/admin/edit/hello",
        "/admin/delete/hello",
    ] {
        let response = get(&app, path, None).await;
        assert_redirect(&response, "/login");
    }

    for path in ["/admin/create", "/admin/edit/hello"] {
        let response = post_form(&app, path, "url=hello&content=Hi", None).await;
        assert_redirect(&response, "/login");
    }

    assert!(!app.pages_dir().join("hello.txt").exists());
}

#[tokio::test]
async fn unknown_session_cookie_is_redirected() {
    let app = build_app().await;
    let cookie = format!("{COOKIE_NAME}={}", Uuid::new_v4());

    let response = get(&app, "/admin", Some(&cookie)).await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn login_form_renders() {
    let app = build_app().await;

    let response = get(&app, "/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(r#"name="username""#));
    assert!(body.contains(r#"name="password""#));
}

#[tokio::test]
async fn login_grants_access_until_logout() {
    let app = build_app().await;
    let cookie = login(&app).await;

    let response = get(&app, "/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Administration"));

    // no need to log in again for the next request
    let response = get(&app, "/admin/create", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_redirect(&response, "/login");
    let cleared = response
        .headers()
        .get(SET_COOKIE)
        .expect("logout should clear the cookie")
        .to_str()
        .unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let response = get(&app, "/admin", Some(&cookie)).await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn empty_fields_are_rejected_before_credentials_are_checked() {
    let app = build_app().await;

    let response = post_form(&app, "/login", &format!("username=&password={PASSWORD}"), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(SET_COOKIE).is_none());
    let body = body_string(response).await;
    assert!(body.contains("A username is required"));
    assert!(!body.contains("Invalid credentials!"));

    let response = post_form(&app, "/login", &format!("username={USERNAME}"), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("A password is required"));
    assert!(!body.contains("A username is required"));

    let response = post_form(&app, "/login", "", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("A username is required"));
    assert!(body.contains("A password is required"));
}

#[tokio::test]
async fn wrong_credentials_rerender_with_ok_status() {
    let app = build_app().await;

    let response = post_form(&app, "/login", "username=admin&password=nope", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(body_string(response).await.contains("Invalid credentials!"));
}

#[tokio::test]
async fn logout_without_session_goes_to_login() {
    let app = build_app().await;

    let response = get(&app, "/logout", None).await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn relogin_replaces_previous_session() {
    let app = build_app().await;
    let first = login(&app).await;

    let response = send(
        &app,
        Method::POST,
        "/login",
        Some(&format!("username={USERNAME}&password={PASSWORD}")),
        Some(&first),
    )
    .await;
    assert_redirect(&response, "/admin");

    let response = get(&app, "/admin", Some(&first)).await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn idle_session_expires() {
    let sessions: Arc<dyn SessionStore> =
        Arc::new(MemorySessionStore::new(Duration::from_millis(150)));
    let app = build_app_with(with_sessions(sessions)).await;
    let cookie = login(&app).await;

    let response = get(&app, "/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(300)).await;

    let response = get(&app, "/admin", Some(&cookie)).await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn admin_responses_refresh_session_cookie() {
    let app = build_app().await;
    let cookie = login(&app).await;

    for response in [
        get(&app, "/admin", Some(&cookie)).await,
        get(&app, "/admin/create", Some(&cookie)).await,
        post_form(&app, "/admin/create", "url=hello&content=Hi", Some(&cookie)).await,
    ] {
        let refreshed = response
            .headers()
            .get(SET_COOKIE)
            .expect("admin response should re-issue the cookie")
            .to_str()
            .unwrap();
        assert!(refreshed.starts_with(&format!("{cookie};")));
        assert!(refreshed.contains("Max-Age=60"));
    }

    let response = get(&app, "/", Some(&cookie)).await;
    assert!(response.headers().get(SET_COOKIE).is_none());
}

/// Session store whose `destroy` always fails.
struct StickySessions(MemorySessionStore);

#[async_trait]
impl SessionStore for StickySessions {
    async fn create(&self, data: SessionData) -> Result<Uuid, SessionError> {
        self.0.create(data).await
    }

    async fn load(&self, id: &Uuid) -> Result<Option<SessionData>, SessionError> {
        self.0.load(id).await
    }

    async fn destroy(&self, _id: &Uuid) -> Result<(), SessionError> {
        Err(SessionError::Backend("unavailable".to_string()))
    }
}

#[tokio::test]
async fn failed_logout_keeps_admin_logged_in() {
    let sessions: Arc<dyn SessionStore> = Arc::new(StickySessions(MemorySessionStore::new(
        Duration::from_secs(60),
    )));
    let app = build_app_with(with_sessions(sessions)).await;
    let cookie = login(&app).await;

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_redirect(&response, "/admin");
    assert!(response.headers().get(SET_COOKIE).is_none());

    let response = get(&app, "/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
