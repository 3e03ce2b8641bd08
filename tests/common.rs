#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use flatpage::config::{AdminConfig, ConfigV1, LoggingConfig, SessionConfig};
use flatpage::routes::create_router;
use flatpage::session::SessionStore;
use flatpage::startup::build_state;
use flatpage::state::AppState;
use tempfile::TempDir;
use tower::ServiceExt;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "s3cret";
pub const COOKIE_NAME: &str = "flatpage_session";

pub struct TestApp {
    pub router: Router,
    /// Holds the temporary pages directory for the lifetime of the test.
    pub dir: TempDir,
}

impl TestApp {
    pub fn pages_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("pages")
    }
}

pub fn test_config(dir: &TempDir) -> ConfigV1 {
    ConfigV1 {
        bind_address: "127.0.0.1:0".to_string(),
        pages_dir: dir.path().join("pages"),
        public_dir: dir.path().join("public"),
        admin: AdminConfig {
            username: Some(USERNAME.to_string()),
            password: Some(PASSWORD.to_string()),
        },
        session: SessionConfig {
            idle_timeout_secs: 60,
            cookie_name: COOKIE_NAME.to_string(),
        },
        logging: LoggingConfig::default(),
    }
}

pub async fn test_state(dir: &TempDir) -> AppState {
    build_state(Arc::new(test_config(dir)))
        .await
        .expect("state should build")
}

pub async fn build_app() -> TestApp {
    build_app_with(|_| {}).await
}

/// Builds the app after letting the test adjust the state, e.g. to swap the
/// session store.
pub async fn build_app_with(adjust: impl FnOnce(&mut AppState)) -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = test_state(&dir).await;
    adjust(&mut state);
    TestApp {
        router: create_router(state),
        dir,
    }
}

pub fn with_sessions(sessions: Arc<dyn SessionStore>) -> impl FnOnce(&mut AppState) {
    move |state: &mut AppState| state.sessions = sessions
}

pub async fn send(
    app: &TestApp,
    method: Method,
    path: &str,
    body: Option<&str>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("request should complete")
}

pub async fn get(app: &TestApp, path: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::GET, path, None, cookie).await
}

pub async fn post_form(
    app: &TestApp,
    path: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, path, Some(body), cookie).await
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("Location header missing")
        .to_str()
        .expect("Location header not valid UTF-8")
}

pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}

/// Logs in with the test credentials and returns the `name=value` cookie pair.
pub async fn login(app: &TestApp) -> String {
    let response = post_form(
        app,
        "/login",
        &format!("username={USERNAME}&password={PASSWORD}"),
        None,
    )
    .await;
    assert_redirect(&response, "/admin");

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("Set-Cookie header missing")
        .to_str()
        .expect("Set-Cookie not valid UTF-8");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}
