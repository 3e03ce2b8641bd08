use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponseParts, Redirect, ResponseParts};
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::cookie::{session_cookie, session_id};
use crate::state::AppState;

/// Where anonymous visitors of admin routes are sent.
pub const LOGIN_PATH: &str = "/login";

/// Extractor for admin-only handlers: present only when the request carries a
/// live, logged-in session. Anything else is answered with a redirect to the
/// login page, never with an error status.
///
/// Returned as a response part it re-issues the session cookie, so the
/// browser's `Max-Age` restarts together with the server-side idle clock.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub id: Uuid,
    cookie: Option<HeaderValue>,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_config = &state.config.session;
        let Some(id) = session_id(&parts.headers, &session_config.cookie_name) else {
            debug!("No session cookie on admin request");
            return Err(Redirect::to(LOGIN_PATH));
        };

        match state.sessions.load(&id).await {
            Ok(Some(data)) if data.logged_in => {
                let cookie = session_cookie(
                    &session_config.cookie_name,
                    &id,
                    session_config.idle_timeout(),
                )
                .map_err(|e| warn!("Cannot refresh session cookie: {}", e))
                .ok();
                Ok(AdminSession { id, cookie })
            }
            Ok(_) => {
                debug!("Session is absent, expired or anonymous");
                Err(Redirect::to(LOGIN_PATH))
            }
            Err(e) => {
                error!("Session lookup failed: {}", e);
                Err(Redirect::to(LOGIN_PATH))
            }
        }
    }
}

impl IntoResponseParts for AdminSession {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(cookie) = self.cookie {
            res.headers_mut().insert(SET_COOKIE, cookie);
        }
        Ok(res)
    }
}
