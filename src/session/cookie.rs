//! Session cookie parsing and `Set-Cookie` construction.

use std::time::Duration;

use axum::http::header::{InvalidHeaderValue, COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use uuid::Uuid;

/// Finds the session id in the request's `Cookie` headers.
///
/// Returns `None` when the cookie is missing or does not hold a UUID.
pub fn session_id(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == cookie_name).then(|| val.trim())
        })
        .find_map(|val| Uuid::parse_str(val).ok())
}

/// Builds an `HttpOnly` cookie carrying the session id, expiring with the idle timeout.
pub fn session_cookie(
    cookie_name: &str,
    id: &Uuid,
    max_age: Duration,
) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{cookie_name}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        max_age.as_secs()
    ))
}

/// Builds a cookie that makes the browser drop the session id.
pub fn clear_session_cookie(cookie_name: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{cookie_name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
    ))
}
