//! Shared application state.
//!
//! Everything a handler may touch is passed in explicitly through this
//! struct; there is no ambient global state.

use std::sync::Arc;

use crate::auth::Credentials;
use crate::config::ConfigV1;
use crate::session::SessionStore;
use crate::store::PageStore;
use crate::views::Views;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The admin login, immutable after startup.
    pub credentials: Arc<Credentials>,
    /// Page persistence.
    pub store: Arc<dyn PageStore>,
    /// Server-side session state keyed by the session cookie.
    pub sessions: Arc<dyn SessionStore>,
    /// Compiled HTML templates.
    pub views: Arc<Views>,
}
