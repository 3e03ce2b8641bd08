use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session backend failure: {0}")]
    Backend(String),
}

/// State kept per browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    pub logged_in: bool,
}

/// The SessionStore trait abstracts session persistence (create, load, destroy).
///
/// Implementations own expiry: `load` must report an expired session as absent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, data: SessionData) -> Result<Uuid, SessionError>;
    async fn load(&self, id: &Uuid) -> Result<Option<SessionData>, SessionError>;
    /// Removes the session. Destroying an unknown id is not an error.
    async fn destroy(&self, id: &Uuid) -> Result<(), SessionError>;
}
