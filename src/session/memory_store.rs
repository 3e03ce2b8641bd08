use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::base::{SessionData, SessionError, SessionStore};

#[derive(Debug)]
struct Entry {
    data: SessionData,
    last_seen: Instant,
}

/// In-process session store with an idle timeout.
///
/// Every successful `load` refreshes the idle clock; a session left unused for
/// longer than `idle_timeout` is dropped on its next lookup.
pub struct MemorySessionStore {
    idle_timeout: Duration,
    sessions: RwLock<HashMap<Uuid, Entry>>,
}

impl MemorySessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of sessions currently held, expired ones included.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, data: SessionData) -> Result<Uuid, SessionError> {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        let idle_timeout = self.idle_timeout;
        sessions.retain(|_, entry| entry.last_seen.elapsed() < idle_timeout);
        sessions.insert(
            id,
            Entry {
                data,
                last_seen: Instant::now(),
            },
        );
        debug!("Created session; {} active", sessions.len());
        Ok(id)
    }

    async fn load(&self, id: &Uuid) -> Result<Option<SessionData>, SessionError> {
        let mut sessions = self.sessions.write().await;
        let Some(entry) = sessions.get_mut(id) else {
            return Ok(None);
        };
        if entry.last_seen.elapsed() >= self.idle_timeout {
            sessions.remove(id);
            debug!("Session expired after idle timeout");
            return Ok(None);
        }
        entry.last_seen = Instant::now();
        Ok(Some(entry.data.clone()))
    }

    async fn destroy(&self, id: &Uuid) -> Result<(), SessionError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}
