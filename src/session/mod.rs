//! Cookie-bound server-side sessions and the admin guard built on them.

pub mod base;
pub mod cookie;
pub mod guard;
pub mod memory_store;

pub use base::{SessionData, SessionError, SessionStore};
pub use guard::AdminSession;
pub use memory_store::MemorySessionStore;
