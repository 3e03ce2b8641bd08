use std::fmt;

use tracing::debug;

/// The single admin username/password pair, fixed for the process lifetime.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exact, case-sensitive comparison of both fields.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        debug!("Login attempt for user '{}'", username);
        self.username == username && self.password == password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
