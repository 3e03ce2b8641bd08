use std::time::Duration;

use serde::Deserialize;

/// Cookie and expiry settings for admin sessions.
#[derive(Deserialize, Debug, Clone)]
pub struct SessionConfig {
    /// Seconds a session may stay unused before it expires.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_idle_timeout_secs() -> u64 {
    60
}

fn default_cookie_name() -> String {
    "flatpage_session".to_string()
}
