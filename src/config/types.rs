use std::fmt;
use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LoggingConfig;
use super::session::SessionConfig;
use crate::auth::Credentials;

/// Default location of the optional YAML configuration file.
pub const CONFIG_PATH: &str = "./config.yaml";

/// Environment variables carrying the admin credentials.
pub const USERNAME_VAR: &str = "ADMIN_USERNAME";
pub const PASSWORD_VAR: &str = "ADMIN_PASSWORD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Figment(#[from] figment::Error),
    #[error("missing admin credential: set the {0} environment variable")]
    MissingCredential(&'static str),
}

/// A top-level enum for versioned configurations.
#[derive(Deserialize)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Debug, Clone)]
pub struct ConfigV1 {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Directory holding one `<slug>.txt` file per page.
    #[serde(default = "default_pages_dir")]
    pub pages_dir: PathBuf,
    /// Directory served under `/public`.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The single shared admin login. Usually supplied through the environment.
#[derive(Deserialize, Default, Clone)]
pub struct AdminConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ConfigV1 {
    /// Returns the configured admin credentials, failing when either half is missing or empty.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let username = self
            .admin
            .username
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingCredential(USERNAME_VAR))?;
        let password = self
            .admin
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingCredential(PASSWORD_VAR))?;
        Ok(Credentials::new(username, password))
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from("./pages")
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("./public")
}

/// Builds the layered configuration source: defaults, then the YAML file, then
/// `FLATPAGE_`-prefixed environment variables (`__` separates nested keys).
pub fn figment(path: &str) -> Figment {
    Figment::new()
        .merge(Serialized::default("version", "1.0.0"))
        .merge(Yaml::file(path))
        .merge(Env::prefixed("FLATPAGE_").split("__"))
}

/// Extracts a `ConfigV1` from any figment.
pub fn extract(figment: &Figment) -> Result<ConfigV1, ConfigError> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from "./config.yaml" and the environment.
///
/// `ADMIN_USERNAME` and `ADMIN_PASSWORD` always win over file values and are
/// read verbatim, so passwords such as `007` keep their exact text.
pub fn load_config() -> Result<ConfigV1, ConfigError> {
    let mut config = extract(&figment(CONFIG_PATH))?;
    if let Ok(username) = std::env::var(USERNAME_VAR) {
        config.admin.username = Some(username);
    }
    if let Ok(password) = std::env::var(PASSWORD_VAR) {
        config.admin.password = Some(password);
    }
    config.credentials()?;
    Ok(config)
}
