//! Startup configuration, resolved once from the environment.

use std::fmt;
use std::path::PathBuf;

use crate::env_config::{env_non_empty, env_parse_with_default};

pub const AUTH_USERNAME_VAR: &str = "HTTP_AUTH_USERNAME";
pub const AUTH_PASSWORD_VAR: &str = "HTTP_AUTH_PASSWORD";
pub const PORT_VAR: &str = "PORT";
pub const HOST_VAR: &str = "HOST";
pub const DATA_PATH_VAR: &str = "VALUEMAP_DATA";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATA_PATH: &str = "server/data.json";

/// Shared-secret HTTP Basic credentials guarding `/search`.
///
/// Opt-in: the gate is only enabled when both a username and a password are set.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    enabled: bool,
    username: String,
    password: String,
}

impl AuthConfig {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        match (username.filter(|u| !u.is_empty()), password.filter(|p| !p.is_empty())) {
            (Some(username), Some(password)) => Self { enabled: true, username, password },
            _ => Self::disabled(),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::new(env_non_empty(AUTH_USERNAME_VAR), env_non_empty(AUTH_PASSWORD_VAR))
    }

    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the given credentials pass the gate. Always true when disabled.
    pub fn permits(&self, username: &str, password: &str) -> bool {
        !self.enabled || (username == self.username && password == self.password)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("enabled", &self.enabled)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Reads `HOST`, `PORT`, `VALUEMAP_DATA` and the auth variables.
    pub fn from_env() -> Self {
        Self {
            host: env_non_empty(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: env_parse_with_default(PORT_VAR, DEFAULT_PORT),
            data_path: data_path_from_env(),
            auth: AuthConfig::from_env(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn data_path_from_env() -> PathBuf {
    env_non_empty(DATA_PATH_VAR).map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from)
}
