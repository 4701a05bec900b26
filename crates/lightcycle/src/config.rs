//! Client configuration.

use std::env;

/// Default server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default game port of the Tron server.
pub const DEFAULT_PORT: u16 = 4000;

/// Who we are and where to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Name to join with. Also how we recognise our own player.
    pub name: String,
    /// Password for `name`.
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            password: String::new(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ClientConfig {
    /// A config for `name`/`password` against the default server.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// `TRON_NAME` and `TRON_PASSWORD` are required; `TRON_HOST` and
    /// `TRON_PORT` fall back to [`DEFAULT_HOST`] and [`DEFAULT_PORT`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Overrides fields with whichever `TRON_*` variables are set.
    ///
    /// Unlike [`from_env`](Self::from_env) nothing is required and the
    /// result is not validated.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| env::var(key).ok())
    }

    fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ["TRON_NAME", "TRON_PASSWORD"] {
            if lookup(key).is_none() {
                return Err(ConfigError::Missing(key));
            }
        }
        let config = Self::default().merge_vars(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn merge_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("TRON_NAME") {
            self.name = name;
        }
        if let Some(password) = lookup("TRON_PASSWORD") {
            self.password = password;
        }
        if let Some(host) = lookup("TRON_HOST") {
            self.host = host;
        }
        if let Some(raw) = lookup("TRON_PORT") {
            self.port = parse_port(&raw)?;
        }
        Ok(self)
    }

    /// Checks that the config can be used to join a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Missing("name"));
        }
        if self.password.is_empty() {
            return Err(ConfigError::Missing("password"));
        }
        if self.name.contains(['|', '\n']) || self.password.contains(['|', '\n']) {
            return Err(ConfigError::Invalid(
                "name and password must not contain '|' or newlines".into(),
            ));
        }
        if self.host.is_empty() {
            return Err(ConfigError::Missing("host"));
        }
        Ok(())
    }
}

/// Parses a TCP port number.
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidPort(raw.to_string()))
}

/// Configuration errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid port: {0:?}")]
    InvalidPort(String),

    #[error("invalid setting: {0}")]
    Invalid(String),
}
