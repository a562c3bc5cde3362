//! Board configuration.
//!
//! Settings are read either from a JSON document or from environment
//! variables:
//!
//! - `TASKBOARD_DATABASE_URL` (required)
//! - `TASKBOARD_DB_MAX_CONNECTIONS` (default 8)
//! - `TASKBOARD_JWT_SECRET` (required)
//! - `TASKBOARD_JWT_LEEWAY_SECS` (default 30)
//!
//! A representative JSON document is:
//!
//! ```json
//! {
//!   "database": { "url": "postgres://board@localhost/board", "max_connections": 4 },
//!   "auth": { "jwt_secret": "change-me", "leeway_secs": 10 }
//! }
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

const DATABASE_URL_KEY: &str = "TASKBOARD_DATABASE_URL";
const MAX_CONNECTIONS_KEY: &str = "TASKBOARD_DB_MAX_CONNECTIONS";
const JWT_SECRET_KEY: &str = "TASKBOARD_JWT_SECRET";
const JWT_LEEWAY_KEY: &str = "TASKBOARD_JWT_LEEWAY_SECS";

const DEFAULT_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent or blank.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// A setting is present but unusable.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`BoardConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Database connection settings.
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    url: String,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
}

impl DatabaseConfig {
    /// Creates database settings with the default pool size.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Returns the `PostgreSQL` connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Bearer token validation settings.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    jwt_secret: String,
    #[serde(default = "default_leeway_secs")]
    leeway_secs: u64,
}

impl AuthConfig {
    /// Creates auth settings with the default expiry leeway.
    #[must_use]
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            leeway_secs: DEFAULT_LEEWAY_SECS,
        }
    }

    /// Sets the expiry leeway in seconds.
    #[must_use]
    pub const fn with_leeway_secs(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// Returns the HMAC secret.
    #[must_use]
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Returns the expiry leeway in seconds.
    #[must_use]
    pub const fn leeway_secs(&self) -> u64 {
        self.leeway_secs
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

/// Top-level board configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    database: DatabaseConfig,
    auth: AuthConfig,
}

impl BoardConfig {
    /// Creates a configuration from its sections.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a section fails validation.
    pub fn new(database: DatabaseConfig, auth: AuthConfig) -> Result<Self, ConfigError> {
        let config = Self { database, auth };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is missing or a value
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(&lookup, DATABASE_URL_KEY)?;
        let max_connections =
            parsed_or(&lookup, MAX_CONNECTIONS_KEY, DEFAULT_MAX_CONNECTIONS)?;
        let secret = required(&lookup, JWT_SECRET_KEY)?;
        let leeway_secs = parsed_or(&lookup, JWT_LEEWAY_KEY, DEFAULT_LEEWAY_SECS)?;

        Self::new(
            DatabaseConfig::new(url).with_max_connections(max_connections),
            AuthConfig::new(secret).with_leeway_secs(leeway_secs),
        )
    }

    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed or
    /// validated.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parses configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the database section.
    #[must_use]
    pub const fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    /// Returns the auth section.
    #[must_use]
    pub const fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Missing(DATABASE_URL_KEY));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: MAX_CONNECTIONS_KEY,
                reason: "pool size must be at least 1".to_owned(),
            });
        }
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Missing(JWT_SECRET_KEY));
        }
        Ok(())
    }
}

const fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

const fn default_leeway_secs() -> u64 {
    DEFAULT_LEEWAY_SECS
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parsed_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
        }),
    }
}
