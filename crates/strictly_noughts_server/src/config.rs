//! Server configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `NOUGHTS_*` environment variables, then command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`ServerConfig::host`].
pub const ENV_HOST: &str = "NOUGHTS_HOST";
/// Environment variable overriding [`ServerConfig::port`].
pub const ENV_PORT: &str = "NOUGHTS_PORT";
/// Environment variable overriding [`ServerConfig::db_path`].
pub const ENV_DB_PATH: &str = "NOUGHTS_DB_PATH";
/// Environment variable overriding the public URL.
pub const ENV_PUBLIC_URL: &str = "NOUGHTS_PUBLIC_URL";
/// Environment variable overriding [`ServerConfig::seed`].
pub const ENV_SEED: &str = "NOUGHTS_SEED";

/// Configuration for the games server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// SQLite database file.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Base URL used in `Location` headers. Derived from the port if unset.
    #[serde(default)]
    #[getter(skip)]
    public_url: Option<String>,

    /// Seed for the coin flip on blank openings. Random if unset.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_db_path() -> String {
    "strictly_noughts.db".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db_path: default_db_path(),
            public_url: None,
            seed: None,
        }
    }
}

/// Values given on the command line. `None` keeps the current setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct ConfigOverrides {
    /// Address to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// SQLite database file.
    pub db_path: Option<String>,
    /// Base URL for `Location` headers.
    pub public_url: Option<String>,
    /// Coin flip seed.
    pub seed: Option<u64>,
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or unknown keys.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, db_path = %config.db_path, "Config loaded");
        Ok(config)
    }

    /// Applies `NOUGHTS_*` variables from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Applies `NOUGHTS_*` variables read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse.
    #[instrument(skip(self, lookup))]
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {ENV_PORT} {port:?}: {e}")))?;
        }
        if let Some(db_path) = lookup(ENV_DB_PATH) {
            self.db_path = db_path;
        }
        if let Some(public_url) = lookup(ENV_PUBLIC_URL) {
            self.public_url = Some(public_url);
        }
        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {ENV_SEED} {seed:?}: {e}")))?;
            self.seed = Some(seed);
        }
        Ok(self)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        let ConfigOverrides {
            host,
            port,
            db_path,
            public_url,
            seed,
        } = overrides;

        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if public_url.is_some() {
            self.public_url = public_url;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Base URL for `Location` headers, without a trailing slash.
    pub fn public_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a configuration error at the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
