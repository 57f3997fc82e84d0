/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration.
 *
 * # Configuration Sources
 *
 * Values are layered, later sources winning:
 *
 * 1. Built-in defaults suitable for local development
 * 2. An optional TOML file named by `POCKETCHAT_CONFIG`
 * 3. Environment variables, including those from a `.env` file
 *
 * # Environment Variables
 *
 * - `DATABASE_URL` - SQLite connection string
 * - `SERVER_PORT` - HTTP listen port
 * - `JWT_SECRET` - HMAC secret for bearer tokens
 * - `PUSHY_API_KEY` - Secret key of the Pushy account; push is logged only when unset
 * - `PUSHY_ENDPOINT` - Override of the Pushy push URL
 * - `DATABASE_MAX_CONNECTIONS` - Pool size
 * - `RUST_LOG` - Tracing filter
 */

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:pocketchat.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_PUSHY_ENDPOINT: &str = "https://api.pushy.me/push";

const DEV_JWT_SECRET: &str = "pocketchat-dev-secret";

/// Runtime configuration of the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub pushy_api_key: Option<String>,
    pub pushy_endpoint: String,
    pub log_filter: String,
    pub max_connections: u32,
}

/// Optional TOML file layer; every key may be omitted
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub database_url: Option<String>,
    pub port: Option<u16>,
    pub jwt_secret: Option<String>,
    pub pushy_api_key: Option<String>,
    pub pushy_endpoint: Option<String>,
    pub log_filter: Option<String>,
    pub max_connections: Option<u32>,
}

impl FileConfig {
    /// Parse a TOML document
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::InvalidFile(e.to_string()))
    }

    /// Read and parse a TOML file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidFile(format!("{path}: {e}")))?;
        Self::parse(&text)
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// Loads `.env` if present, then reads the TOML file named by
    /// `POCKETCHAT_CONFIG`, if set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let file = match std::env::var("POCKETCHAT_CONFIG") {
            Ok(path) => {
                tracing::info!("Loading configuration file {}", path);
                Some(FileConfig::load(&path)?)
            }
            Err(_) => None,
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Layer a file and an environment lookup over the defaults
    ///
    /// # Arguments
    ///
    /// * `file` - Parsed configuration file, if any
    /// * `env` - Lookup of environment variables by name
    pub fn from_sources<F>(file: Option<FileConfig>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let mut builder = Self::builder();

        if let Some(url) = env("DATABASE_URL").or(file.database_url) {
            builder = builder.database_url(url);
        }
        if let Some(port) = env("SERVER_PORT") {
            let port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", port))?;
            builder = builder.port(port);
        } else if let Some(port) = file.port {
            builder = builder.port(port);
        }
        if let Some(secret) = env("JWT_SECRET").or(file.jwt_secret) {
            builder = builder.jwt_secret(secret);
        }
        if let Some(key) = env("PUSHY_API_KEY").or(file.pushy_api_key) {
            builder = builder.pushy_api_key(key);
        }
        if let Some(endpoint) = env("PUSHY_ENDPOINT").or(file.pushy_endpoint) {
            builder = builder.pushy_endpoint(endpoint);
        }
        if let Some(filter) = env("RUST_LOG").or(file.log_filter) {
            builder = builder.log_filter(filter);
        }
        if let Some(max) = env("DATABASE_MAX_CONNECTIONS") {
            let max = max
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS", max))?;
            builder = builder.max_connections(max);
        } else if let Some(max) = file.max_connections {
            builder = builder.max_connections(max);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "DATABASE_MAX_CONNECTIONS",
                self.max_connections.to_string(),
            ));
        }
        if !self.pushy_endpoint.starts_with("http://") && !self.pushy_endpoint.starts_with("https://")
        {
            return Err(ConfigError::InvalidUrl(self.pushy_endpoint.clone()));
        }
        Ok(())
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    database_url: Option<String>,
    port: Option<u16>,
    jwt_secret: Option<String>,
    pushy_api_key: Option<String>,
    pushy_endpoint: Option<String>,
    log_filter: Option<String>,
    max_connections: Option<u32>,
}

impl ServerConfigBuilder {
    /// Set the SQLite connection string
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the Pushy secret API key
    pub fn pushy_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.pushy_api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Set the Pushy push URL
    pub fn pushy_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.pushy_endpoint = Some(endpoint.into());
        self
    }

    /// Set the tracing filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Set the pool size
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Build the configuration
    ///
    /// A missing JWT secret falls back to a development secret in debug
    /// builds and is an error in release builds.
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let jwt_secret = match self.jwt_secret {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::MissingValue("JWT_SECRET")),
        };

        let config = ServerConfig {
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            jwt_secret,
            pushy_api_key: self.pushy_api_key,
            pushy_endpoint: self
                .pushy_endpoint
                .unwrap_or_else(|| DEFAULT_PUSHY_ENDPOINT.to_string()),
            log_filter: self
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            max_connections: self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("invalid configuration file: {0}")]
    InvalidFile(String),
}
