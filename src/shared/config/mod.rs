//! Application configuration module
//!
//! Configuration is assembled in three layers, lowest precedence first:
//!
//! 1. Built-in defaults ([`AppConfig::default`])
//! 2. An optional TOML file named by `DEVNEST_CONFIG`
//! 3. Environment variables (`SERVER_HOST`, `SERVER_PORT`, `DATABASE_URL`,
//!    `JWT_SECRET`, `JWT_TTL_HOURS`, `HUB_*`)
//!
//! The hub settings default to the limits the chat clients were written
//! against: 512-byte inbound frames, 256 queued outbound messages, a ping
//! every 54 seconds, 10 second write deadline and 60 second read idle timeout.
//!
//! ```toml
//! port = 9000
//! jwt_secret = "change-me"
//!
//! [hub]
//! max_frame_bytes = 1024
//! outbound_capacity = 64
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "DEVNEST_CONFIG";

/// Tunables for the connection hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Largest inbound payload accepted from a connection, in bytes
    pub max_frame_bytes: usize,
    /// Pending outbound messages per connection before it is evicted
    pub outbound_capacity: usize,
    /// Keep-alive probe period, in seconds
    pub ping_period_secs: u64,
    /// Deadline for a single frame write, in seconds
    pub write_timeout_secs: u64,
    /// Idle timeout for inbound reads, in seconds
    pub read_timeout_secs: u64,
    /// Capacity of the hub's command channel
    pub command_capacity: usize,
    /// Capacity of the accept/drop event channel
    pub event_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: 512,
            outbound_capacity: 256,
            ping_period_secs: 54,
            write_timeout_secs: 10,
            read_timeout_secs: 60,
            command_capacity: 1024,
            event_capacity: 256,
        }
    }
}

impl HubConfig {
    /// Keep-alive probe period
    pub fn ping_period(&self) -> Duration {
        Duration::from_secs(self.ping_period_secs)
    }

    /// Per-write deadline
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    /// Inbound idle timeout
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Validate the hub settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_frame_bytes == 0 {
            return Err(ConfigError::Invalid("hub.max_frame_bytes must be > 0"));
        }
        if self.outbound_capacity == 0 {
            return Err(ConfigError::Invalid("hub.outbound_capacity must be > 0"));
        }
        if self.command_capacity == 0 || self.event_capacity == 0 {
            return Err(ConfigError::Invalid("hub channel capacities must be > 0"));
        }
        if self.ping_period_secs == 0 || self.write_timeout_secs == 0 {
            return Err(ConfigError::Invalid("hub timers must be > 0"));
        }
        // Probes must land before the peer's idle timer expires.
        if self.ping_period_secs >= self.read_timeout_secs {
            return Err(ConfigError::Invalid(
                "hub.ping_period_secs must be shorter than hub.read_timeout_secs",
            ));
        }
        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// PostgreSQL connection string; REST persistence is disabled without it
    pub database_url: Option<String>,
    /// HMAC secret for issued JWTs
    pub jwt_secret: String,
    /// Lifetime of issued JWTs, in hours
    pub token_ttl_hours: u64,
    /// Hub settings
    pub hub: HubConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: None,
            jwt_secret: "dev-secret".to_string(),
            token_ttl_hours: 72,
            hub: HubConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the optional file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse TOML; missing keys keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Overlay values from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.port = parse_var("SERVER_PORT", &port)?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Some(ttl) = lookup("JWT_TTL_HOURS") {
            self.token_ttl_hours = parse_var("JWT_TTL_HOURS", &ttl)?;
        }

        let hub = &mut self.hub;
        if let Some(v) = lookup("HUB_MAX_FRAME_BYTES") {
            hub.max_frame_bytes = parse_var("HUB_MAX_FRAME_BYTES", &v)?;
        }
        if let Some(v) = lookup("HUB_OUTBOUND_CAPACITY") {
            hub.outbound_capacity = parse_var("HUB_OUTBOUND_CAPACITY", &v)?;
        }
        if let Some(v) = lookup("HUB_PING_PERIOD_SECS") {
            hub.ping_period_secs = parse_var("HUB_PING_PERIOD_SECS", &v)?;
        }
        if let Some(v) = lookup("HUB_WRITE_TIMEOUT_SECS") {
            hub.write_timeout_secs = parse_var("HUB_WRITE_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("HUB_READ_TIMEOUT_SECS") {
            hub.read_timeout_secs = parse_var("HUB_READ_TIMEOUT_SECS", &v)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.token_ttl_hours == 0 {
            return Err(ConfigError::Invalid("token_ttl_hours must be > 0"));
        }
        self.hub.validate()
    }

    /// `host:port` string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    /// Set the JWT secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    /// Replace the hub settings
    pub fn hub(mut self, hub: HubConfig) -> Self {
        self.config.hub = hub;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
