//! API configuration
//!
//! Values come from `API_*` environment variables (`API_JWT_SECRET`,
//! `API_DATABASE_URL`, `API_AVIATIONSTACK_API_KEY`, ...) layered over the
//! defaults below. `API_JWT_SECRET` has no default and must be set.

use config::ConfigError;
use serde::Deserialize;

/// Sample secret from `.env` templates; never accepted for signing
const PLACEHOLDER_SECRET: &str = "change-me-in-production";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// HS256 signing secret for admin tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Aviationstack access key; the flight feed is disabled without one
    #[serde(default)]
    pub aviationstack_api_key: Option<String>,
    pub aviationstack_base_url: String,
    /// Departure airport the feed is queried for
    pub departure_iata: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: String::new(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/flightclaim".to_string(),
            log_level: "info".to_string(),
            aviationstack_api_key: None,
            aviationstack_base_url: "https://api.aviationstack.com".to_string(),
            departure_iata: "TUN".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config: Self = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs as i64)?
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("aviationstack_base_url", defaults.aviationstack_base_url)?
            .set_default("departure_iata", defaults.departure_iata)?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt_secret must not be empty".to_string()));
        }
        if self.jwt_secret == PLACEHOLDER_SECRET {
            return Err(ConfigError::Message("jwt_secret must be changed from the sample value".to_string()));
        }
        if self.jwt_expiration_secs == 0 {
            return Err(ConfigError::Message("jwt_expiration_secs must be positive".to_string()));
        }
        if self.departure_iata.trim().is_empty() {
            return Err(ConfigError::Message("departure_iata must not be empty".to_string()));
        }
        Ok(())
    }

    /// Feed key, if one is configured and non-blank
    pub fn feed_api_key(&self) -> Option<&str> {
        self.aviationstack_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
