//! Application configuration loaded from environment variables.
//!
//! Every setting has a default so the server starts with no environment at
//! all; a `.env` file is honored for local development.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which document store backs the `activities` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Firestore database id
    pub database_name: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Storage backend
    pub store_backend: StoreBackend,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// How long to wait for the next body chunk
    pub body_idle_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 6900,
            database_name: "practice-db".to_string(),
            gcp_project_id: "local-dev".to_string(),
            store_backend: StoreBackend::Firestore,
            max_body_bytes: 16 * 1024,
            body_idle_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            database_name: env::var("DATABASE_NAME").unwrap_or(defaults.database_name),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or(defaults.gcp_project_id),
            store_backend: parse_var("STORE_BACKEND")?.unwrap_or(defaults.store_backend),
            max_body_bytes: parse_var("MAX_BODY_BYTES")?.unwrap_or(defaults.max_body_bytes),
            body_idle_timeout: parse_var("BODY_IDLE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.body_idle_timeout),
        })
    }

    /// Config for tests: in-memory store, short body timeout.
    pub fn test_default() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            body_idle_timeout: Duration::from_secs(2),
            ..Self::default()
        }
    }
}

/// Parse an optional environment variable, rejecting values that don't parse.
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
