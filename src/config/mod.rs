//! Configuration management
//!
//! Loads and validates configuration from environment variables, with
//! support for different environments (development, staging, production).

use std::env;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEV_JWT_SECRET: &str = "development-secret-change-in-production";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }
}

impl Environment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Get the environment name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Current environment
    pub environment: Environment,

    /// Address to bind to
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// JWT secret for token signing
    pub jwt_secret: String,

    /// CORS allowed origins, comma separated
    pub cors_allowed_origins: Option<String>,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// Per-request processing deadline
    pub request_timeout_seconds: u64,

    /// Grace period for in-flight requests on shutdown
    pub shutdown_timeout_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"****")
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("log_level", &self.log_level)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("shutdown_timeout_seconds", &self.shutdown_timeout_seconds)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .map(|s| s.parse::<Environment>())
            .unwrap_or(Ok(Environment::Development))?;

        let host = lookup("HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidValue("HOST must be an IP address".to_string()))?;

        let port = lookup("PORT")
            .unwrap_or_else(|| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if environment.is_production() => {
                return Err(ConfigError::MissingEnvVar("JWT_SECRET".to_string()))
            }
            None => DEV_JWT_SECRET.to_string(),
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").filter(|s| !s.is_empty());

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let request_timeout_seconds = lookup("REQUEST_TIMEOUT_SECONDS")
            .map(|s| {
                s.parse::<u64>().ok().filter(|secs| *secs > 0).ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "REQUEST_TIMEOUT_SECONDS must be a positive number".to_string(),
                    )
                })
            })
            .unwrap_or(Ok(60))?;

        let shutdown_timeout_seconds = lookup("SHUTDOWN_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        Ok(Config {
            environment,
            host,
            port,
            jwt_secret,
            cors_allowed_origins,
            log_level,
            request_timeout_seconds,
            shutdown_timeout_seconds,
        })
    }

    /// Per-request processing deadline
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Whether the built-in development secret is in use
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}
