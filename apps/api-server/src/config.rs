//! Application configuration loaded from environment variables.

use std::env;

use thiserror::Error;

use inkpost_infra::database::MongoConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Key used to sign session tokens. Required; startup fails without it.
    pub session_secret: String,
    /// Turns on the `Secure` attribute of the session cookie.
    pub production: bool,
    pub database: Option<MongoConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SESSION_SECRET environment variable is required")]
    MissingSessionSecret,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let session_secret =
            env::var("SESSION_SECRET").map_err(|_| ConfigError::MissingSessionSecret)?;

        let database = env::var("MONGODB_URL").ok().map(|url| MongoConfig {
            url,
            database: env::var("MONGODB_DB").unwrap_or_else(|_| "inkpost".to_string()),
        });

        let production = env::var("RUST_ENV")
            .map(|v| v == "production" || v == "prod")
            .unwrap_or(false);

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            session_secret,
            production,
            database,
        })
    }
}
