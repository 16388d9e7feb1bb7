pub mod logging;

use std::env;
use thiserror::Error;

pub use logging::init_logging;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Application configuration loaded from the environment
///
/// Secrets stay out of Debug output.
#[derive(Clone)]
pub struct AppConfig {
    /// Database connection string
    pub database_url: String,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// HMAC key for remember and activation token digests
    pub session_secret: String,

    /// Secret mixed into password hashing
    pub password_pepper: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// DATABASE_URL and BIND_ADDR have development defaults; the two
    /// secrets are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://microblog.db?mode=rwc".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let session_secret =
            env::var("SESSION_SECRET").map_err(|_| ConfigError::MissingVar("SESSION_SECRET"))?;

        let password_pepper =
            env::var("PASSWORD_PEPPER").map_err(|_| ConfigError::MissingVar("PASSWORD_PEPPER"))?;

        Ok(Self {
            database_url,
            bind_addr,
            session_secret,
            password_pepper,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("bind_addr", &self.bind_addr)
            .field("session_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}
