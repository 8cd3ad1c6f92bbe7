use std::env;

use actix_web::cookie::Key;
use thiserror::Error;

/// Cookie signing requires at least 64 bytes of key material.
const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SESSION_SECRET environment variable must be set")]
    MissingSessionSecret,

    #[error("SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes, got {0}")]
    SessionSecretTooShort(usize),

    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

/// Process configuration, read from the environment exactly once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: (String, u16),
    pub secure_cookies: bool,
    pub seed_email: String,
    pub seed_password: String,
    pub seed_name: Option<String>,
    session_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let session_secret =
            env::var("SESSION_SECRET").map_err(|_| ConfigError::MissingSessionSecret)?;
        if session_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SessionSecretTooShort(session_secret.len()));
        }

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://gestion.db".to_owned());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => 8080,
        };

        let secure_cookies = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let seed_email = env::var("SEED_EMAIL").unwrap_or_else(|_| "test@test.com".to_owned());
        let seed_password = env::var("SEED_PASSWORD").unwrap_or_else(|_| "123456".to_owned());
        let seed_name = env::var("SEED_NAME").ok();

        Ok(Self {
            database_url,
            bind_addr: (host, port),
            secure_cookies,
            seed_email,
            seed_password,
            seed_name,
            session_secret,
        })
    }

    pub fn session_key(&self) -> Key {
        Key::from(self.session_secret.as_bytes())
    }
}
