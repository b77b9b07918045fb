use std::env;

use crate::constants::DEFAULT_IDENTITY_MAX_AGE_SECS;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    /// Shared secret the auth gateway signs identity headers with
    pub identity_secret_key: String,
    pub identity_max_age_secs: i64,
    pub log_requests: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/boards.db".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let identity_secret_key = env::var("IDENTITY_SECRET_KEY")
            .map_err(|_| "IDENTITY_SECRET_KEY must be set to verify caller identities")?;

        let identity_max_age_secs = env::var("IDENTITY_MAX_AGE_SECS")
            .unwrap_or_else(|_| DEFAULT_IDENTITY_MAX_AGE_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid IDENTITY_MAX_AGE_SECS")?;

        let log_requests = env::var("LOG_REQUESTS")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Config {
            server_host,
            server_port,
            database_path,
            allowed_origins,
            environment,
            identity_secret_key,
            identity_max_age_secs,
            log_requests,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
