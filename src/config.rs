use std::env;

use crate::constants::DEFAULT_NOTIFICATION_TTL_MS;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub notification_ttl_ms: u64,
    pub environment: String,
    pub log_requests: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        // Loopback only: the page is a single-user UI
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "./data/user_registry.redb".to_string());

        let notification_ttl_ms = env::var("NOTIFICATION_TTL_MS")
            .unwrap_or_else(|_| DEFAULT_NOTIFICATION_TTL_MS.to_string())
            .parse()
            .map_err(|_| "Invalid NOTIFICATION_TTL_MS")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let log_requests = env::var("LOG_REQUESTS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Config {
            server_host,
            server_port,
            database_path,
            notification_ttl_ms,
            environment,
            log_requests,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            database_path: "./data/user_registry.redb".to_string(),
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            environment: "development".to_string(),
            log_requests: false,
        }
    }
}
