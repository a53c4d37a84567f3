//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use serde::Deserialize;

/// Log filter used when verbose logging is requested.
pub const VERBOSE_LOG_FILTER: &str = "todo_api=debug,info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address to bind the HTTP listener on.
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to make cross-origin requests (comma separated).
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    // === Store ===
    /// Start with the sample todos instead of an empty list.
    #[serde(default = "default_true")]
    pub seed_todos: bool,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            seed_todos: default_true(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.bind_host.parse::<IpAddr>().is_err() {
            return Err(format!("BIND_HOST is not a valid IP address: {}", self.bind_host));
        }

        if self.cors_origins.is_empty() {
            return Err("CORS_ORIGINS must list at least one origin".to_string());
        }

        for origin in &self.cors_origins {
            // Credentials are allowed, so a wildcard origin is rejected by browsers.
            if origin == "*" {
                return Err("CORS_ORIGINS cannot contain '*'".to_string());
            }
            if HeaderValue::from_str(origin).is_err() {
                return Err(format!("CORS_ORIGINS contains an invalid origin: {}", origin));
            }
        }

        Ok(())
    }

    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .bind_host
            .parse()
            .map_err(|_| format!("BIND_HOST is not a valid IP address: {}", self.bind_host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Log filter directive: debug for this crate when verbose (from the CLI
    /// flag or `VERBOSE`), otherwise `RUST_LOG`.
    pub fn log_filter(&self, cli_verbose: bool) -> String {
        if cli_verbose || self.verbose {
            VERBOSE_LOG_FILTER.to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// Allowed origins as header values, skipping any that do not parse.
    pub fn cors_header_values(&self) -> Vec<HeaderValue> {
        self.cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect()
    }
}
