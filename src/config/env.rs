// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;

/// Configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Mapping provider API key
    pub google_places_api_key: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Storage slot name for the suggestion cache
    pub cache_key: String,

    /// Cache entry lifetime in seconds (default 24 hours)
    pub cache_expiration_secs: i64,

    /// Debounce window for input changes, in milliseconds
    pub debounce_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        Config {
            google_places_api_key: env::var("GOOGLE_PLACES_API_KEY")
                .unwrap_or_else(|_| String::new()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            cache_key: env::var("SUGGEST_CACHE_KEY").unwrap_or_else(|_| "ugps".to_string()),

            cache_expiration_secs: env::var("SUGGEST_CACHE_EXPIRATION_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .unwrap_or(86400),

            debounce_ms: env::var("SUGGEST_DEBOUNCE_MS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap_or(300),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Nothing here is fatal; a missing API key only means
    /// network lookups will fail, which the controller already tolerates
    pub fn validate(&self) -> Result<(), String> {
        if self.google_places_api_key.is_empty() {
            log::warn!("GOOGLE_PLACES_API_KEY not configured - suggestion fetches will fail");
        }

        if self.cache_expiration_secs <= 0 {
            return Err("SUGGEST_CACHE_EXPIRATION_SECS must be positive".to_string());
        }

        Ok(())
    }
}
