// src/config/options.rs
// DOCUMENTATION: Per-controller options
// PURPOSE: Knobs a consumer passes when constructing a SuggestionController

use crate::config::Config;
use crate::models::RequestOptions;
use std::time::Duration;

/// Options for a single suggestion controller
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Storage slot name for the cache blob
    pub cache_key: String,

    /// Cache entry lifetime in seconds
    pub cache_expiration_secs: i64,

    /// Quiescence window before a pending search fires
    pub debounce: Duration,

    /// Provider request options merged into every fetch
    pub request_options: RequestOptions,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            cache_key: "ugps".to_string(),
            cache_expiration_secs: 24 * 60 * 60,
            debounce: Duration::from_millis(300),
            request_options: RequestOptions::default(),
        }
    }
}

impl ControllerOptions {
    /// Derive controller options from environment configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            cache_key: config.cache_key.clone(),
            cache_expiration_secs: config.cache_expiration_secs,
            debounce: Duration::from_millis(config.debounce_ms),
            request_options: RequestOptions::default(),
        }
    }
}
