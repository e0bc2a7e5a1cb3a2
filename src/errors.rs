// src/errors.rs
// DOCUMENTATION: Custom error types
// PURPOSE: Centralized error handling for the suggestion and geocoding paths

use thiserror::Error;

/// Library-specific error types
/// DOCUMENTATION: Every fallible path maps to one of these variants.
/// Cache corruption is intentionally absent: an unparseable cache blob is
/// treated as an empty cache and repaired on the next write, never surfaced.
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("Provider request failed: {0}")]
    Provider(String),

    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    #[error("Geocoding failed with status: {0}")]
    Geocoding(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
