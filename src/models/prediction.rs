// src/models/prediction.rs
// DOCUMENTATION: Core data structures for place suggestions
// PURPOSE: Serialization models for the provider's autocomplete wire shape

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A highlight range inside a formattable text field
/// DOCUMENTATION: Offsets into the text marking the part that matched the
/// user's input. Present in raw provider responses, always stripped by
/// normalization before anything is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRange {
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Text with optional highlight-match metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattableText {
    pub text: String,

    /// Highlight ranges; empty after normalization
    #[serde(default)]
    pub matches: Vec<MatchRange>,
}

impl FormattableText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matches: Vec::new(),
        }
    }
}

/// Opaque place-resolution capability reference
/// DOCUMENTATION: Carries only the provider's place resource name. The core
/// never resolves it; it is serialized by presence, not by behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRef {
    pub place: String,
}

/// A single candidate place/address match
/// DOCUMENTATION: The cache-safe prediction shape. Invariant: after
/// normalization the formattable fields, when present, carry no matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePrediction {
    /// Provider's unique place identifier
    pub place_id: String,

    /// Distance from the request origin, in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,

    /// Primary display text (e.g. place name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_text: Option<FormattableText>,

    /// Secondary display text (e.g. locality)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<FormattableText>,

    /// Full display text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<FormattableText>,

    /// Place types, in provider order (e.g. ["geocode"])
    #[serde(default)]
    pub types: Vec<String>,

    /// Unopened handle for resolving the full place record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_place: Option<PlaceRef>,
}

/// Suggestion wrapper as returned by the provider
/// DOCUMENTATION: The provider wraps each prediction; wrappers without a
/// nested prediction are skipped during flattening.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_prediction: Option<PlacePrediction>,
}

/// Raw autocomplete response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub suggestions: Option<Vec<Suggestion>>,
}

/// Opaque billing/continuity token spanning one suggestion session
/// DOCUMENTATION: Minted when the provider becomes ready and renewed after
/// every selection. Owned exclusively by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Caller-supplied request options, merged into every autocomplete request
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_region_codes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_primary_types: Option<Vec<String>>,
}

/// Full autocomplete request: caller options plus the input text and the
/// active session token, if any
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub input: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<SessionToken>,

    #[serde(flatten)]
    pub options: RequestOptions,
}
