// src/lib.rs
// DOCUMENTATION: Library root
// PURPOSE: Debounced, cached place-name suggestions plus one-shot geocoding

//! Client-side integration layer for place-name autocomplete and geocoding.
//!
//! Feed a [`SuggestionController`](services::SuggestionController) the raw
//! input values as a user types; it debounces them, consults a TTL cache
//! keyed by the lower-cased query, and only then asks the mapping provider,
//! normalizing the response into a cache-safe shape. Session tokens are
//! minted when the provider becomes ready and renewed after each selection.
//!
//! The geocoding helpers in [`services::geocoding`] are stateless one-shot
//! wrappers with no caching or debouncing.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::{Config, ControllerOptions};
pub use errors::SuggestError;
pub use models::{
    FormattableText, GeocoderRequest, GeocoderResult, LatLng, MatchRange, PlacePrediction,
    RequestOptions, SessionToken,
};
pub use services::{
    flatten_suggestions, geocode, lat_lng_of, BlobStore, Debouncer, GooglePlacesClient,
    MemoryStore, SuggestionCache, SuggestionController, SuggestionProvider,
};
