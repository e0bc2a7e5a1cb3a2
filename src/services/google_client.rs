// src/services/google_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: HTTP calls to the autocomplete and geocoding endpoints

use crate::errors::SuggestError;
use crate::models::{
    GeocodeResponse, GeocoderRequest, SessionToken, SuggestionRequest, SuggestionResponse,
};
use crate::services::SuggestionProvider;
use async_trait::async_trait;
use reqwest::Client;

const SUGGEST_BASE_URL: &str = "https://places.googleapis.com/v1";
const GEOCODE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode";

/// Google Places API client
/// DOCUMENTATION: Handles authentication and API calls to Google Places
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Places API key
    api_key: String,
    /// Base URL for the autocomplete endpoint
    suggest_base_url: String,
    /// Base URL for the geocoding endpoint
    geocode_base_url: String,
}

impl GooglePlacesClient {
    /// Create new Google Places API client
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            suggest_base_url: SUGGEST_BASE_URL.to_string(),
            geocode_base_url: GEOCODE_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint base URLs (for tests against a local server)
    pub fn with_base_urls(
        api_key: String,
        suggest_base_url: String,
        geocode_base_url: String,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            suggest_base_url,
            geocode_base_url,
        }
    }

    /// Resolve an address request against the geocoding endpoint
    /// DOCUMENTATION: Returns the raw response including its status code;
    /// status interpretation belongs to the geocoding helper.
    pub async fn geocode(
        &self,
        request: &GeocoderRequest,
    ) -> Result<GeocodeResponse, SuggestError> {
        let url = format!("{}/json", self.geocode_base_url);

        let mut params: Vec<(&str, String)> = vec![("key", self.api_key.clone())];
        if let Some(address) = &request.address {
            params.push(("address", address.clone()));
        }
        if let Some(restrictions) = &request.component_restrictions {
            params.push(("components", restrictions.to_filter_string()));
        }
        if let Some(language) = &request.language {
            params.push(("language", language.clone()));
        }
        if let Some(region) = &request.region {
            params.push(("region", region.clone()));
        }

        log::debug!("Geocoding request: address={:?}", request.address);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Geocoding request failed: {}", e);
                SuggestError::Provider(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Geocoding API error {}: {}", status, body);
            return Err(SuggestError::Provider(format!(
                "API error {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            log::error!("Failed to parse geocoding response: {}", e);
            SuggestError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl SuggestionProvider for GooglePlacesClient {
    /// DOCUMENTATION: A native client is ready as soon as it holds an API
    /// key; the controller's readiness poll exists for providers whose
    /// capability loads late.
    fn ready(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn supports_session_tokens(&self) -> bool {
        true
    }

    fn new_session_token(&self) -> Option<SessionToken> {
        Some(SessionToken::new())
    }

    async fn fetch_suggestions(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionResponse, SuggestError> {
        let url = format!("{}/places:autocomplete", self.suggest_base_url);

        log::debug!("Autocomplete request: input={:?}", request.input);

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Autocomplete request failed: {}", e);
                SuggestError::Provider(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Autocomplete API error {}: {}", status, body);
            return Err(SuggestError::Provider(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let api_response: SuggestionResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse autocomplete response: {}", e);
            SuggestError::Parse(e.to_string())
        })?;

        log::info!(
            "Autocomplete returned {} suggestions",
            api_response
                .suggestions
                .as_ref()
                .map(Vec::len)
                .unwrap_or(0)
        );
        Ok(api_response)
    }
}
