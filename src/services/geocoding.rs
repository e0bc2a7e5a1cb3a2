// src/services/geocoding.rs
// DOCUMENTATION: One-shot address geocoding helpers
// PURPOSE: Thin request/response wrappers; no caching, debouncing, or state

use crate::errors::SuggestError;
use crate::models::{GeocodeResponse, GeocoderRequest, GeocoderResult, LatLng};
use crate::services::GooglePlacesClient;

/// Resolve a textual address into geocoder results
/// DOCUMENTATION: Rejects with the provider's status code whenever it is not
/// "OK" (including "ZERO_RESULTS"). Component restrictions without an address
/// are accepted but logged as misuse; the request still proceeds.
pub async fn geocode(
    client: &GooglePlacesClient,
    request: &GeocoderRequest,
) -> Result<Vec<GeocoderResult>, SuggestError> {
    if request.address.is_none() && request.component_restrictions.is_some() {
        log::error!(
            "Please provide an address when calling geocode() with component restrictions."
        );
    }

    interpret_response(client.geocode(request).await?)
}

fn interpret_response(response: GeocodeResponse) -> Result<Vec<GeocoderResult>, SuggestError> {
    if response.status != "OK" {
        if let Some(message) = &response.error_message {
            log::error!("Geocoding status {}: {}", response.status, message);
        }
        return Err(SuggestError::Geocoding(response.status));
    }

    Ok(response.results)
}

/// Extract the coordinates from a geocoder result
pub fn lat_lng_of(result: &GeocoderResult) -> LatLng {
    result.geometry.location
}
