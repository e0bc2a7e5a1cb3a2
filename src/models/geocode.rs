// src/models/geocode.rs
// DOCUMENTATION: Data structures for the geocoding helpers
// PURPOSE: Request/response models for address -> location resolution

use serde::{Deserialize, Serialize};

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Geometry block of a geocoder result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Geometry {
    /// Resolved coordinates
    pub location: LatLng,

    /// Precision of the result (e.g. "ROOFTOP")
    #[serde(default)]
    pub location_type: Option<String>,
}

/// A single geocoder result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocoderResult {
    #[serde(default)]
    pub formatted_address: Option<String>,

    #[serde(default)]
    pub place_id: Option<String>,

    #[serde(default)]
    pub types: Vec<String>,

    pub geometry: Geometry,
}

/// Component filters for a geocoding request
/// DOCUMENTATION: Each set field restricts results to that component value.
/// Should be combined with an address; a components-only request is accepted
/// but logged as likely misuse.
#[derive(Debug, Clone, Default)]
pub struct ComponentRestrictions {
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub locality: Option<String>,
    pub administrative_area: Option<String>,
    pub route: Option<String>,
}

impl ComponentRestrictions {
    /// Render as the provider's `components` filter string
    /// (e.g. "country:ES|postal_code:28013")
    pub fn to_filter_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(country) = &self.country {
            parts.push(format!("country:{}", country));
        }
        if let Some(postal_code) = &self.postal_code {
            parts.push(format!("postal_code:{}", postal_code));
        }
        if let Some(locality) = &self.locality {
            parts.push(format!("locality:{}", locality));
        }
        if let Some(area) = &self.administrative_area {
            parts.push(format!("administrative_area:{}", area));
        }
        if let Some(route) = &self.route {
            parts.push(format!("route:{}", route));
        }
        parts.join("|")
    }
}

/// A geocoding request
#[derive(Debug, Clone, Default)]
pub struct GeocoderRequest {
    pub address: Option<String>,
    pub component_restrictions: Option<ComponentRestrictions>,
    pub language: Option<String>,
    pub region: Option<String>,
}

/// Raw geocoding response body
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocoderResult>,

    /// Provider status code ("OK", "ZERO_RESULTS", ...)
    pub status: String,

    #[serde(default)]
    pub error_message: Option<String>,
}
