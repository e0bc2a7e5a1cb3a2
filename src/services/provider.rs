// src/services/provider.rs
// DOCUMENTATION: Mapping provider abstraction
// PURPOSE: Seam between the controller and an interchangeable suggestion backend

use crate::errors::SuggestError;
use crate::models::{SessionToken, SuggestionRequest, SuggestionResponse};
use async_trait::async_trait;

/// Asynchronous suggestion backend
/// DOCUMENTATION: Object-safe so the controller can hold `Arc<dyn
/// SuggestionProvider>` and tests can substitute a fake. Session-token
/// support is feature-detected: providers without it return None and the
/// controller simply omits the token from requests.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Whether the suggestion capability is available yet
    /// DOCUMENTATION: Polled by the controller until true; there is no ready
    /// event to subscribe to.
    fn ready(&self) -> bool;

    /// Whether this provider issues billing session tokens
    fn supports_session_tokens(&self) -> bool {
        false
    }

    /// Mint a fresh session token, if supported
    fn new_session_token(&self) -> Option<SessionToken> {
        None
    }

    /// Fetch raw autocomplete suggestions for a request
    async fn fetch_suggestions(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionResponse, SuggestError>;
}
