// src/services/controller.rs
// DOCUMENTATION: Suggestion controller orchestrating the debounce-cache-fetch pipeline
// PURPOSE: React to input changes, serve cached predictions, manage the session token

use crate::config::ControllerOptions;
use crate::models::{PlacePrediction, RequestOptions, SessionToken, SuggestionRequest};
use crate::services::{
    flatten_suggestions, BlobStore, Debouncer, SuggestionCache, SuggestionProvider,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How often the readiness poll checks the provider
const READY_POLL_INTERVAL: Duration = Duration::from_millis(50);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Orchestrating unit for place-name suggestions
/// DOCUMENTATION: Owns the readiness flag, the active session token and the
/// current prediction list. Input changes are trimmed, empty values clear the
/// list synchronously, everything else goes through the debouncer to a
/// cache-or-network lookup. Must be constructed inside a tokio runtime (it
/// spawns the readiness poll and debounced searches).
pub struct SuggestionController {
    inner: Arc<ControllerInner>,
    debounced_search: Debouncer<String>,
    ready_poll: JoinHandle<()>,
}

struct ControllerInner {
    provider: Arc<dyn SuggestionProvider>,
    cache: SuggestionCache,
    request_options: RequestOptions,
    /// True until the provider's suggestion capability is available
    loading: AtomicBool,
    predictions: Mutex<Vec<PlacePrediction>>,
    session_token: Mutex<Option<SessionToken>>,
    /// Sequence number of the most recently issued search; responses
    /// carrying an older sequence are discarded as stale
    latest_seq: AtomicU64,
}

impl SuggestionController {
    pub fn new(
        provider: Arc<dyn SuggestionProvider>,
        store: Arc<dyn BlobStore>,
        options: ControllerOptions,
    ) -> Self {
        let inner = Arc::new(ControllerInner {
            provider,
            cache: SuggestionCache::new(store, options.cache_key, options.cache_expiration_secs),
            request_options: options.request_options,
            loading: AtomicBool::new(true),
            predictions: Mutex::new(Vec::new()),
            session_token: Mutex::new(None),
            latest_seq: AtomicU64::new(0),
        });

        // The provider offers no ready event, so poll until the capability
        // appears, then stop for good.
        let poll_inner = Arc::clone(&inner);
        let ready_poll = tokio::spawn(async move {
            let mut interval = tokio::time::interval(READY_POLL_INTERVAL);
            loop {
                interval.tick().await;
                if poll_inner.provider.ready() {
                    if poll_inner.provider.supports_session_tokens() {
                        *lock(&poll_inner.session_token) =
                            poll_inner.provider.new_session_token();
                    }
                    poll_inner.loading.store(false, Ordering::SeqCst);
                    log::debug!("Suggestion capability ready");
                    break;
                }
            }
        });

        let search_inner = Arc::clone(&inner);
        let debounced_search = Debouncer::new(options.debounce, move |text: String| {
            ControllerInner::search(Arc::clone(&search_inner), text)
        });

        Self {
            inner,
            debounced_search,
            ready_poll,
        }
    }

    /// React to a change of the input value
    /// DOCUMENTATION: Whitespace is trimmed. An empty value clears the
    /// predictions synchronously with no debounce and no fetch; anything else
    /// is routed through the debounce gate.
    pub fn on_value_change(&self, value: &str) {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return self.on_clear();
        }

        self.debounced_search.call(trimmed.to_string());
    }

    /// Clear the current prediction list
    pub fn on_clear(&self) {
        lock(&self.inner.predictions).clear();
    }

    /// Accept a selected prediction
    /// DOCUMENTATION: Clears the list, mints a fresh session token (ending
    /// the billing session for this search sequence) and hands the prediction
    /// back unchanged. No failure mode.
    pub fn on_select_prediction(&self, prediction: PlacePrediction) -> PlacePrediction {
        lock(&self.inner.predictions).clear();
        if self.inner.provider.supports_session_tokens() {
            *lock(&self.inner.session_token) = self.inner.provider.new_session_token();
        }
        prediction
    }

    /// Whether the provider capability is still being waited on
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// Snapshot of the current predictions
    pub fn predictions(&self) -> Vec<PlacePrediction> {
        lock(&self.inner.predictions).clone()
    }

    /// The active session token, if the provider issues them
    pub fn session_token(&self) -> Option<SessionToken> {
        *lock(&self.inner.session_token)
    }
}

impl Drop for SuggestionController {
    fn drop(&mut self) {
        self.ready_poll.abort();
        self.debounced_search.cancel();
    }
}

impl ControllerInner {
    /// Cache-or-network lookup for one settled input value
    async fn search(self: Arc<Self>, text: String) {
        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let key = text.to_lowercase();

        if let Some(cached) = self.cache.lookup(&key) {
            self.apply_if_latest(seq, cached);
            return;
        }

        let request = SuggestionRequest {
            input: text.clone(),
            session_token: *lock(&self.session_token),
            options: self.request_options.clone(),
        };

        match self.provider.fetch_suggestions(&request).await {
            Ok(response) => {
                let predictions = flatten_suggestions(response.suggestions);
                if !self.apply_if_latest(seq, predictions.clone()) {
                    log::debug!("Discarding stale suggestion response for {:?}", text);
                    return;
                }
                self.cache.store(&key, predictions);
            }
            // Transient failure: log and keep the prior predictions
            Err(e) => log::error!("Suggestion fetch for {:?} failed: {}", text, e),
        }
    }

    /// Install predictions unless a newer search has been issued since
    fn apply_if_latest(&self, seq: u64, predictions: Vec<PlacePrediction>) -> bool {
        if self.latest_seq.load(Ordering::SeqCst) != seq {
            return false;
        }
        *lock(&self.predictions) = predictions;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SuggestError;
    use crate::models::{FormattableText, Suggestion, SuggestionResponse};
    use crate::services::{CacheEntry, MemoryStore};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::AtomicUsize;

    struct ScriptedResponse {
        delay: Duration,
        result: Result<SuggestionResponse, SuggestError>,
    }

    /// Provider fake: counts fetches, records inputs, optionally replays
    /// scripted responses with per-call delays
    struct FakeProvider {
        ready: AtomicBool,
        fetch_count: AtomicUsize,
        inputs: Mutex<Vec<String>>,
        scripted: Mutex<VecDeque<ScriptedResponse>>,
    }

    impl FakeProvider {
        fn new() -> Self {
            Self {
                ready: AtomicBool::new(true),
                fetch_count: AtomicUsize::new(0),
                inputs: Mutex::new(Vec::new()),
                scripted: Mutex::new(VecDeque::new()),
            }
        }

        fn not_ready() -> Self {
            let provider = Self::new();
            provider.ready.store(false, Ordering::SeqCst);
            provider
        }

        fn script(&self, delay: Duration, result: Result<SuggestionResponse, SuggestError>) {
            lock(&self.scripted).push_back(ScriptedResponse { delay, result });
        }

        fn fetches(&self) -> usize {
            self.fetch_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SuggestionProvider for FakeProvider {
        fn ready(&self) -> bool {
            self.ready.load(Ordering::SeqCst)
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
            self.fetch_count.fetch_add(1, Ordering::SeqCst);
            lock(&self.inputs).push(request.input.clone());

            let scripted = lock(&self.scripted).pop_front();
            match scripted {
                Some(response) => {
                    tokio::time::sleep(response.delay).await;
                    response.result
                }
                None => Ok(response_with(prediction("PLACE_ID"))),
            }
        }
    }

    fn prediction(place_id: &str) -> PlacePrediction {
        PlacePrediction {
            place_id: place_id.to_string(),
            distance_meters: Some(0.0),
            main_text: Some(FormattableText::plain("MAIN_TEXT")),
            secondary_text: Some(FormattableText::plain("SECONDARY_TEXT")),
            text: Some(FormattableText::plain("TEXT")),
            types: vec!["geocode".to_string()],
            to_place: None,
        }
    }

    fn response_with(prediction: PlacePrediction) -> SuggestionResponse {
        SuggestionResponse {
            suggestions: Some(vec![Suggestion {
                place_prediction: Some(prediction),
            }]),
        }
    }

    fn controller_with(
        provider: Arc<FakeProvider>,
        store: Arc<MemoryStore>,
    ) -> SuggestionController {
        SuggestionController::new(provider, store, ControllerOptions::default())
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    /// Run out the debounce window plus task scheduling
    async fn run_debounce() {
        tokio::time::advance(Duration::from_millis(300)).await;
        settle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_clears_once_provider_becomes_ready() {
        let provider = Arc::new(FakeProvider::not_ready());
        let controller = controller_with(Arc::clone(&provider), Arc::new(MemoryStore::new()));
        assert!(controller.is_loading());
        assert!(controller.session_token().is_none());

        tokio::time::advance(Duration::from_millis(200)).await;
        settle().await;
        assert!(controller.is_loading());

        provider.ready.store(true, Ordering::SeqCst);
        tokio::time::advance(Duration::from_millis(100)).await;
        settle().await;
        assert!(!controller.is_loading());
        assert!(controller.session_token().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_clears_synchronously_without_fetching() {
        let provider = Arc::new(FakeProvider::new());
        let controller = controller_with(Arc::clone(&provider), Arc::new(MemoryStore::new()));

        controller.on_value_change("VALUE");
        run_debounce().await;
        assert_eq!(controller.predictions().len(), 1);
        assert_eq!(provider.fetches(), 1);

        controller.on_value_change("   ");
        assert!(controller.predictions().is_empty());
        // No debounce window needed, and no extra fetch ever happens
        run_debounce().await;
        assert_eq!(provider.fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cold_cache_fetches_once_and_fills_the_cache() {
        let provider = Arc::new(FakeProvider::new());
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(Arc::clone(&provider), Arc::clone(&store));

        controller.on_value_change("VALUE");
        run_debounce().await;

        assert_eq!(provider.fetches(), 1);
        assert_eq!(*lock(&provider.inputs), vec!["VALUE".to_string()]);
        assert_eq!(controller.predictions(), vec![prediction("PLACE_ID")]);

        let blob: HashMap<String, CacheEntry> =
            serde_json::from_str(&store.get_blob("ugps").unwrap()).unwrap();
        assert_eq!(blob["value"].data, vec![prediction("PLACE_ID")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_cache_entry_skips_the_network() {
        let provider = Arc::new(FakeProvider::new());
        let store = Arc::new(MemoryStore::new());

        let entry = CacheEntry {
            data: vec![prediction("CACHED")],
            max_age: Utc::now().timestamp_millis() + 60_000,
        };
        let blob: HashMap<String, CacheEntry> = [("value".to_string(), entry)].into();
        store.set_blob("ugps", serde_json::to_string(&blob).unwrap());

        let controller = controller_with(Arc::clone(&provider), store);
        controller.on_value_change("VALUE");
        run_debounce().await;

        assert_eq!(provider.fetches(), 0);
        assert_eq!(controller.predictions(), vec![prediction("CACHED")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_input_changes_fetch_only_the_last_value() {
        let provider = Arc::new(FakeProvider::new());
        let controller = controller_with(Arc::clone(&provider), Arc::new(MemoryStore::new()));

        controller.on_value_change("m");
        tokio::time::advance(Duration::from_millis(100)).await;
        controller.on_value_change("ma");
        tokio::time::advance(Duration::from_millis(100)).await;
        controller.on_value_change("madrid");
        run_debounce().await;

        assert_eq!(provider.fetches(), 1);
        assert_eq!(*lock(&provider.inputs), vec!["madrid".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_returns_prediction_clears_list_and_renews_token() {
        let provider = Arc::new(FakeProvider::new());
        let controller = controller_with(Arc::clone(&provider), Arc::new(MemoryStore::new()));

        tokio::time::advance(Duration::from_millis(100)).await;
        settle().await;
        let token_before = controller.session_token();
        assert!(token_before.is_some());

        controller.on_value_change("VALUE");
        run_debounce().await;
        assert!(!controller.predictions().is_empty());

        let selected = controller.on_select_prediction(prediction("PLACE_ID"));
        assert_eq!(selected, prediction("PLACE_ID"));
        assert!(controller.predictions().is_empty());
        assert_ne!(controller.session_token(), token_before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_keeps_prior_predictions() {
        let provider = Arc::new(FakeProvider::new());
        let controller = controller_with(Arc::clone(&provider), Arc::new(MemoryStore::new()));

        controller.on_value_change("VALUE");
        run_debounce().await;
        assert_eq!(controller.predictions(), vec![prediction("PLACE_ID")]);

        provider.script(
            Duration::ZERO,
            Err(SuggestError::Provider("boom".to_string())),
        );
        controller.on_value_change("OTHER");
        run_debounce().await;

        assert_eq!(provider.fetches(), 2);
        assert_eq!(controller.predictions(), vec![prediction("PLACE_ID")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let provider = Arc::new(FakeProvider::new());
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(Arc::clone(&provider), Arc::clone(&store));

        // First search resolves slowly, second quickly; the slow response
        // arrives after a newer search and must not clobber its result.
        provider.script(
            Duration::from_millis(500),
            Ok(response_with(prediction("OLD"))),
        );
        provider.script(
            Duration::from_millis(10),
            Ok(response_with(prediction("NEW"))),
        );

        let slow = tokio::spawn(ControllerInner::search(
            Arc::clone(&controller.inner),
            "first".to_string(),
        ));
        settle().await;
        let fast = tokio::spawn(ControllerInner::search(
            Arc::clone(&controller.inner),
            "second".to_string(),
        ));

        tokio::time::advance(Duration::from_millis(600)).await;
        let _ = tokio::join!(slow, fast);

        assert_eq!(controller.predictions(), vec![prediction("NEW")]);
        // The stale fetch never reaches the cache either
        let blob: HashMap<String, CacheEntry> =
            serde_json::from_str(&store.get_blob("ugps").unwrap()).unwrap();
        assert!(blob.contains_key("second"));
        assert!(!blob.contains_key("first"));
    }
}
