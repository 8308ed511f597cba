//! Suggest client state.
//!
//! Owns the debouncer, the response cache, the in-flight request slot, and
//! the currently displayed suggestion list. Network work happens on the
//! worker thread; this state machine runs on the UI thread and exchanges
//! messages with the worker over channels.

use std::sync::mpsc::{Receiver, Sender};

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::cache::ResponseCache;
use crate::config::SearchConfig;
use crate::query::{Debouncer, QueryKey};
use crate::suggestion::{Suggestion, SuggestionKind, normalize_records};

/// Request messages sent to the search worker thread.
#[derive(Debug)]
pub enum SearchRequest {
    /// Run a suggest query against the backend
    Search {
        key: QueryKey,
        /// Unique ID for this request, used to filter stale responses
        request_id: u64,
        cancel_token: CancellationToken,
    },
    /// Fill missing slugs of the published list with secondary lookups
    Enrich {
        lookups: Vec<EnrichLookup>,
        /// Generation of the list these lookups belong to
        generation: u64,
    },
}

/// One secondary lookup target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichLookup {
    pub id: u64,
    pub kind: SuggestionKind,
}

/// Response messages received from the search worker thread.
#[derive(Debug)]
pub enum SearchResponse {
    /// Raw records for a completed suggest query
    Results { records: Vec<Value>, request_id: u64 },
    /// The request failed with a genuine transport or server error
    Failed { message: String, request_id: u64 },
    /// The request was cancelled
    Cancelled { request_id: u64 },
    /// One successful enrichment lookup
    Enriched {
        id: u64,
        kind: SuggestionKind,
        record: Value,
        generation: u64,
    },
}

/// The in-flight request slot; at most one exists per client.
#[derive(Debug)]
struct InFlightRequest {
    key: QueryKey,
    request_id: u64,
    cancel_token: CancellationToken,
}

/// Incremental search client state machine.
pub struct SuggestState {
    debouncer: Debouncer,
    cache: ResponseCache,
    /// Currently displayed list; always the complete output of one query.
    suggestions: Vec<Suggestion>,
    loading: bool,
    error: Option<String>,
    current_key: QueryKey,
    in_flight: Option<InFlightRequest>,
    /// Incremented for each dispatched request; stale responses carry an
    /// older id and are dropped.
    request_id: u64,
    /// Bumped every time the displayed list is replaced; enrichment results
    /// carrying an older generation are discarded.
    list_generation: u64,
    /// Channel to send requests to the worker thread
    request_tx: Option<Sender<SearchRequest>>,
    /// Channel to receive responses from the worker thread
    response_rx: Option<Receiver<SearchResponse>>,
}

impl SuggestState {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            debouncer: Debouncer::new(config.debounce_ms),
            cache: ResponseCache::new(config.cache_ttl_ms),
            suggestions: Vec::new(),
            loading: false,
            error: None,
            current_key: QueryKey::empty(),
            in_flight: None,
            request_id: 0,
            list_generation: 0,
            request_tx: None,
            response_rx: None,
        }
    }

    /// Set the channel handles for communication with the worker thread.
    pub fn set_channels(
        &mut self,
        request_tx: Sender<SearchRequest>,
        response_rx: Receiver<SearchResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_key(&self) -> &QueryKey {
        &self.current_key
    }

    /// Feed one keystroke's worth of raw input.
    ///
    /// Whitespace-only input is the "no query" sentinel: the timer and the
    /// displayed list clear immediately and the in-flight request is
    /// cancelled, without waiting for the debounce delay.
    pub fn on_input_change(&mut self, raw: &str) {
        let key = QueryKey::normalize(raw);
        if key.is_empty() {
            self.debouncer.cancel();
            self.cancel_in_flight();
            self.current_key = QueryKey::empty();
            self.suggestions.clear();
            self.list_generation = self.list_generation.wrapping_add(1);
            self.loading = false;
            self.error = None;
            return;
        }
        self.current_key = key.clone();
        self.debouncer.schedule(key);
    }

    /// Event-loop pump: fire the debouncer when it is due and apply any
    /// responses the worker has delivered.
    pub fn tick(&mut self) {
        if let Some(key) = self.debouncer.take_ready() {
            self.dispatch(key);
        }
        self.poll_responses();
    }

    /// Cancel the in-flight request and pending timer; called when the
    /// consuming view goes away. Dropping the sender also shuts the worker
    /// down once its channel drains.
    pub fn on_detach(&mut self) {
        self.debouncer.cancel();
        self.cancel_in_flight();
        self.request_tx = None;
        self.response_rx = None;
        self.loading = false;
    }

    /// Dispatch a debounced key: serve from cache when possible, otherwise
    /// supersede the in-flight request with a new one.
    fn dispatch(&mut self, key: QueryKey) {
        if let Some(cached) = self.cache.get(&key) {
            log::debug!("cache hit for '{}'", key.folded());
            let list = cached.to_vec();
            self.current_key = key;
            self.loading = false;
            self.error = None;
            self.publish(list);
            return;
        }

        if let Some(in_flight) = &self.in_flight {
            if in_flight.key == key {
                // Same key already on the wire; keep waiting on it.
                return;
            }
        }
        self.cancel_in_flight();

        let Some(tx) = &self.request_tx else {
            return;
        };
        self.request_id = self.request_id.wrapping_add(1);
        let cancel_token = CancellationToken::new();
        let request = SearchRequest::Search {
            key: key.clone(),
            request_id: self.request_id,
            cancel_token: cancel_token.clone(),
        };
        if tx.send(request).is_ok() {
            log::debug!("dispatched '{}' as request {}", key.as_str(), self.request_id);
            self.loading = true;
            self.error = None;
            self.in_flight = Some(InFlightRequest {
                key,
                request_id: self.request_id,
                cancel_token,
            });
        }
    }

    /// Cancel the in-flight request, aborting it at the transport level.
    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            log::debug!(
                "cancelling request {} ('{}')",
                in_flight.request_id,
                in_flight.key.as_str()
            );
            in_flight.cancel_token.cancel();
        }
    }

    fn poll_responses(&mut self) {
        loop {
            let response = match &self.response_rx {
                Some(rx) => match rx.try_recv() {
                    Ok(response) => response,
                    Err(_) => break,
                },
                None => break,
            };
            self.handle_response(response);
        }
    }

    fn handle_response(&mut self, response: SearchResponse) {
        match response {
            SearchResponse::Results {
                records,
                request_id,
            } => self.apply_results(records, request_id),
            SearchResponse::Failed {
                message,
                request_id,
            } => self.apply_failure(message, request_id),
            SearchResponse::Cancelled { request_id } => {
                log::debug!("request {} confirmed cancelled", request_id);
            }
            SearchResponse::Enriched {
                id,
                kind,
                record,
                generation,
            } => self.apply_enrichment(id, kind, &record, generation),
        }
    }

    fn apply_results(&mut self, records: Vec<Value>, request_id: u64) {
        let Some(in_flight) = &self.in_flight else {
            log::debug!("dropping response for request {}: nothing in flight", request_id);
            return;
        };
        if in_flight.request_id != request_id {
            log::debug!("dropping stale response for request {}", request_id);
            return;
        }

        let key = in_flight.key.clone();
        self.in_flight = None;
        self.loading = false;
        self.error = None;

        let list = normalize_records(&records);
        self.cache.put(&key, list.clone());
        self.publish(list);
    }

    fn apply_failure(&mut self, message: String, request_id: u64) {
        let Some(in_flight) = &self.in_flight else {
            return;
        };
        if in_flight.request_id != request_id {
            log::debug!("dropping stale failure for request {}", request_id);
            return;
        }

        log::warn!("search request {} failed: {}", request_id, message);
        self.in_flight = None;
        self.loading = false;
        // Not cached: retrying the same key re-dispatches.
        self.publish(Vec::new());
        self.error = Some(message);
    }

    /// Replace the displayed list and kick off slug enrichment for it.
    fn publish(&mut self, list: Vec<Suggestion>) {
        self.suggestions = list;
        self.list_generation = self.list_generation.wrapping_add(1);
        self.request_enrichment();
    }

    /// Queue best-effort lookups for entries still missing a slug.
    ///
    /// This goes straight to the worker; it never touches the debouncer, the
    /// cache, or the in-flight request slot.
    fn request_enrichment(&mut self) {
        let lookups: Vec<EnrichLookup> = self
            .suggestions
            .iter()
            .filter(|suggestion| {
                suggestion.needs_slug()
                    && matches!(
                        suggestion.kind,
                        SuggestionKind::Restaurant | SuggestionKind::Menu
                    )
            })
            .map(|suggestion| EnrichLookup {
                id: suggestion.id,
                kind: suggestion.kind,
            })
            .collect();
        if lookups.is_empty() {
            return;
        }
        if let Some(tx) = &self.request_tx {
            let _ = tx.send(SearchRequest::Enrich {
                lookups,
                generation: self.list_generation,
            });
        }
    }

    fn apply_enrichment(&mut self, id: u64, kind: SuggestionKind, record: &Value, generation: u64) {
        if generation != self.list_generation {
            log::debug!(
                "dropping enrichment for superseded list (generation {})",
                generation
            );
            return;
        }
        let Some(suggestion) = self
            .suggestions
            .iter_mut()
            .find(|suggestion| suggestion.id == id && suggestion.kind == kind)
        else {
            return;
        };
        merge_enrichment(suggestion, record);
    }
}

/// Fill `slug`, `image`, and `rating` from a secondary lookup, each field
/// only while its current value is still empty/unknown.
fn merge_enrichment(suggestion: &mut Suggestion, record: &Value) {
    if suggestion.needs_slug() {
        if let Some(slug) = string_field(record, &["slug", "slug_resto"]) {
            if slug != "null" {
                suggestion.slug = slug;
            }
        }
    }
    if suggestion.image.is_none() {
        suggestion.image = string_field(record, &["image", "photo", "gambar"]);
    }
    if suggestion.rating.is_none() {
        suggestion.rating = record.get("rating").and_then(Value::as_f64);
    }
}

fn string_field(record: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| record.get(*name).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(|text| text.to_string())
}

#[cfg(test)]
#[path = "search_state_tests.rs"]
mod search_state_tests;
