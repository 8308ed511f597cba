//! Search worker thread.
//!
//! Receives requests over a channel, talks to the backend through the async
//! transport, and sends responses back to the client state. Runs a
//! single-threaded tokio runtime of its own so the UI thread never blocks on
//! the network.

use std::sync::mpsc::{Receiver, Sender};

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use super::search_state::{EnrichLookup, SearchRequest, SearchResponse};
use super::transport::SearchTransport;
use crate::config::SearchConfig;
use crate::error::SuggestError;
use crate::query::QueryKey;
use crate::suggestion::SuggestionKind;

/// Spawn the search worker thread.
///
/// The worker drains the request channel until it closes, which happens when
/// the client drops its sender on detach.
pub fn spawn_worker(
    config: &SearchConfig,
    request_rx: Receiver<SearchRequest>,
    response_tx: Sender<SearchResponse>,
) {
    let transport = SearchTransport::from_config(config);

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                log::error!("failed to create search worker runtime: {}", err);
                return;
            }
        };
        rt.block_on(worker_loop(transport, request_rx, response_tx));
        log::debug!("search worker shutting down");
    });
}

/// Main worker loop - processes requests until the channel is closed.
///
/// Blocking `recv()` is fine here since the thread exists for this loop.
async fn worker_loop(
    transport: SearchTransport,
    request_rx: Receiver<SearchRequest>,
    response_tx: Sender<SearchResponse>,
) {
    while let Ok(request) = request_rx.recv() {
        match request {
            SearchRequest::Search {
                key,
                request_id,
                cancel_token,
            } => {
                handle_search(&transport, &key, request_id, cancel_token, &response_tx).await;
            }
            SearchRequest::Enrich {
                lookups,
                generation,
            } => {
                handle_enrich(&transport, lookups, generation, &response_tx).await;
            }
        }
    }
}

/// Run one suggest query and report its outcome.
async fn handle_search(
    transport: &SearchTransport,
    key: &QueryKey,
    request_id: u64,
    cancel_token: CancellationToken,
    response_tx: &Sender<SearchResponse>,
) {
    let response = match transport.search(key.as_str(), &cancel_token).await {
        Ok(records) => SearchResponse::Results {
            records,
            request_id,
        },
        Err(SuggestError::Cancelled) => SearchResponse::Cancelled { request_id },
        Err(err) => SearchResponse::Failed {
            message: err.to_string(),
            request_id,
        },
    };
    let _ = response_tx.send(response);
}

/// Run the slug lookups for one published list concurrently.
///
/// Each lookup is independent: a failure is logged and dropped without
/// touching the others, and every success is delivered as its own message.
async fn handle_enrich(
    transport: &SearchTransport,
    lookups: Vec<EnrichLookup>,
    generation: u64,
    response_tx: &Sender<SearchResponse>,
) {
    let futures = lookups.into_iter().map(|lookup| {
        let response_tx = response_tx.clone();
        async move {
            let fetched = match lookup.kind {
                SuggestionKind::Restaurant => transport.fetch_restaurant(lookup.id).await,
                SuggestionKind::Menu => transport.fetch_menu(lookup.id).await,
                SuggestionKind::Category => return,
            };
            match fetched {
                Ok(record) => {
                    let _ = response_tx.send(SearchResponse::Enriched {
                        id: lookup.id,
                        kind: lookup.kind,
                        record,
                        generation,
                    });
                }
                Err(err) => {
                    log::debug!(
                        "enrichment lookup for {} {} failed: {}",
                        lookup.kind.label(),
                        lookup.id,
                        err
                    );
                }
            }
        }
    });
    join_all(futures).await;
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
