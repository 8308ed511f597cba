//! Incremental suggest pipeline: debounced dispatch, cancellable transport,
//! and the client state machine that ties them together.

pub mod search_state;
pub mod transport;
pub mod worker;

pub use search_state::{EnrichLookup, SearchRequest, SearchResponse, SuggestState};
pub use transport::{SearchPage, SearchTransport};
pub use worker::spawn_worker;

use std::sync::mpsc;

use crate::config::SearchConfig;

/// Create a client wired to a freshly spawned worker thread.
pub fn connect(config: &SearchConfig) -> SuggestState {
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    spawn_worker(config, request_rx, response_tx);
    let mut state = SuggestState::new(config);
    state.set_channels(request_tx, response_rx);
    state
}
