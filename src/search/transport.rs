//! HTTP transport for the search backend.
//!
//! Owns the reqwest client and the endpoint layout. The suggest call races
//! the request against a cancellation token so a superseded query is aborted
//! at the HTTP layer instead of merely having its result ignored.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::error::SuggestError;

/// Response envelope for list endpoints.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    data: ListData,
}

#[derive(Debug, Default, Deserialize)]
struct ListData {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    total: Option<u64>,
}

/// Response envelope for single-record endpoints.
#[derive(Debug, Deserialize)]
struct RecordEnvelope {
    data: Value,
}

/// One page of raw results from the paginated search endpoint.
#[derive(Debug)]
pub struct SearchPage {
    pub results: Vec<Value>,
    pub total: Option<u64>,
}

/// reqwest-backed client for the search backend.
#[derive(Debug, Clone)]
pub struct SearchTransport {
    client: Client,
    base_url: String,
}

impl SearchTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(&config.base_url)
    }

    /// Cross-entity suggest query, abortable through the cancel token.
    ///
    /// The token is checked before the request goes out and raced against it
    /// while in flight; dropping the request future aborts the connection.
    pub async fn search(
        &self,
        keyword: &str,
        cancel_token: &CancellationToken,
    ) -> Result<Vec<Value>, SuggestError> {
        if cancel_token.is_cancelled() {
            return Err(SuggestError::Cancelled);
        }

        let url = format!("{}/search", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("q", keyword), ("type", "all")]);

        tokio::select! {
            biased;

            _ = cancel_token.cancelled() => {
                log::debug!("search for '{}' cancelled in flight", keyword);
                Err(SuggestError::Cancelled)
            }

            data = Self::fetch_list(request) => data.map(|data| data.results),
        }
    }

    /// Paginated variant used by the full results page.
    pub async fn search_page(
        &self,
        keyword: &str,
        page: u32,
        limit: u32,
        kind: &str,
    ) -> Result<SearchPage, SuggestError> {
        let url = format!("{}/search", self.base_url);
        let request = self.client.get(&url).query(&[
            ("q", keyword.to_string()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
            ("type", kind.to_string()),
        ]);
        let data = Self::fetch_list(request).await?;
        Ok(SearchPage {
            results: data.results,
            total: data.total,
        })
    }

    /// Single-restaurant lookup for slug enrichment.
    pub async fn fetch_restaurant(&self, id: u64) -> Result<Value, SuggestError> {
        self.fetch_record(&format!("{}/restaurants/{}", self.base_url, id))
            .await
    }

    /// Single-menu lookup for slug enrichment.
    pub async fn fetch_menu(&self, id: u64) -> Result<Value, SuggestError> {
        self.fetch_record(&format!("{}/menus/{}", self.base_url, id))
            .await
    }

    async fn fetch_record(&self, url: &str) -> Result<Value, SuggestError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SuggestError::Network(e.to_string()))?;
        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SuggestError::Api { code, message });
        }
        let envelope: RecordEnvelope = response
            .json()
            .await
            .map_err(|e| SuggestError::Parse(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn fetch_list(request: reqwest::RequestBuilder) -> Result<ListData, SuggestError> {
        let response = request
            .send()
            .await
            .map_err(|e| SuggestError::Network(e.to_string()))?;
        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SuggestError::Api { code, message });
        }
        let envelope: ListEnvelope = response
            .json()
            .await
            .map_err(|e| SuggestError::Parse(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod transport_tests;
