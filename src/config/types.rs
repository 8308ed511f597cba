// Search client configuration type definitions

use serde::Deserialize;

/// Default backend base URL
fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

/// Default debounce delay in milliseconds
fn default_debounce_ms() -> u64 {
    250
}

/// Default cache TTL in milliseconds
fn default_cache_ttl_ms() -> u64 {
    30_000
}

/// Default page size for the paginated search endpoint
fn default_page_limit() -> u32 {
    10
}

/// Search client configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search backend, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// How long input must stay unchanged before a request is dispatched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How long a fetched suggestion list stays servable from cache
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,
    /// Page size for the paginated search endpoint
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            base_url: default_base_url(),
            debounce_ms: default_debounce_ms(),
            cache_ttl_ms: default_cache_ttl_ms(),
            page_limit: default_page_limit(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Search client configuration
    #[serde(default)]
    pub search: SearchConfig,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
