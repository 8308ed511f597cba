//! Time-expiring cache of normalized suggestion lists.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::query::QueryKey;
use crate::suggestion::Suggestion;

#[derive(Debug)]
struct CacheEntry {
    value: Vec<Suggestion>,
    expires_at: Instant,
}

/// Per-client cache from case-folded query key to a fetched suggestion list.
///
/// Lookups expire entries lazily; nothing sweeps the map in the background
/// and the map itself is unbounded. Expired entries are removed as they are
/// touched.
#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl: Duration::from_millis(ttl_ms),
        }
    }

    /// Look up an unexpired entry, removing it when the TTL has passed.
    pub fn get(&mut self, key: &QueryKey) -> Option<&[Suggestion]> {
        let now = Instant::now();
        let expired = match self.entries.get(key.folded()) {
            Some(entry) => entry.expires_at <= now,
            None => return None,
        };
        if expired {
            log::debug!("evicting expired cache entry for '{}'", key.folded());
            self.entries.remove(key.folded());
            return None;
        }
        self.entries
            .get(key.folded())
            .map(|entry| entry.value.as_slice())
    }

    /// Store a fetched list under the normalized key.
    pub fn put(&mut self, key: &QueryKey, value: Vec<Suggestion>) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.insert(key.folded().to_string(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
