//! Process-wide response cache with TTL-based freshness.
//!
//! [`ResponseCache`] maps fully-resolved request URLs to whole-entry JSON
//! payloads. Entries are immutable once written and replaced wholesale on
//! refresh; expiry is checked lazily on read against a caller-supplied TTL,
//! and an expired entry remains available as a stale fallback until it is
//! overwritten. The cache is an explicitly constructed, clonable handle so
//! tests can instantiate isolated instances instead of sharing a global.
//!
//! The cache is unbounded by default, matching the session-lived client it
//! serves. [`ResponseCache::with_max_entries`] opts into an oldest-first
//! bound for longer-lived processes.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// Maximum age before a cache entry stops short-circuiting fetches (1 hour).
///
/// Entries older than this are stale: usable only as an error fallback, not
/// as a fresh-hit short-circuit.
pub const DEFAULT_TTL: Duration = Duration::from_millis(3_600_000);

/// One cached response: the parsed JSON payload and when it was stored.
#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    stored_at: Instant,
}

/// Outcome of a cache lookup for a given key and TTL.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// A valid entry younger than the TTL; no fetch is needed.
    Fresh(Value),
    /// An entry older than the TTL; usable only as an error fallback.
    Stale(Value),
    /// No entry for this key.
    Miss,
}

struct Inner {
    entries: HashMap<String, CacheEntry>,
    max_entries: Option<usize>,
}

/// Shared in-memory cache of provider responses keyed by request URL.
///
/// Cloning produces another handle to the same underlying map. Writes are
/// whole-entry replacements; a write always replaces any prior entry for the
/// same key.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Arc<RwLock<Inner>>,
}

impl ResponseCache {
    /// Create an empty, unbounded cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: HashMap::new(),
                max_entries: None,
            })),
        }
    }

    /// Create a cache that evicts the oldest-stored entry once `max_entries`
    /// is exceeded.
    #[must_use]
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: HashMap::new(),
                max_entries: Some(max_entries.max(1)),
            })),
        }
    }

    /// Look up `key`, classifying any entry as fresh or stale against `ttl`.
    ///
    /// Expired entries are not removed; they stay available for stale
    /// fallback until overwritten.
    #[must_use]
    pub fn lookup(&self, key: &str, ttl: Duration) -> Lookup {
        let inner = self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        match inner.entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < ttl => Lookup::Fresh(entry.payload.clone()),
            Some(entry) => Lookup::Stale(entry.payload.clone()),
            None => Lookup::Miss,
        }
    }

    /// Store `payload` under `key`, replacing any prior entry wholesale.
    pub fn insert(&self, key: &str, payload: Value) {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let entry = CacheEntry {
            payload,
            stored_at: Instant::now(),
        };
        let replaced = inner.entries.insert(key.to_string(), entry).is_some();
        debug!(%key, replaced, "cached response");

        if let Some(max) = inner.max_entries {
            while inner.entries.len() > max {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, e)| e.stored_at)
                    .map(|(k, _)| k.clone());
                match oldest {
                    Some(key) => {
                        inner.entries.remove(&key);
                        debug!(%key, "evicted oldest cache entry");
                    },
                    None => break,
                }
            }
        }
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entries
            .len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entries
            .clear();
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn miss_then_fresh_then_stale() {
        let cache = ResponseCache::new();
        let ttl = Duration::from_millis(40);

        assert_eq!(cache.lookup("k", ttl), Lookup::Miss);

        cache.insert("k", json!({"n": 1}));
        assert_eq!(cache.lookup("k", ttl), Lookup::Fresh(json!({"n": 1})));

        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.lookup("k", ttl), Lookup::Stale(json!({"n": 1})));
    }

    #[test]
    fn insert_replaces_wholesale() {
        let cache = ResponseCache::new();
        cache.insert("k", json!({"n": 1}));
        cache.insert("k", json!({"n": 2}));

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.lookup("k", DEFAULT_TTL),
            Lookup::Fresh(json!({"n": 2}))
        );
    }

    #[test]
    fn stale_entries_are_kept_until_overwritten() {
        let cache = ResponseCache::new();
        cache.insert("k", json!("old"));
        std::thread::sleep(Duration::from_millis(10));

        // Lazy expiry never deletes; the stale payload must survive reads.
        assert_eq!(
            cache.lookup("k", Duration::from_millis(1)),
            Lookup::Stale(json!("old"))
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn bounded_cache_evicts_oldest_stored() {
        let cache = ResponseCache::with_max_entries(2);
        cache.insert("a", json!(1));
        std::thread::sleep(Duration::from_millis(5));
        cache.insert("b", json!(2));
        std::thread::sleep(Duration::from_millis(5));
        cache.insert("c", json!(3));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.lookup("a", DEFAULT_TTL), Lookup::Miss);
        assert_eq!(cache.lookup("b", DEFAULT_TTL), Lookup::Fresh(json!(2)));
        assert_eq!(cache.lookup("c", DEFAULT_TTL), Lookup::Fresh(json!(3)));
    }

    #[test]
    fn clones_share_entries() {
        let cache = ResponseCache::new();
        let handle = cache.clone();
        cache.insert("k", json!(true));

        assert_eq!(handle.lookup("k", DEFAULT_TTL), Lookup::Fresh(json!(true)));
    }
}
