//! The cached fetcher: per-consumer subscriptions over the shared cache.
//!
//! A [`Subscription`] binds one consumer to one cache key at a time. Calling
//! [`Subscription::set_url`] re-evaluates from scratch: a cache entry younger
//! than the TTL settles the subscription immediately without touching the
//! network, otherwise a single fetch task is spawned. Repeated navigation to
//! a previously visited query therefore incurs no request and no loading
//! flicker.
//!
//! Every `set_url` call bumps a generation counter. An in-flight response
//! whose generation no longer matches is discarded when it resolves, so a
//! late response for a superseded URL can never clobber the state of the
//! current one. Results are published through a `watch` channel; consumers
//! take snapshots with [`Subscription::state`], subscribe for changes with
//! [`Subscription::watch`], or await quiescence with
//! [`Subscription::settled`].
//!
//! No timeout is enforced at this layer. A hung request keeps the
//! subscription loading until the transport below resolves or errors.

use crate::cache::{DEFAULT_TTL, Lookup, ResponseCache};
use crate::fetch::Fetcher;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Externally observed result of one subscription to one cache key.
///
/// `data` retains its previous value while a refresh is loading, so a view
/// can keep rendering the old payload instead of flashing empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    /// The most recent payload, if any.
    pub data: Option<Value>,
    /// Whether a network request is currently outstanding.
    pub loading: bool,
    /// User-facing failure message; only set when no fallback data exists.
    pub error: Option<String>,
}

impl FetchState {
    fn settled(payload: Value) -> Self {
        Self {
            data: Some(payload),
            loading: false,
            error: None,
        }
    }

    /// Whether the subscription has finished evaluating its current key.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.loading
    }
}

/// One consumer's binding to a cache key, re-established on every
/// [`set_url`](Self::set_url) call.
pub struct Subscription {
    cache: ResponseCache,
    fetcher: Arc<Fetcher>,
    ttl: Duration,
    /// Generation guard: state publication happens under this lock so a
    /// superseded fetch task can never interleave with a newer `set_url`.
    current: Arc<Mutex<u64>>,
    tx: Arc<watch::Sender<FetchState>>,
}

impl Subscription {
    /// Create an idle subscription over the given cache and transport.
    #[must_use]
    pub fn new(cache: ResponseCache, fetcher: Arc<Fetcher>) -> Self {
        let (tx, _rx) = watch::channel(FetchState::default());
        Self {
            cache,
            fetcher,
            ttl: DEFAULT_TTL,
            current: Arc::new(Mutex::new(0)),
            tx: Arc::new(tx),
        }
    }

    /// Override the freshness TTL (primarily for tests).
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Point the subscription at a new request URL, or at nothing.
    ///
    /// `None` (or an empty string) returns the subscription to idle with no
    /// network call. Otherwise the cache decision is re-made from scratch:
    /// a fresh entry settles synchronously, a miss or stale entry publishes
    /// a loading state and spawns exactly one fetch task. Must be called
    /// from within a tokio runtime.
    pub fn set_url(&self, url: Option<String>) {
        let mut guard = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard += 1;
        let generation = *guard;

        let Some(url) = url.filter(|u| !u.is_empty()) else {
            self.tx.send_replace(FetchState::default());
            return;
        };

        let stale = match self.cache.lookup(&url, self.ttl) {
            Lookup::Fresh(payload) => {
                debug!(%url, "fresh cache hit");
                self.tx.send_replace(FetchState::settled(payload));
                return;
            },
            Lookup::Stale(payload) => Some(payload),
            Lookup::Miss => None,
        };

        // Keep showing the previous payload while the refresh is in flight.
        let previous = self.tx.borrow().data.clone();
        self.tx.send_replace(FetchState {
            data: previous,
            loading: true,
            error: None,
        });

        let cache = self.cache.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let tx = Arc::clone(&self.tx);
        let current = Arc::clone(&self.current);
        tokio::spawn(async move {
            let result = fetcher.fetch_json(&url).await;

            let guard = current.lock().unwrap_or_else(PoisonError::into_inner);
            if *guard != generation {
                debug!(%url, generation, "discarding superseded response");
                return;
            }

            match result {
                Ok(payload) => {
                    cache.insert(&url, payload.clone());
                    tx.send_replace(FetchState::settled(payload));
                },
                Err(err) => {
                    if let Some(payload) = stale {
                        // Slightly outdated data beats an error screen.
                        warn!(%url, error = %err, "refresh failed, serving stale payload");
                        tx.send_replace(FetchState::settled(payload));
                    } else {
                        warn!(%url, error = %err, "fetch failed with no fallback");
                        tx.send_replace(FetchState {
                            data: None,
                            loading: false,
                            error: Some(err.user_message()),
                        });
                    }
                },
            }
            drop(guard);
        });
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> FetchState {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<FetchState> {
        self.tx.subscribe()
    }

    /// Wait until the subscription is no longer loading and return the
    /// settled state.
    pub async fn settled(&self) -> FetchState {
        let mut rx = self.tx.subscribe();
        loop {
            let state = rx.borrow_and_update().clone();
            if state.is_settled() {
                return state;
            }
            if rx.changed().await.is_err() {
                return self.state();
            }
        }
    }
}
