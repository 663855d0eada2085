//! # newsdeck-core
//!
//! Core functionality for newsdeck - a cached news, weather, and blog
//! dashboard.
//!
//! The centerpiece is the cached fetcher: a request-deduplicating,
//! time-expiring, stale-while-error JSON fetch layer sitting in front of
//! third-party HTTP APIs, driven by pure query composers that derive the
//! request URL (and therefore the cache key) from UI state.
//!
//! ## Architecture
//!
//! - **Compose**: pure derivation of provider URLs from query state
//! - **Cache**: process-wide, injected TTL cache keyed by URL
//! - **Feed**: per-consumer subscriptions with race-safe re-fetching
//! - **Providers**: typed news and weather clients over the feed layer
//! - **Blog / Summarize / Config**: local post storage, extractive
//!   summaries, and credential handling
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use newsdeck_core::{Fetcher, NewsFeed, QueryState, ResponseCache, Subscription};
//!
//! # async fn run() -> newsdeck_core::Result<()> {
//! let cache = ResponseCache::new();
//! let fetcher = Arc::new(Fetcher::new()?);
//!
//! let mut feed = NewsFeed::new(Subscription::new(cache, fetcher), "api-key");
//! feed.select(QueryState::category("technology"));
//! let response = feed.articles().await?;
//! println!("{} articles", response.articles.len());
//! # Ok(())
//! # }
//! ```
//!
//! Freshness semantics: a URL fetched within the last hour settles
//! immediately from cache with no network call; an expired entry is
//! refreshed, falling back to the stale payload if the refresh fails; a
//! fetch superseded by a newer query is discarded when it resolves.

/// Local blog post storage
pub mod blog;
/// Process-wide TTL response cache
pub mod cache;
/// Pure URL composition from query state
pub mod compose;
/// Credentials and dashboard defaults
pub mod config;
/// Error types and result aliases
pub mod error;
/// Cached fetcher subscriptions
pub mod feed;
/// HTTP transport with provider status mapping
pub mod fetch;
/// Typed news and weather provider clients
pub mod providers;
/// Extractive article summarizer
pub mod summarize;

// Re-export commonly used types
pub use blog::{BlogPost, BlogStore, MAX_TITLE_LEN, StorageUsage};
pub use cache::{DEFAULT_TTL, Lookup, ResponseCache};
pub use compose::{
    CATEGORIES, NEWS_API_BASE, QueryState, Units, WEATHER_API_BASE, news_url, weather_url,
};
pub use config::Config;
pub use error::{Error, Result};
pub use feed::{FetchState, Subscription};
pub use fetch::Fetcher;
pub use providers::{
    Article, ArticleSource, NewsFeed, NewsResponse, WeatherCondition, WeatherReading,
    WeatherReport, WeatherStation,
};
pub use summarize::summarize;
