//! News provider models and the high-level feed client.

use crate::compose::{NEWS_API_BASE, QueryState, news_url};
use crate::error::{Error, Result};
use crate::feed::{FetchState, Subscription};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;

/// Response body of both the top-headlines and the search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsResponse {
    /// Total number of matching articles reported by the provider.
    #[serde(rename = "totalArticles", default)]
    pub total_articles: u64,
    /// The page of articles returned.
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// One news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Headline.
    pub title: String,
    /// Short teaser paragraph.
    #[serde(default)]
    pub description: Option<String>,
    /// Leading portion of the article body.
    #[serde(default)]
    pub content: Option<String>,
    /// Illustration URL, when the provider has one.
    #[serde(default)]
    pub image: Option<String>,
    /// Canonical article URL.
    pub url: String,
    /// Publishing outlet.
    #[serde(default)]
    pub source: ArticleSource,
    /// Publication timestamp.
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Publishing outlet of an [`Article`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleSource {
    /// Outlet name.
    #[serde(default)]
    pub name: String,
    /// Outlet homepage.
    #[serde(default)]
    pub url: Option<String>,
}

/// Cached news client: category headlines and full-text search.
pub struct NewsFeed {
    subscription: Subscription,
    base_url: String,
    api_key: String,
    query: QueryState,
}

impl NewsFeed {
    /// Create a feed over the given subscription, pointed at the real
    /// provider endpoint.
    #[must_use]
    pub fn new(subscription: Subscription, api_key: impl Into<String>) -> Self {
        Self {
            subscription,
            base_url: NEWS_API_BASE.to_string(),
            api_key: api_key.into(),
            query: QueryState::default(),
        }
    }

    /// Point the feed at a different endpoint (tests use a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the cache freshness TTL (primarily for tests).
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.subscription = self.subscription.with_ttl(ttl);
        self
    }

    /// The query currently driving the feed.
    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Re-point the feed at a new query, recomposing the request URL.
    pub fn select(&mut self, query: QueryState) {
        self.query = query;
        let url = news_url(&self.base_url, &self.query, &self.api_key);
        self.subscription.set_url(Some(url));
    }

    /// Snapshot of the underlying fetch state.
    #[must_use]
    pub fn state(&self) -> FetchState {
        self.subscription.state()
    }

    /// Subscribe to fetch state changes.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<FetchState> {
        self.subscription.watch()
    }

    /// Wait for the current query to settle and decode the articles.
    ///
    /// A surfaced fetch error becomes [`Error::Other`] carrying the
    /// user-facing message; a settled state with neither data nor error
    /// (idle) yields an empty response.
    pub async fn articles(&self) -> Result<NewsResponse> {
        let state = self.subscription.settled().await;
        if let Some(message) = state.error {
            return Err(Error::Other(message));
        }
        match state.data {
            Some(payload) => Ok(serde_json::from_value(payload)?),
            None => Ok(NewsResponse {
                total_articles: 0,
                articles: Vec::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_decodes_provider_shape() {
        let payload = json!({
            "totalArticles": 1203,
            "articles": [{
                "title": "Rust 1.85 released",
                "description": "Edition 2024 lands.",
                "content": "The release train continues...",
                "image": "https://example.com/rust.png",
                "url": "https://example.com/rust-1-85",
                "source": {"name": "Example Wire", "url": "https://example.com"},
                "publishedAt": "2025-02-20T12:00:00Z"
            }]
        });

        let decoded: NewsResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(decoded.total_articles, 1203);
        assert_eq!(decoded.articles.len(), 1);
        let article = &decoded.articles[0];
        assert_eq!(article.title, "Rust 1.85 released");
        assert_eq!(article.source.name, "Example Wire");
        assert!(article.published_at.is_some());
    }

    #[test]
    fn missing_optional_fields_default() {
        let payload = json!({
            "articles": [{
                "title": "Bare minimum",
                "url": "https://example.com/a"
            }]
        });

        let decoded: NewsResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(decoded.total_articles, 0);
        let article = &decoded.articles[0];
        assert!(article.description.is_none());
        assert!(article.image.is_none());
        assert!(article.source.name.is_empty());
    }
}
