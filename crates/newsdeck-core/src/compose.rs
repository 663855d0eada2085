//! Query composition: deriving canonical request URLs from UI state.
//!
//! The composers are pure and total; calling them twice with the same inputs
//! yields byte-identical URLs, which is what makes the URL usable as the
//! cache key. A non-empty search query always overrides the selected
//! category. User-supplied values are percent-encoded on the way in.

use std::fmt;
use std::str::FromStr;
use url::form_urlencoded::Serializer;

/// Default news provider endpoint (GNews-shaped API).
pub const NEWS_API_BASE: &str = "https://gnews.io/api/v4";

/// Default weather provider endpoint (OpenWeather-shaped API).
pub const WEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Categories offered by the news provider's top-headlines endpoint.
pub const CATEGORIES: &[&str] = &[
    "general",
    "world",
    "business",
    "technology",
    "entertainment",
    "sports",
    "science",
    "health",
];

/// UI-owned query state: the selected category and the active search term.
///
/// Mutated only by explicit user actions; the composer reads it to produce
/// the cache key, so every mutation deterministically changes the derived
/// URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// Selected headline category.
    pub category: String,
    /// Full-text search term; empty means category browsing.
    pub search_query: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            category: "general".to_string(),
            search_query: String::new(),
        }
    }
}

impl QueryState {
    /// Category-browsing state with no active search.
    #[must_use]
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            category: name.into(),
            search_query: String::new(),
        }
    }

    /// Search state; the category is kept but ignored by the composer.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_query: term.into(),
            ..Self::default()
        }
    }

    /// Select a category, clearing any active search.
    pub fn select_category(&mut self, name: impl Into<String>) {
        self.category = name.into();
        self.search_query.clear();
    }

    /// Submit a search term.
    pub fn submit_search(&mut self, term: impl Into<String>) {
        self.search_query = term.into();
    }
}

/// Temperature units for the weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Celsius.
    #[default]
    Metric,
    /// Fahrenheit.
    Imperial,
}

impl Units {
    /// Wire value for the provider's `units` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Symbol for rendering temperatures in this unit.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" | "celsius" | "c" => Ok(Self::Metric),
            "imperial" | "fahrenheit" | "f" => Ok(Self::Imperial),
            other => Err(format!("unknown units '{other}' (expected metric or imperial)")),
        }
    }
}

/// Compose the news request URL for the current query state.
///
/// A non-empty search term selects the full-text search endpoint with
/// `q=<term>`; otherwise the top-headlines endpoint with
/// `category=<category>`. Both branches fix `lang=en` and append the API
/// key, so the key is part of the resulting cache key.
#[must_use]
pub fn news_url(base: &str, query: &QueryState, api_key: &str) -> String {
    let mut params = Serializer::new(String::new());
    let endpoint = if query.search_query.is_empty() {
        params.append_pair("category", &query.category);
        "top-headlines"
    } else {
        params.append_pair("q", &query.search_query);
        "search"
    };
    params.append_pair("lang", "en");
    params.append_pair("apikey", api_key);
    format!("{base}/{endpoint}?{}", params.finish())
}

/// Compose the weather request URL for a location.
#[must_use]
pub fn weather_url(base: &str, location: &str, units: Units, api_key: &str) -> String {
    let mut params = Serializer::new(String::new());
    params.append_pair("q", location);
    params.append_pair("units", units.as_str());
    params.append_pair("appid", api_key);
    format!("{base}/weather?{}", params.finish())
}
