//! Weather provider models and the high-level station client.
//!
//! The provider signals an unknown location by embedding `cod: "404"` in an
//! otherwise successful body. That is a domain error, never a success, and
//! is mapped to [`Error::NotFound`] before deserialization.

use crate::compose::{Units, WEATHER_API_BASE, weather_url};
use crate::error::{Error, Result};
use crate::feed::{FetchState, Subscription};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Current conditions for one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Resolved location name.
    pub name: String,
    /// Temperature readings.
    pub main: WeatherReading,
    /// Active weather conditions, most significant first.
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

impl WeatherReport {
    /// The most significant condition label, if any ("Clear", "Rain", ...).
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.weather.first().map(|c| c.main.as_str())
    }
}

/// Temperature block of a [`WeatherReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Current temperature in the requested units.
    pub temp: f64,
}

/// One active weather condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Condition group ("Clear", "Clouds", "Rain", ...).
    pub main: String,
    /// Finer-grained description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Cached weather client for a single observed location at a time.
pub struct WeatherStation {
    subscription: Subscription,
    base_url: String,
    api_key: String,
    units: Units,
}

impl WeatherStation {
    /// Create a station over the given subscription, pointed at the real
    /// provider endpoint.
    #[must_use]
    pub fn new(subscription: Subscription, api_key: impl Into<String>, units: Units) -> Self {
        Self {
            subscription,
            base_url: WEATHER_API_BASE.to_string(),
            api_key: api_key.into(),
            units,
        }
    }

    /// Point the station at a different endpoint (tests use a mock server).
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

    /// Units the station was configured with.
    #[must_use]
    pub const fn units(&self) -> Units {
        self.units
    }

    /// Re-point the station at a location, recomposing the request URL.
    pub fn observe(&self, location: &str) {
        let url = weather_url(&self.base_url, location, self.units, &self.api_key);
        self.subscription.set_url(Some(url));
    }

    /// Snapshot of the underlying fetch state.
    #[must_use]
    pub fn state(&self) -> FetchState {
        self.subscription.state()
    }

    /// Wait for the observed location to settle and decode the report.
    pub async fn report(&self) -> Result<WeatherReport> {
        let state = self.subscription.settled().await;
        if let Some(message) = state.error {
            return Err(Error::Other(message));
        }
        match state.data {
            Some(payload) => decode_report(&payload),
            None => Err(Error::Other("no location observed".to_string())),
        }
    }
}

/// Decode a raw weather payload, honoring the embedded `cod` domain error.
pub fn decode_report(payload: &Value) -> Result<WeatherReport> {
    if payload.get("cod").and_then(Value::as_str) == Some("404") {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("location not found");
        return Err(Error::NotFound(message.to_string()));
    }
    Ok(serde_json::from_value(payload.clone())?)
}
