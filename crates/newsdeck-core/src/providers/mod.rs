//! Typed clients for the third-party news and weather providers.
//!
//! Each client owns a [`Subscription`](crate::feed::Subscription) and a copy
//! of the credentials, recomposes the request URL whenever its query changes,
//! and decodes the settled JSON payload into typed models.

mod news;
mod weather;

pub use news::{Article, ArticleSource, NewsFeed, NewsResponse};
pub use weather::{WeatherCondition, WeatherReading, WeatherReport, WeatherStation};
