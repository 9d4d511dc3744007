//! Upstream Data Sources
//!
//! Typed access to the third-party APIs the widgets read from:
//! - Open-Meteo (current weather, current US AQI)
//! - rss2json (syndication feeds converted to JSON)
//! - open.er-api (USD based fiat rates)
//! - CoinGecko (crypto and tokenized commodity prices)
//!
//! Widgets only see the [`DataSource`] trait, so tests can swap in a fake.

mod feed;
mod http;
mod markets;
mod open_meteo;

pub use feed::{Enclosure, FeedItem, FeedResponse};
pub use http::HttpSource;
pub use markets::{AssetPrices, FiatRates};
pub use open_meteo::{AirQuality, CurrentWeather};

use async_trait::async_trait;

use crate::widgets::weather::Coordinates;

/// Common trait for every upstream the widgets consume
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Current temperature, wind speed and weather code at a coordinate
    async fn current_weather(&self, at: Coordinates) -> Result<CurrentWeather, SourceError>;

    /// Current US AQI at a coordinate
    async fn current_air_quality(&self, at: Coordinates) -> Result<AirQuality, SourceError>;

    /// A syndication feed, converted to JSON by the feed proxy
    async fn feed(&self, feed_url: &str) -> Result<FeedResponse, SourceError>;

    /// Fiat exchange rates relative to `base`
    async fn fiat_rates(&self, base: &str) -> Result<FiatRates, SourceError>;

    /// Prices of the given asset ids quoted in `vs_currency`
    async fn asset_prices(
        &self,
        ids: &[&str],
        vs_currency: &str,
    ) -> Result<AssetPrices, SourceError>;
}

/// Errors that can occur while talking to an upstream
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Upstream reported an error: {0}")]
    Upstream(String),

    #[error("Response is missing field `{0}`")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::Decode(e.to_string())
        } else {
            SourceError::Request(e.to_string())
        }
    }
}
