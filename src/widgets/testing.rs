//! In-memory [`DataSource`] for widget and router tests

use async_trait::async_trait;
use std::collections::HashMap;

use crate::sources::{
    AirQuality, AssetPrices, CurrentWeather, DataSource, FeedItem, FeedResponse, FiatRates,
    SourceError,
};
use crate::widgets::finance::{BITCOIN_ID, GOLD_TOKEN_ID, SILVER_TOKEN_ID};
use crate::widgets::weather::Coordinates;

/// Canned upstream answers; unknown feed URLs fail like an unreachable host
#[derive(Debug, Default)]
pub struct FakeSource {
    pub fail_weather: bool,
    pub fail_air_quality: bool,
    pub fail_fiat: bool,
    pub fail_assets: bool,
    pub feeds: HashMap<String, FeedResponse>,
}

fn unreachable() -> SourceError {
    SourceError::Request("connection refused".to_string())
}

#[async_trait]
impl DataSource for FakeSource {
    async fn current_weather(&self, _at: Coordinates) -> Result<CurrentWeather, SourceError> {
        if self.fail_weather {
            return Err(unreachable());
        }
        Ok(CurrentWeather {
            temperature: 27.4,
            windspeed: 9.7,
            weathercode: 2,
        })
    }

    async fn current_air_quality(&self, _at: Coordinates) -> Result<AirQuality, SourceError> {
        if self.fail_air_quality {
            return Err(unreachable());
        }
        Ok(AirQuality { us_aqi: 87 })
    }

    async fn feed(&self, feed_url: &str) -> Result<FeedResponse, SourceError> {
        self.feeds.get(feed_url).cloned().ok_or_else(unreachable)
    }

    async fn fiat_rates(&self, _base: &str) -> Result<FiatRates, SourceError> {
        if self.fail_fiat {
            return Err(SourceError::Status(503));
        }
        Ok(FiatRates::from_pairs([("USD", 1.0), ("INR", 83.0), ("EUR", 0.92)]))
    }

    async fn asset_prices(
        &self,
        _ids: &[&str],
        _vs_currency: &str,
    ) -> Result<AssetPrices, SourceError> {
        if self.fail_assets {
            return Err(SourceError::Decode("expected value at line 1".to_string()));
        }
        Ok(AssetPrices::from_pairs([
            (BITCOIN_ID, 5_600_000.0),
            (GOLD_TOKEN_ID, 232_000.0),
            (SILVER_TOKEN_ID, 2_800.0),
        ]))
    }
}

/// A complete feed item whose link is derived from the title
pub fn story_item(title: &str) -> FeedItem {
    FeedItem {
        title: Some(title.to_string()),
        link: Some(format!(
            "https://news.example.com/{}",
            title.to_lowercase().replace(' ', "-")
        )),
        pub_date: Some("2026-10-18 06:12:45".to_string()),
        description: Some(format!(
            "<p><img src=\"https://img.example.com/{}.jpg\"> {} and what it means for the week ahead.</p>",
            title.len(),
            title
        )),
        content: None,
        thumbnail: None,
        enclosure: None,
    }
}
