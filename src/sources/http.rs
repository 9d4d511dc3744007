//! reqwest-backed [`DataSource`]

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use super::markets::FiatRatesResponse;
use super::open_meteo::{AirQualityResponse, ForecastResponse};
use super::{AirQuality, AssetPrices, CurrentWeather, DataSource, FeedResponse, FiatRates, SourceError};
use crate::config::UpstreamConfig;
use crate::widgets::weather::Coordinates;

/// Talks to the real upstream APIs
pub struct HttpSource {
    client: Client,
    config: UpstreamConfig,
}

impl HttpSource {
    /// Create a new source with the configured base URLs
    pub fn new(config: UpstreamConfig) -> Result<Self, SourceError> {
        let mut builder = Client::builder().user_agent(concat!("Bulletin/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        tracing::debug!(url, "Fetching upstream");

        let response = self.client.get(url).query(query).send().await?;
        let response = check_status(response)?;

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}

fn check_status(response: Response) -> Result<Response, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    Ok(response)
}

#[async_trait]
impl DataSource for HttpSource {
    async fn current_weather(&self, at: Coordinates) -> Result<CurrentWeather, SourceError> {
        let response: ForecastResponse = self
            .get_json(
                &self.config.forecast_url,
                &[
                    ("latitude", at.latitude.to_string()),
                    ("longitude", at.longitude.to_string()),
                    ("current_weather", "true".to_string()),
                ],
            )
            .await?;

        response.into_current()
    }

    async fn current_air_quality(&self, at: Coordinates) -> Result<AirQuality, SourceError> {
        let response: AirQualityResponse = self
            .get_json(
                &self.config.air_quality_url,
                &[
                    ("latitude", at.latitude.to_string()),
                    ("longitude", at.longitude.to_string()),
                    ("current", "us_aqi".to_string()),
                ],
            )
            .await?;

        response.into_reading()
    }

    async fn feed(&self, feed_url: &str) -> Result<FeedResponse, SourceError> {
        self.get_json(
            &self.config.feed_proxy_url,
            &[("rss_url", feed_url.to_string())],
        )
        .await
    }

    async fn fiat_rates(&self, base: &str) -> Result<FiatRates, SourceError> {
        let url = format!(
            "{}/{}",
            self.config.fiat_rates_url.trim_end_matches('/'),
            base.to_uppercase()
        );
        let response: FiatRatesResponse = self.get_json(&url, &[]).await?;

        response.into_rates()
    }

    async fn asset_prices(
        &self,
        ids: &[&str],
        vs_currency: &str,
    ) -> Result<AssetPrices, SourceError> {
        let body: HashMap<String, HashMap<String, f64>> = self
            .get_json(
                &self.config.asset_prices_url,
                &[
                    ("ids", ids.join(",")),
                    ("vs_currencies", vs_currency.to_lowercase()),
                ],
            )
            .await?;

        Ok(AssetPrices::from_simple_price(body, vs_currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_upstream_is_request_error() {
        let config = UpstreamConfig {
            forecast_url: "http://127.0.0.1:9/v1/forecast".to_string(),
            request_timeout_secs: Some(2),
            ..Default::default()
        };
        let source = HttpSource::new(config).unwrap();

        let err = source
            .current_weather(Coordinates {
                latitude: 18.5204,
                longitude: 73.8567,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Request(_)));
    }
}
