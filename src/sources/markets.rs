//! Fiat rate and asset price responses

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::SourceError;

/// `GET /v6/latest/{base}` from open.er-api
#[derive(Debug, Deserialize)]
pub(crate) struct FiatRatesResponse {
    #[serde(default)]
    pub result: Option<String>,

    #[serde(default, rename = "error-type")]
    pub error_type: Option<String>,

    #[serde(default)]
    pub rates: Option<HashMap<String, f64>>,
}

impl FiatRatesResponse {
    pub fn into_rates(self) -> Result<FiatRates, SourceError> {
        if self.result.as_deref() == Some("error") {
            return Err(SourceError::Upstream(
                self.error_type.unwrap_or_else(|| "unknown".to_string()),
            ));
        }
        let rates = self.rates.ok_or(SourceError::MissingField("rates"))?;
        Ok(FiatRates { rates })
    }
}

/// Currency code (uppercase) to rate relative to the base currency
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FiatRates {
    pub rates: HashMap<String, f64>,
}

impl FiatRates {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            rates: pairs
                .into_iter()
                .map(|(code, rate)| (code.to_uppercase(), rate))
                .collect(),
        }
    }

    /// Rate for a currency code, case-insensitive
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.to_uppercase()).copied()
    }
}

/// Asset id to price, already narrowed to one quote currency
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetPrices {
    pub prices: HashMap<String, f64>,
}

impl AssetPrices {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            prices: pairs
                .into_iter()
                .map(|(id, price)| (id.to_string(), price))
                .collect(),
        }
    }

    /// Pick one quote currency out of a CoinGecko `simple/price` body
    pub(crate) fn from_simple_price(
        body: HashMap<String, HashMap<String, f64>>,
        vs_currency: &str,
    ) -> Self {
        let vs = vs_currency.to_lowercase();
        let prices = body
            .into_iter()
            .filter_map(|(id, quotes)| quotes.get(&vs).map(|p| (id, *p)))
            .collect();
        Self { prices }
    }

    pub fn price(&self, id: &str) -> Option<f64> {
        self.prices.get(id).copied()
    }
}
