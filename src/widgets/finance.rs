//! Finance Widget
//!
//! Five fixed price cards in the local currency: gold per gram, silver per
//! kilogram, Bitcoin, and the USD and EUR exchange rates. Fiat rates and asset
//! prices come from two sources; each card degrades on its own when the data
//! it needs is missing.

use serde::{Deserialize, Serialize};

use crate::sources::{AssetPrices, DataSource, FiatRates};

/// Grams in a troy ounce
pub const TROY_OUNCE_GRAMS: f64 = 31.1035;

pub const BITCOIN_ID: &str = "bitcoin";
pub const GOLD_TOKEN_ID: &str = "pax-gold";
pub const SILVER_TOKEN_ID: &str = "kinesis-silver";

// Market-spot estimates shown when live prices are missing. The first pair is
// used when the price source answered without the token, the second when the
// price source failed outright.
const GOLD_FALLBACK_TOKEN_MISSING: f64 = 7600.0;
const SILVER_FALLBACK_TOKEN_MISSING: f64 = 92000.0;
const GOLD_FALLBACK_SOURCE_DOWN: f64 = 7800.0;
const SILVER_FALLBACK_SOURCE_DOWN: f64 = 93000.0;

/// How whole-unit prices are grouped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// `12,34,567`
    #[default]
    Indian,
    /// `1,234,567`
    Western,
}

impl DigitGrouping {
    /// Group the digits of a non-negative integer
    pub fn group(self, value: u64) -> String {
        let digits = value.to_string();
        if digits.len() <= 3 {
            return digits;
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let step = match self {
            DigitGrouping::Indian => 2,
            DigitGrouping::Western => 3,
        };

        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(step);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();

        format!("{},{}", groups.join(","), tail)
    }
}

/// The five cards, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FinanceItemId {
    Gold,
    Silver,
    Bitcoin,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl FinanceItemId {
    pub const ALL: [FinanceItemId; 5] = [
        FinanceItemId::Gold,
        FinanceItemId::Silver,
        FinanceItemId::Bitcoin,
        FinanceItemId::Usd,
        FinanceItemId::Eur,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FinanceItemId::Gold => "Gold",
            FinanceItemId::Silver => "Silver",
            FinanceItemId::Bitcoin => "Bitcoin",
            FinanceItemId::Usd => "USD",
            FinanceItemId::Eur => "EUR",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            FinanceItemId::Gold => "fas fa-gavel",
            FinanceItemId::Silver => "fas fa-gem",
            FinanceItemId::Bitcoin => "fab fa-bitcoin",
            FinanceItemId::Usd => "fas fa-dollar-sign",
            FinanceItemId::Eur => "fas fa-euro-sign",
        }
    }

    pub fn display_name(self, currency: &str) -> String {
        match self {
            FinanceItemId::Gold => "Gold (1gm/24k)".to_string(),
            FinanceItemId::Silver => "Silver (1kg)".to_string(),
            FinanceItemId::Bitcoin => "Bitcoin (BTC)".to_string(),
            FinanceItemId::Usd => format!("USD to {}", currency.to_uppercase()),
            FinanceItemId::Eur => format!("EUR to {}", currency.to_uppercase()),
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            FinanceItemId::Gold | FinanceItemId::Silver => "Market Spot (Est.)",
            _ => "",
        }
    }

    /// Rates are shown with paise/cents, everything else in whole units
    pub fn whole_units(self) -> bool {
        matches!(
            self,
            FinanceItemId::Gold | FinanceItemId::Silver | FinanceItemId::Bitcoin
        )
    }
}

/// Derived prices in the local currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MarketPrices {
    pub gold_per_gram: f64,
    pub silver_per_kg: f64,
    pub bitcoin: f64,
    pub usd: f64,
    pub eur: f64,
}

impl MarketPrices {
    /// Derive every card price from whatever the two sources returned.
    ///
    /// `None` means that source failed.
    pub fn derive(fiat: Option<&FiatRates>, assets: Option<&AssetPrices>, currency: &str) -> Self {
        let usd = fiat.and_then(|f| f.rate(currency)).unwrap_or(0.0);
        let eur = match fiat.and_then(|f| f.rate("EUR")) {
            Some(usd_eur) if usd_eur > 0.0 && usd > 0.0 => usd / usd_eur,
            _ => 0.0,
        };

        let (gold_per_gram, silver_per_kg, bitcoin) = match assets {
            Some(assets) => (
                assets
                    .price(GOLD_TOKEN_ID)
                    .map(|per_ounce| per_ounce / TROY_OUNCE_GRAMS)
                    .unwrap_or(GOLD_FALLBACK_TOKEN_MISSING),
                assets
                    .price(SILVER_TOKEN_ID)
                    .map(|per_ounce| per_ounce / TROY_OUNCE_GRAMS * 1000.0)
                    .unwrap_or(SILVER_FALLBACK_TOKEN_MISSING),
                assets.price(BITCOIN_ID).unwrap_or(0.0),
            ),
            None => (GOLD_FALLBACK_SOURCE_DOWN, SILVER_FALLBACK_SOURCE_DOWN, 0.0),
        };

        Self {
            gold_per_gram,
            silver_per_kg,
            bitcoin,
            usd,
            eur,
        }
    }

    pub fn get(&self, id: FinanceItemId) -> f64 {
        match id {
            FinanceItemId::Gold => self.gold_per_gram,
            FinanceItemId::Silver => self.silver_per_kg,
            FinanceItemId::Bitcoin => self.bitcoin,
            FinanceItemId::Usd => self.usd,
            FinanceItemId::Eur => self.eur,
        }
    }
}

/// Currency formatting for a card price
pub fn format_price(id: FinanceItemId, price: f64, symbol: &str, grouping: DigitGrouping) -> String {
    let price = if price.is_finite() { price } else { 0.0 };

    if id.whole_units() {
        let rounded = price.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        format!("{} {}{}", symbol, sign, grouping.group(rounded.abs() as u64))
    } else {
        format!("{} {:.2}", symbol, price)
    }
}

/// One finance card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceItem {
    pub id: FinanceItemId,
    pub name: String,
    pub icon: &'static str,
    pub unit: &'static str,
    pub price: f64,
    pub formatted_price: String,
}

/// Display settings for the finance cards
#[derive(Debug, Clone)]
pub struct FinanceOptions {
    pub currency: String,
    pub symbol: String,
    pub grouping: DigitGrouping,
}

impl From<&crate::config::FinanceConfig> for FinanceOptions {
    fn from(config: &crate::config::FinanceConfig) -> Self {
        Self {
            currency: config.currency.clone(),
            symbol: config.symbol.clone(),
            grouping: config.grouping,
        }
    }
}

/// Build the five cards from derived prices
pub fn cards(prices: &MarketPrices, options: &FinanceOptions) -> Vec<FinanceItem> {
    FinanceItemId::ALL
        .iter()
        .map(|&id| {
            let price = prices.get(id);
            FinanceItem {
                id,
                name: id.display_name(&options.currency),
                icon: id.icon(),
                unit: id.unit(),
                price,
                formatted_price: format_price(id, price, &options.symbol, options.grouping),
            }
        })
        .collect()
}

/// Fetch both sources concurrently and build the cards
pub async fn load(source: &dyn DataSource, options: &FinanceOptions) -> Vec<FinanceItem> {
    let ids = [BITCOIN_ID, GOLD_TOKEN_ID, SILVER_TOKEN_ID];
    let (fiat, assets) = tokio::join!(
        source.fiat_rates("USD"),
        source.asset_prices(&ids, &options.currency)
    );

    let fiat = fiat
        .map_err(|e| tracing::warn!(error = %e, "Fiat rate fetch error"))
        .ok();
    let assets = assets
        .map_err(|e| tracing::warn!(error = %e, "Asset price fetch error"))
        .ok();

    let prices = MarketPrices::derive(fiat.as_ref(), assets.as_ref(), &options.currency);
    tracing::debug!(?prices, "Derived market prices");

    cards(&prices, options)
}
