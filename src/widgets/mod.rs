//! Page Widgets
//!
//! - [`weather`]: current weather and AQI badge
//! - [`news`]: top story per feed
//! - [`finance`]: metal, crypto and exchange-rate cards
//! - [`nav`]: in-page navigation
//!
//! Widgets share nothing and write to disjoint containers, so a page load
//! drives all three at once.

pub mod finance;
pub mod nav;
pub mod news;
pub mod weather;

#[cfg(test)]
pub(crate) mod testing;

use serde::Serialize;

use crate::config::Config;
use crate::sources::DataSource;
use finance::{FinanceItem, FinanceOptions};
use news::{FeedDescriptor, NewsCard};
use weather::{Coordinates, WeatherPanel};

/// Ids of the page sections, in page order
pub const SECTION_IDS: [&str; 4] = ["home", "weather", "news", "finance"];

/// Everything the widgets need from the configuration
#[derive(Debug, Clone)]
pub struct WidgetSettings {
    pub location_name: String,
    pub coordinates: Coordinates,
    pub feeds: Vec<FeedDescriptor>,
    pub finance: FinanceOptions,
}

impl From<&Config> for WidgetSettings {
    fn from(config: &Config) -> Self {
        Self {
            location_name: config.location.name.clone(),
            coordinates: config.location.coordinates(),
            feeds: config.news.feeds.clone(),
            finance: FinanceOptions::from(&config.finance),
        }
    }
}

/// All widget contents for one page render
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub weather: WeatherPanel,
    pub news: Vec<NewsCard>,
    pub finance: Vec<FinanceItem>,
}

impl Dashboard {
    /// Load every widget concurrently. Widget failures become placeholders,
    /// so this never fails.
    pub async fn load(source: &dyn DataSource, settings: &WidgetSettings) -> Self {
        let (weather, news, finance) = tokio::join!(
            weather::load(source, &settings.location_name, settings.coordinates),
            news::load(source, &settings.feeds),
            finance::load(source, &settings.finance),
        );

        Self {
            weather,
            news,
            finance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::FeedResponse;
    use super::testing::{story_item, FakeSource};

    #[tokio::test]
    async fn test_dashboard_isolates_widget_failures() {
        let config = Config::default();
        let settings = WidgetSettings::from(&config);

        let mut source = FakeSource {
            fail_air_quality: true,
            fail_assets: true,
            ..Default::default()
        };
        for feed in &settings.feeds {
            source
                .feeds
                .insert(feed.url.clone(), FeedResponse::with_items(vec![story_item("Story")]));
        }

        let dashboard = Dashboard::load(&source, &settings).await;

        assert_eq!(dashboard.weather.temperature, "27.4");
        assert_eq!(dashboard.weather.aqi, weather::AqiDisplay::Unavailable);
        assert_eq!(dashboard.news.len(), 3);
        assert!(dashboard
            .news
            .iter()
            .all(|card| matches!(card, NewsCard::Story(_))));
        assert_eq!(dashboard.finance.len(), 5);
        assert_eq!(dashboard.finance[0].price, 7800.0);
    }
}
