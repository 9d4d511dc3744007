//! # Bulletin
//!
//! A landing page service with three live widgets, each fed by public HTTP
//! APIs and rendered server-side.
//!
//! ## Features
//!
//! - **Weather & AQI**: current conditions and a colored air quality badge
//! - **News**: the top story of each configured feed, streamed card by card
//! - **Markets**: gold, silver, Bitcoin and USD/EUR rates in the local currency
//! - **Navigation**: smooth in-page scrolling between sections
//!
//! Every widget degrades to placeholders on its own; one failing upstream
//! never takes down the page.
//!
//! ## Modules
//!
//! - [`sources`]: Typed clients for the upstream APIs
//! - [`widgets`]: Mapping from upstream data to display values
//! - [`render`]: HTML templates
//! - [`api`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bulletin::config::Config;
//! use bulletin::sources::HttpSource;
//! use bulletin::widgets::{Dashboard, WidgetSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let source = HttpSource::new(config.upstream.clone())?;
//!
//!     let dashboard = Dashboard::load(&source, &WidgetSettings::from(&config)).await;
//!     println!("{}: {}", dashboard.weather.location, dashboard.weather.description);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod render;
pub mod sources;
pub mod widgets;

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoadedConfig, LoggingConfig};

pub use sources::{DataSource, HttpSource, SourceError};

pub use widgets::{
    finance::{DigitGrouping, FinanceItem, MarketPrices},
    nav::{NavLink, Navigation},
    news::{FeedDescriptor, ImageSource, NewsCard},
    weather::{AqiInfo, Coordinates, WeatherInfo, WeatherPanel},
    Dashboard, WidgetSettings,
};
