//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::widgets::finance::DigitGrouping;
use crate::widgets::nav::NavLink;
use crate::widgets::news::FeedDescriptor;
use crate::widgets::weather::Coordinates;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub news: NewsConfig,

    #[serde(default)]
    pub finance: FinanceConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Page title shown in the browser tab and header
    #[serde(default = "default_site_title")]
    pub site_title: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_site_title() -> String {
    "Bulletin".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            site_title: default_site_title(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Coordinate used for the weather and air quality widget
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_name")]
    pub name: String,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

fn default_location_name() -> String {
    "Pune".to_string()
}

fn default_latitude() -> f64 {
    18.5204
}

fn default_longitude() -> f64 {
    73.8567
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl LocationConfig {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// News feeds, rendered in declaration order
#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedDescriptor>,
}

fn default_feeds() -> Vec<FeedDescriptor> {
    vec![
        FeedDescriptor::new(
            "International News",
            "BBC World",
            "https://feeds.bbci.co.uk/news/world/rss.xml",
        ),
        FeedDescriptor::new(
            "National News (India)",
            "News18 India",
            "https://www.news18.com/rss/india.xml",
        ),
        FeedDescriptor::new(
            "Political News (India)",
            "News18 Politics",
            "https://www.news18.com/rss/politics.xml",
        ),
    ]
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
        }
    }
}

/// Finance panel configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FinanceConfig {
    /// Local currency code, lowercase as the price API expects it
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    #[serde(default)]
    pub grouping: DigitGrouping,
}

fn default_currency() -> String {
    "inr".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            symbol: default_currency_symbol(),
            grouping: DigitGrouping::default(),
        }
    }
}

/// Base URLs of the third-party APIs
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,

    #[serde(default = "default_feed_proxy_url")]
    pub feed_proxy_url: String,

    #[serde(default = "default_fiat_rates_url")]
    pub fiat_rates_url: String,

    #[serde(default = "default_asset_prices_url")]
    pub asset_prices_url: String,

    /// Per-request timeout; unset means requests only fail on transport errors
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_air_quality_url() -> String {
    "https://air-quality-api.open-meteo.com/v1/air-quality".to_string()
}

fn default_feed_proxy_url() -> String {
    "https://api.rss2json.com/v1/api.json".to_string()
}

fn default_fiat_rates_url() -> String {
    "https://open.er-api.com/v6/latest".to_string()
}

fn default_asset_prices_url() -> String {
    "https://api.coingecko.com/api/v3/simple/price".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            air_quality_url: default_air_quality_url(),
            feed_proxy_url: default_feed_proxy_url(),
            fiat_rates_url: default_fiat_rates_url(),
            asset_prices_url: default_asset_prices_url(),
            request_timeout_secs: None,
        }
    }
}

/// Navigation bar links
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_nav_links")]
    pub links: Vec<NavLink>,
}

fn default_nav_links() -> Vec<NavLink> {
    vec![
        NavLink::new("Home", "#home"),
        NavLink::new("Weather", "#weather"),
        NavLink::new("News", "#news"),
        NavLink::new("Finance", "#finance"),
    ]
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            links: default_nav_links(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Standard config file locations, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("bulletin").join("config.toml")),
            Some(PathBuf::from("/etc/bulletin/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first usable file among `paths`, with environment overrides.
    ///
    /// Files that exist but fail to load are skipped and reported in
    /// [`LoadedConfig::skipped`]; with no usable file the result is
    /// [`Config::from_env`]. Nothing is logged, so callers can report the
    /// outcome once their subscriber is installed.
    pub fn load_first(paths: &[PathBuf]) -> LoadedConfig {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        path: Some(path.clone()),
                        skipped,
                    }
                }
                Err(e) => skipped.push(e),
            }
        }

        LoadedConfig {
            config: Self::from_env(),
            path: None,
            skipped,
        }
    }

    /// Load from default locations or environment, logging what happened
    pub fn load_default() -> Self {
        let loaded = Self::load_first(&Self::default_paths());
        loaded.log();
        loaded.config
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("BULLETIN_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("BULLETIN_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Location overrides
        if let Ok(lat) = std::env::var("BULLETIN_LATITUDE") {
            if let Ok(v) = lat.parse() {
                self.location.latitude = v;
            }
        }
        if let Ok(lon) = std::env::var("BULLETIN_LONGITUDE") {
            if let Ok(v) = lon.parse() {
                self.location.longitude = v;
            }
        }

        // Finance overrides
        if let Ok(currency) = std::env::var("BULLETIN_CURRENCY") {
            self.finance.currency = currency.to_lowercase();
        }

        // Logging overrides
        if let Ok(level) = std::env::var("BULLETIN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("BULLETIN_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            location: LocationConfig::default(),
            news: NewsConfig::default(),
            finance: FinanceConfig::default(),
            upstream: UpstreamConfig::default(),
            navigation: NavigationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Outcome of searching for a config file
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from, `None` for environment-only defaults
    pub path: Option<PathBuf>,
    /// Files that were found but could not be loaded
    pub skipped: Vec<ConfigError>,
}

impl LoadedConfig {
    /// Report skipped files and the chosen source
    pub fn log(&self) {
        for error in &self.skipped {
            tracing::warn!("Skipping config file: {}", error);
        }
        match &self.path {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Bulletin Configuration
#
# Environment variables override these settings:
# - BULLETIN_HOST
# - BULLETIN_PORT
# - BULLETIN_LATITUDE
# - BULLETIN_LONGITUDE
# - BULLETIN_CURRENCY
# - BULLETIN_LOG_LEVEL
# - BULLETIN_LOG_FORMAT

[server]
host = "0.0.0.0"
port = 8090
site_title = "Bulletin"

[location]
# Coordinate for the weather and AQI widget
name = "Pune"
latitude = 18.5204
longitude = 73.8567

[[news.feeds]]
title = "International News"
source = "BBC World"
url = "https://feeds.bbci.co.uk/news/world/rss.xml"

[[news.feeds]]
title = "National News (India)"
source = "News18 India"
url = "https://www.news18.com/rss/india.xml"

[[news.feeds]]
title = "Political News (India)"
source = "News18 Politics"
url = "https://www.news18.com/rss/politics.xml"

[finance]
# Local currency, as understood by the price API
currency = "inr"
symbol = "₹"
# Digit grouping: indian (12,34,567) or western (1,234,567)
grouping = "indian"

[upstream]
forecast_url = "https://api.open-meteo.com/v1/forecast"
air_quality_url = "https://air-quality-api.open-meteo.com/v1/air-quality"
feed_proxy_url = "https://api.rss2json.com/v1/api.json"
fiat_rates_url = "https://open.er-api.com/v6/latest"
asset_prices_url = "https://api.coingecko.com/api/v3/simple/price"
# request_timeout_secs = 10

[[navigation.links]]
label = "Home"
href = "#home"

[[navigation.links]]
label = "Weather"
href = "#weather"

[[navigation.links]]
label = "News"
href = "#news"

[[navigation.links]]
label = "Finance"
href = "#finance"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}
