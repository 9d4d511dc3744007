//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::sources::DataSource;
use crate::widgets::nav::Navigation;
use crate::widgets::{WidgetSettings, SECTION_IDS};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream APIs the widgets read from
    pub source: Arc<dyn DataSource>,
    /// Location, feeds and currency settings
    pub settings: Arc<WidgetSettings>,
    /// Header links resolved against the page sections
    pub navigation: Arc<Navigation>,
    /// Page title
    pub site_title: Arc<str>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn DataSource>, config: &Config) -> Self {
        Self {
            source,
            settings: Arc::new(WidgetSettings::from(config)),
            navigation: Arc::new(Navigation::new(
                config.navigation.links.clone(),
                SECTION_IDS,
            )),
            site_title: Arc::from(config.server.site_title.as_str()),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
