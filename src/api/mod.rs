//! Bulletin HTTP Server
//!
//! HTTP layer for Bulletin, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Landing page with every widget filled in
//!
//! ## Widget fragments
//! - `GET /widgets/weather` - Weather container HTML
//! - `GET /widgets/news` - News container HTML, streamed card by card
//! - `GET /widgets/finance` - Finance container HTML
//!
//! ## Widget data
//! - `GET /api/v1/dashboard` - All widgets as JSON
//! - `GET /api/v1/weather` - Weather panel as JSON
//! - `GET /api/v1/news` - News cards as JSON
//! - `GET /api/v1/finance` - Finance cards as JSON
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use bulletin::api::{serve, AppState};
//! use bulletin::config::Config;
//! use bulletin::sources::HttpSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let source = Arc::new(HttpSource::new(config.upstream.clone())?);
//!
//!     let state = AppState::new(source, &config);
//!     serve(state, &config.server.addr()).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let widget_routes = Router::new()
        .route("/weather", get(routes::widgets::weather_fragment))
        .route("/news", get(routes::widgets::news_fragment))
        .route("/finance", get(routes::widgets::finance_fragment));

    let api_routes = Router::new()
        .route("/dashboard", get(routes::widgets::dashboard_json))
        .route("/weather", get(routes::widgets::weather_json))
        .route("/news", get(routes::widgets::news_json))
        .route("/finance", get(routes::widgets::finance_json));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/widgets", widget_routes)
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the HTTP server
pub async fn serve(state: AppState, addr: &str) -> Result<(), ApiError> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Bulletin listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Bulletin shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sources::FeedResponse;
    use crate::widgets::testing::{story_item, FakeSource};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app(source: FakeSource) -> Router {
        let config = Config::default();
        let state = AppState::new(Arc::new(source), &config);
        build_router(state)
    }

    fn source_with_feeds() -> FakeSource {
        let mut source = FakeSource::default();
        for feed in Config::default().news.feeds {
            source
                .feeds
                .insert(feed.url, FeedResponse::with_items(vec![story_item("Top story")]));
        }
        source
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = get(create_test_app(FakeSource::default()), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = get(create_test_app(FakeSource::default()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["feeds"], 3);
    }

    #[tokio::test]
    async fn test_index_page() {
        let (status, body) = get(create_test_app(source_with_feeds()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("id=\"weather-container\""));
        assert!(body.contains("Partly Cloudy"));
        assert!(body.contains("Moderate (87)"));
        assert_eq!(body.matches("class=\"news-card\"").count(), 3);
        assert_eq!(body.matches("class=\"finance-card\"").count(), 5);
    }

    #[tokio::test]
    async fn test_weather_fragment_without_air_quality() {
        let source = FakeSource {
            fail_air_quality: true,
            ..Default::default()
        };
        let (status, body) = get(create_test_app(source), "/widgets/weather").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("27.4"));
        assert!(body.contains("Partly Cloudy"));
        assert!(body.contains("<span id=\"aqi-val\">N/A</span>"));
    }

    #[tokio::test]
    async fn test_news_fragment_streams_every_card() {
        let mut source = source_with_feeds();
        source
            .feeds
            .insert(
                "https://www.news18.com/rss/india.xml".to_string(),
                FeedResponse::with_items(vec![]),
            );

        let (status, body) = get(create_test_app(source), "/widgets/news").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("class=\"news-card\"").count(), 3);
        assert_eq!(body.matches("News failed to load.").count(), 1);
    }

    #[tokio::test]
    async fn test_finance_json() {
        let (status, body) = get(create_test_app(FakeSource::default()), "/api/v1/finance").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[3]["id"], "USD");
        assert_eq!(items[3]["price"], 83.0);
    }

    #[tokio::test]
    async fn test_dashboard_json_with_failed_sources() {
        let source = FakeSource {
            fail_weather: true,
            fail_air_quality: true,
            fail_fiat: true,
            fail_assets: true,
            ..Default::default()
        };
        let (status, body) = get(create_test_app(source), "/api/v1/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["weather"]["description"], "Unavailable");
        assert_eq!(json["weather"]["aqi"]["status"], "unavailable");
        assert_eq!(json["news"][0]["status"], "failed");
        assert_eq!(json["finance"][0]["price"], 7800.0);
    }
}
