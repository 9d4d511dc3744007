//! Widget Routes
//!
//! HTML fragments for each widget container, and the same widget models as
//! JSON.
//!
//! - GET /widgets/weather, /widgets/news, /widgets/finance
//! - GET /api/v1/dashboard, /api/v1/weather, /api/v1/news, /api/v1/finance

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::render;
use crate::widgets::finance::{self, FinanceItem};
use crate::widgets::news::{self, NewsCard};
use crate::widgets::weather::{self, WeatherPanel};
use crate::widgets::Dashboard;

async fn load_weather(state: &AppState) -> WeatherPanel {
    weather::load(
        state.source.as_ref(),
        &state.settings.location_name,
        state.settings.coordinates,
    )
    .await
}

/// GET /widgets/weather
pub async fn weather_fragment(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let panel = load_weather(&state).await;
    Ok(Html(render::weather(&panel)?))
}

/// GET /widgets/news
///
/// Feeds are fetched in order in a background task; each card is written to
/// the response body as soon as its feed resolves.
pub async fn news_fragment(State(state): State<Arc<AppState>>) -> Response {
    let (tx, rx) = mpsc::channel::<NewsCard>(state.settings.feeds.len().max(1));

    let source = Arc::clone(&state.source);
    let feeds = state.settings.feeds.clone();
    tokio::spawn(async move {
        news::stream(source.as_ref(), &feeds, tx).await;
    });

    let body = futures_util::stream::unfold(rx, |mut rx| async move {
        let card = rx.recv().await?;
        let html = match render::news_card(&card) {
            Ok(html) => html + "\n",
            Err(e) => {
                tracing::error!(feed = %card.header(), error = %e, "Failed to render news card");
                String::new()
            }
        };
        Some((Ok::<_, Infallible>(html), rx))
    });

    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        Body::from_stream(body),
    )
        .into_response()
}

/// GET /widgets/finance
pub async fn finance_fragment(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let items = finance::load(state.source.as_ref(), &state.settings.finance).await;
    Ok(Html(render::finance(&items)?))
}

/// GET /api/v1/dashboard
pub async fn dashboard_json(State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    Json(Dashboard::load(state.source.as_ref(), &state.settings).await)
}

/// GET /api/v1/weather
pub async fn weather_json(State(state): State<Arc<AppState>>) -> Json<WeatherPanel> {
    Json(load_weather(&state).await)
}

/// GET /api/v1/news
pub async fn news_json(State(state): State<Arc<AppState>>) -> Json<Vec<NewsCard>> {
    Json(news::load(state.source.as_ref(), &state.settings.feeds).await)
}

/// GET /api/v1/finance
pub async fn finance_json(State(state): State<Arc<AppState>>) -> Json<Vec<FinanceItem>> {
    Json(finance::load(state.source.as_ref(), &state.settings.finance).await)
}
