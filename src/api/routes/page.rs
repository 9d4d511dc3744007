//! Page Route
//!
//! - GET / - Landing page, rendered after all widgets have loaded

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::render;
use crate::widgets::Dashboard;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let dashboard = Dashboard::load(state.source.as_ref(), &state.settings).await;
    let html = render::page(&state.site_title, &state.navigation, &dashboard)?;
    Ok(Html(html))
}
