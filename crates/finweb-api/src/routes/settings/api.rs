//! Settings API endpoints - JSON API

use axum::extract::State;
use axum::Json;
use finweb_config::Config;

use crate::AppState;

/// Effective configuration (JSON API)
pub async fn api_settings(State(state): State<AppState>) -> Json<Config> {
    Json(state.config.clone())
}
