//! JSON views of the leaderboards
//!
//! Same data as the HTML pages, serialized as-is for scripts and tests.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use osb_engine::{
    build_category_view, build_home_view, build_player_view, CategoryView, HomeView, PlayerView,
};
use serde::Deserialize;

use super::ApiError;
use crate::AppState;

/// Query parameters for category views
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Player name substring, matched ignoring case
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/home
pub async fn home_json(State(state): State<AppState>) -> Result<Json<HomeView>, ApiError> {
    let data = state.load_data().await?;
    Ok(Json(build_home_view(&data.leaderboards)))
}

/// GET /api/leaderboard/:mod_filter?q=
pub async fn leaderboard_json(
    State(state): State<AppState>,
    Path(mod_filter): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<CategoryView>, ApiError> {
    let data = state.load_data().await?;
    Ok(Json(build_category_view(
        &data.leaderboards,
        &data.stats,
        &mod_filter,
        query.q.as_deref(),
    )))
}

/// GET /api/player/:username
pub async fn player_json(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PlayerView>, ApiError> {
    let data = state.load_data().await?;
    Ok(Json(build_player_view(&data.leaderboards, &username)))
}
