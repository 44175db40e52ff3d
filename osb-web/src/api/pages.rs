//! HTML page handlers
//!
//! Each handler resolves the request language, recomputes its view and hands
//! both to [`crate::render`].

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Html,
};
use osb_engine::views::OVERALL_CATEGORY;
use osb_engine::{build_category_view, build_home_view, build_player_view};

use super::lang::request_language;
use super::scores::SearchQuery;
use super::ApiError;
use crate::{render, AppState};

fn language(state: &AppState, headers: &HeaderMap) -> String {
    request_language(headers, state.translations.default_language())
}

/// GET /
pub async fn home_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let lang = language(&state, &headers);
    let data = state.load_data().await?;
    let view = build_home_view(&data.leaderboards);

    let t = state.translations.translator(&lang);
    Ok(Html(render::home_page(&t, &view)))
}

/// GET /leaderboard
pub async fn overall_page(
    state: State<AppState>,
    query: Query<SearchQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    leaderboard_page(state, Path(OVERALL_CATEGORY.to_string()), query, headers).await
}

/// GET /leaderboard/:mod_filter?q=
pub async fn leaderboard_page(
    State(state): State<AppState>,
    Path(mod_filter): Path<String>,
    Query(query): Query<SearchQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let lang = language(&state, &headers);
    let data = state.load_data().await?;
    let view = build_category_view(
        &data.leaderboards,
        &data.stats,
        &mod_filter,
        query.q.as_deref(),
    );

    let categories: Vec<&str> = data.leaderboards.keys().map(String::as_str).collect();
    let t = state.translations.translator(&lang);
    Ok(Html(render::category_page(&t, &view, &categories)))
}

/// GET /player/:username
pub async fn player_page(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let lang = language(&state, &headers);
    let data = state.load_data().await?;
    let view = build_player_view(&data.leaderboards, &username);

    let t = state.translations.translator(&lang);
    Ok(Html(render::player_page(&t, &view)))
}

/// GET /process
pub async fn process_page(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let lang = language(&state, &headers);
    let t = state.translations.translator(&lang);
    Html(render::process_page(&t))
}
