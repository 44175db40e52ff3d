//! osb-web library - leaderboard web service
//!
//! Serves the home, category and player pages plus a JSON API. Every request
//! reloads the score sources and recomputes its view.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use osb_common::Translations;
use osb_engine::{load_combined_data, CombinedData};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod render;

use api::ApiError;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Score sources in precedence order
    pub sources: Arc<Vec<PathBuf>>,
    /// Translation catalog, read-only after startup
    pub translations: Arc<Translations>,
}

impl AppState {
    /// Create new application state
    pub fn new(sources: Vec<PathBuf>, translations: Translations) -> Self {
        Self {
            sources: Arc::new(sources),
            translations: Arc::new(translations),
        }
    }

    /// Reload and rank all sources off the async runtime
    pub async fn load_data(&self) -> Result<CombinedData, ApiError> {
        let sources = Arc::clone(&self.sources);
        tokio::task::spawn_blocking(move || load_combined_data(sources.as_slice()))
            .await
            .map_err(|e| ApiError::Internal(format!("score loading task failed: {}", e)))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let pages = Router::new()
        .route("/", get(api::home_page))
        .route("/leaderboard", get(api::overall_page))
        .route("/leaderboard/:mod_filter", get(api::leaderboard_page))
        .route("/player/:username", get(api::player_page))
        .route("/process", get(api::process_page))
        .route("/set_lang/:lang", get(api::set_lang));

    let json_api = Router::new()
        .route("/api/home", get(api::home_json))
        .route("/api/leaderboard/:mod_filter", get(api::leaderboard_json))
        .route("/api/player/:username", get(api::player_json))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    Router::new()
        .merge(pages)
        .merge(json_api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
