//! Liveness probe for osb-web

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Body of `GET /health`
///
/// `sources` is the number of configured score sources, present or not;
/// the endpoint never touches the files themselves.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub sources: usize,
    pub languages: Vec<String>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        sources: state.sources.len(),
        languages: state
            .translations
            .languages()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
