use crate::analysis::MatchWindow;
use crate::config::Config;
use crate::ddragon::DataDragon;
use crate::riot_api::MatchProvider;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use luck_analyzer_cache::CacheHandler;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

pub mod analyze;
pub mod cache;
pub mod compare;
pub mod summoner;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MatchProvider>,
    pub cache: Arc<CacheHandler>,
    pub config: Arc<Config>,
    pub ddragon: Arc<DataDragon>,
}

impl AppState {
    /// Match window for a request, limited to the current season.
    pub fn window(&self, match_count: Option<u32>) -> MatchWindow {
        MatchWindow {
            count: match_count.unwrap_or(self.config.default_match_count),
            since: Some(self.config.season_start_timestamp()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/summoner/:game_name/:tag_line", get(summoner::get_summoner))
        .route("/api/matches/:puuid", get(summoner::get_match_ids))
        .route("/api/analyze", post(analyze::analyze))
        .route("/api/compare", post(compare::compare))
        .route("/api/cache/stats", get(cache::stats))
        .route("/api/cache/cleanup", post(cache::cleanup))
        .with_state(state)
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Internal(e) => {
                error!("Request failed: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(e: E) -> Self {
        Self::Internal(e.into())
    }
}
