use super::{ApiError, AppState};
use crate::riot_api::SummonerProfile;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct SummonerResponse {
    #[serde(flatten)]
    pub summoner: SummonerProfile,
    pub profile_icon_url: Option<String>,
}

impl SummonerResponse {
    pub fn new(summoner: SummonerProfile, state: &AppState) -> Self {
        Self {
            profile_icon_url: state.ddragon.profile_icon_url(summoner.profile_icon_id),
            summoner,
        }
    }
}

/// `GET /api/summoner/:game_name/:tag_line`
pub async fn get_summoner(
    State(state): State<AppState>,
    Path((game_name, tag_line)): Path<(String, String)>,
) -> Result<Json<SummonerResponse>, ApiError> {
    debug!("Looking up {game_name}#{tag_line}");
    let summoner = state
        .provider
        .fetch_summoner(&game_name, &tag_line)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Summoner {game_name}#{tag_line} not found")))?;
    Ok(Json(SummonerResponse::new(summoner, &state)))
}

#[derive(Debug, Deserialize)]
pub struct MatchIdsParams {
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MatchIdsResponse {
    pub match_ids: Vec<String>,
    pub count: usize,
}

/// `GET /api/matches/:puuid?count=N`
pub async fn get_match_ids(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
    Query(params): Query<MatchIdsParams>,
) -> Result<Json<MatchIdsResponse>, ApiError> {
    let window = state.window(params.count);
    let match_ids = state
        .provider
        .fetch_match_ids(&puuid, window.count, window.since)
        .await?;
    Ok(Json(MatchIdsResponse {
        count: match_ids.len(),
        match_ids,
    }))
}
