use super::{ApiError, AppState};
use crate::analysis::{compare_players, Comparison, RiotId};
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub players: Vec<RiotId>,
    #[serde(default, alias = "matchCount")]
    pub match_count: Option<u32>,
}

/// `POST /api/compare`
pub async fn compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<Comparison>, ApiError> {
    if request.players.is_empty() {
        return Err(ApiError::BadRequest(
            "players must list at least one player".to_string(),
        ));
    }
    info!("Comparing {} players", request.players.len());

    let window = state.window(request.match_count);
    let comparison = compare_players(
        state.provider.as_ref(),
        &request.players,
        window,
        &state.config.scoring,
    )
    .await;
    Ok(Json(comparison))
}

#[cfg(test)]
mod tests {
    use super::super::tests::{app, post_json, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn empty_player_list_is_400() {
        let (status, _) = send(app().await, post_json("/api/compare", json!({"players": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(app().await, post_json("/api/compare", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failures_stay_off_the_leaderboard() {
        let request = post_json(
            "/api/compare",
            json!({
                "players": [
                    {"game_name": "carry", "tag_line": "EUW"},
                    {"game_name": "ghost", "tag_line": "EUW"},
                    {"game_name": "alice", "tag_line": "EUW"}
                ],
                "match_count": 3
            }),
        );
        let (status, body) = send(app().await, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["results"][1]["player"]["game_name"], "ghost");
        assert!(body["results"][1]["error"].is_string());
        assert_eq!(body["leaderboard"]["all"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["leaderboard"]["luckiest"].as_array().map(Vec::len), Some(2));
    }
}
