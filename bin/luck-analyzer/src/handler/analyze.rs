use super::summoner::SummonerResponse;
use super::{ApiError, AppState};
use crate::analysis::analyze_player;
use axum::extract::State;
use axum::Json;
use luck_analyzer_evaluation::{champion_stats, ChampionAggregate, PlayerAnalysis};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, alias = "gameName")]
    pub game_name: String,
    #[serde(default, alias = "tagLine")]
    pub tag_line: String,
    #[serde(default, alias = "matchCount")]
    pub match_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ChampionStatsEntry {
    #[serde(flatten)]
    pub stats: ChampionAggregate,
    pub icon_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Analyzed {
        summoner: SummonerResponse,
        analysis: PlayerAnalysis,
        champion_stats: Vec<ChampionStatsEntry>,
    },
    NoMatches {
        error: String,
        summoner: SummonerResponse,
    },
}

/// `POST /api/analyze`
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    if request.game_name.is_empty() || request.tag_line.is_empty() {
        return Err(ApiError::BadRequest(
            "game_name and tag_line are required".to_string(),
        ));
    }
    info!("Analyzing {}#{}", request.game_name, request.tag_line);

    let summoner = state
        .provider
        .fetch_summoner(&request.game_name, &request.tag_line)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Summoner {}#{} not found",
                request.game_name, request.tag_line
            ))
        })?;

    let window = state.window(request.match_count);
    let analysis =
        analyze_player(state.provider.as_ref(), &summoner, window, &state.config.scoring).await?;
    let summoner = SummonerResponse::new(summoner, &state);

    let Some(analysis) = analysis else {
        return Ok(Json(AnalyzeResponse::NoMatches {
            error: "No ranked matches found this season".to_string(),
            summoner,
        }));
    };

    let champion_stats = champion_stats(&analysis.match_history)
        .into_iter()
        .map(|stats| ChampionStatsEntry {
            icon_url: state.ddragon.champion_icon_url(&stats.champion),
            stats,
        })
        .collect();
    Ok(Json(AnalyzeResponse::Analyzed {
        summoner,
        analysis,
        champion_stats,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::tests::{app, post_json, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn analyzes_player() {
        let request = post_json("/api/analyze", json!({"game_name": "carry", "tag_line": "EUW"}));
        let (status, body) = send(app().await, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summoner"]["game_name"], "carry");
        assert_eq!(body["analysis"]["total_games"], 3);
        assert_eq!(body["analysis"]["match_history"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["champion_stats"][0]["champion"], "Ahri");
        assert_eq!(body["champion_stats"][0]["games"], 3);
        assert_eq!(
            body["champion_stats"][0]["icon_url"],
            "https://ddragon.leagueoflegends.com/cdn/15.1.1/img/champion/Ahri.png"
        );
    }

    #[tokio::test]
    async fn accepts_camel_case_fields() {
        let request = post_json(
            "/api/analyze",
            json!({"gameName": "carry", "tagLine": "EUW", "matchCount": 1}),
        );
        let (status, body) = send(app().await, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"]["total_games"], 1);
    }

    #[tokio::test]
    async fn missing_tag_is_400() {
        let request = post_json("/api/analyze", json!({"game_name": "carry"}));
        let (status, body) = send(app().await, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn no_matches_reports_summoner() {
        let request = post_json("/api/analyze", json!({"game_name": "lonely", "tag_line": "EUW"}));
        let (status, body) = send(app().await, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].is_string());
        assert_eq!(body["summoner"]["puuid"], "puuid-lonely");
        assert!(body.get("analysis").is_none());
    }
}
