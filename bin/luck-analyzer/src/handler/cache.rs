use super::{ApiError, AppState};
use axum::extract::State;
use axum::Json;
use luck_analyzer_cache::CacheStats;
use serde::Serialize;

/// `GET /api/cache/stats`
pub async fn stats(State(state): State<AppState>) -> Result<Json<CacheStats>, ApiError> {
    Ok(Json(state.cache.stats().await?))
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub removed: u64,
    pub stats: CacheStats,
}

/// `POST /api/cache/cleanup`
pub async fn cleanup(State(state): State<AppState>) -> Result<Json<CleanupResponse>, ApiError> {
    let removed = state.cache.invalidate_expired().await?;
    let stats = state.cache.stats().await?;
    Ok(Json(CleanupResponse { removed, stats }))
}

#[cfg(test)]
mod tests {
    use super::super::tests::{app, get_request, send};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    #[tokio::test]
    async fn stats_of_empty_cache() {
        let (status, body) = send(app().await, get_request("/api/cache/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_entries"], 0);
        assert_eq!(body["expired_entries"], 0);
    }

    #[tokio::test]
    async fn cleanup_reports_removed() {
        let request = Request::post("/api/cache/cleanup").body(Body::empty()).unwrap();
        let (status, body) = send(app().await, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"], 0);
        assert_eq!(body["stats"]["valid_entries"], 0);
    }
}
