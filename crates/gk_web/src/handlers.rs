use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use gk_core::Article;

use crate::error::ApiError;
use crate::types::{HealthResponse, SearchParams, SearchResponse};
use crate::AppState;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// `path` is absent for `/api/article` and `/api/article/`, since the
/// wildcard route never matches an empty tail.
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    path: Option<Path<String>>,
) -> Result<Json<Article>, ApiError> {
    let path = path.map(|Path(path)| path).unwrap_or_default();
    if path.trim().trim_matches('/').is_empty() {
        return Err(ApiError::bad_request("Article path is required"));
    }

    let article = state
        .scraper
        .scrape_article(&path)
        .await
        .map_err(|e| ApiError::from_error("Failed to fetch article", e))?;
    Ok(Json(article))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(ApiError::bad_request("Search query parameter 'q' is required"));
    }

    let results = state
        .search
        .search(&query)
        .await
        .map_err(|e| ApiError::from_error("Search failed", e))?;
    Ok(Json(SearchResponse {
        query,
        count: results.len(),
        results,
    }))
}
