use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{Category, Video},
    services::{playback::EpisodeSlot, search::search_category},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub movies: Vec<Video>,
    pub series: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub external_id: String,
    pub category: Category,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub url: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Searches both content categories for a query
///
/// The categories are looked up in parallel and degrade independently: a
/// provider failure in one returns that category as an empty list while the
/// other still carries its results.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "query parameter 'q' must not be empty".to_string(),
        ));
    }

    let (movies, series) = tokio::join!(
        search_category(state.provider.as_ref(), &params.q, Category::Movie),
        search_category(state.provider.as_ref(), &params.q, Category::Series),
    );

    Ok(Json(SearchResponse { movies, series }))
}

/// Resolves a playback URL for a title
///
/// A title no strategy can serve resolves to a null URL rather than an
/// error; in particular an empty external id always misses.
pub async fn resolve(
    State(state): State<AppState>,
    Query(params): Query<ResolveQuery>,
) -> Json<ResolveResponse> {
    let video = Video {
        provider_id: String::new(),
        external_id: params.external_id,
        title: String::new(),
        poster_path: String::new(),
        backdrop_path: String::new(),
        category: params.category,
    };
    let slot = EpisodeSlot {
        season: params.season,
        episode: params.episode,
    };

    let url = state.sources.resolve(&video, &slot).await;

    Json(ResolveResponse { url })
}
