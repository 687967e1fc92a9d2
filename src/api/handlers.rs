use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ScrapeError;
use crate::extractor::{SearchResult, TranslationDetail};

use super::error::ApiError;
use super::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

pub async fn api_root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "name": "Game Translations API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Search game translations and read their details",
        "source": state.client.base_url().as_str(),
        "endpoints": {
            "search": "/api/search?q=game_name",
            "translation": "/api/translation/translation_path",
        }
    }))
}

pub async fn api_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let q = params.q.unwrap_or_default();
    let results = state.client.search(&q).await.map_err(ApiError::new("Failed to search translations"))?;
    Ok(Json(results))
}

pub async fn api_translation(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Json<TranslationDetail>, ApiError> {
    let on_err = "Failed to load translation details";
    let url = state.client.resolve_path(&path).map_err(ApiError::new(on_err))?;
    let detail = state.client.get_details(url.as_str()).await.map_err(ApiError::new(on_err))?;
    Ok(Json(detail))
}

pub async fn api_translation_missing() -> ApiError {
    ApiError::new("")(ScrapeError::InvalidPath(String::new()))
}
