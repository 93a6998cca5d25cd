use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::debug;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::search::{
        search_request::SearchRequest,
        search_response::{SearchHit, SearchResponse},
    },
};

/// Handler: POST /search
pub async fn search(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(p) = payload?;
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    let query = p.query.trim();
    if query.is_empty() {
        return Err(AppError::bad_request("query must not be empty"));
    }

    debug!(request_id = %request_id, query = %query, "search: start");

    let hits = state.bot.similarity_search(query, p.top_k).await?;

    debug!(request_id = %request_id, hits = hits.len(), "search: success");

    let body = SearchResponse {
        query: query.to_string(),
        results: hits.into_iter().map(SearchHit::from).collect(),
    };
    Ok(ApiResponse::success(body).into_response_with_status(StatusCode::OK))
}
