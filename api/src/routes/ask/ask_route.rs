//! POST /ask: grounded answer over the scouting-report index.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use scout_rag::AskOptions;
use tracing::{debug, info};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"Which lefties have a changeup of 55 or better?","show_sources":true}'
/// ```
pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(body) = payload?;
    let question = body.question.trim();
    if question.is_empty() {
        return Err(AppError::bad_request("question must not be empty"));
    }

    let mut opts = AskOptions::default();
    if let Some(k) = body.top_k {
        opts.top_k = k;
    }
    opts.show_sources = body.show_sources.unwrap_or(false);
    debug!(top_k = opts.top_k, show_sources = opts.show_sources, "ask: start");

    let qa = state.bot.ask_with_opts(question, opts).await?;
    info!(kind = ?qa.kind, sources = qa.sources.len(), "ask: done");

    Ok(ApiResponse::success(AskResponse::from_answer(qa, opts.show_sources))
        .into_response_with_status(StatusCode::OK))
}
