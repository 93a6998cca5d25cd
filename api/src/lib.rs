//! HTTP API for ScoutBot.
//!
//! - `POST /ask`   : grounded answer for a question
//! - `POST /search`: raw ranked passages for a query
//!
//! Every response uses the [`core::http::response_envelope::ApiResponse`] envelope.

pub mod core;
pub mod error_handler;
mod routes;

use std::sync::Arc;

use axum::{Router, routing::post};
use scout_rag::ScoutBot;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    routes::{ask::ask_route::ask, search::search_route::search},
};

/// Builds the router with all routes and shared state.
pub fn router(bot: Arc<ScoutBot>) -> Router {
    let state = Arc::new(AppState::new(bot));
    Router::new()
        .route("/ask", post(ask))
        .route("/search", post(search))
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl+C.
///
/// # Errors
/// `AppError::Bind` if the address cannot be bound, `AppError::Server` if the
/// server loop fails.
pub async fn start(bot: Arc<ScoutBot>, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await.map_err(AppError::Bind)?;
    info!(%addr, "ScoutBot API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, router(bot))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("ScoutBot API stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
