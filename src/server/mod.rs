//! # Feature: Web Boundary
//!
//! JSON over HTTP in front of an [`Agent`]: `POST /command` takes
//! `{"command": "..."}` and answers `{"response": "..."}`. `GET /` serves a
//! one-page chat form that posts to it.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: true (separate `concierge-web` binary)
//!
//! ## Changelog
//! - 1.1.0: Browser chat page at `/`

mod shutdown;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::agent::Agent;

pub use shutdown::shutdown_signal;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// A missing field is treated as an empty utterance
    #[serde(default)]
    pub command: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub running: bool,
}

async fn handle_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Json<CommandResponse> {
    let response = state.agent.handle(&request.command).await;
    Json(CommandResponse { response })
}

async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        running: state.agent.is_running(),
    })
}

pub fn app(agent: Arc<Agent>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/command", post(handle_command))
        .route("/health", get(health))
        .with_state(AppState { agent })
}

/// Bind `addr` and serve until Ctrl+C / SIGTERM
pub async fn serve(agent: Arc<Agent>, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web boundary listening on http://{addr}");

    axum::serve(listener, app(agent))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;

    info!("🌐 Web boundary stopped");
    Ok(())
}
