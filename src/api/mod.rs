// HTTP API routes for the leaderboard service.

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::store::{ScoreEntry, ScoreStore, StoreError};
use crate::ui::UI_HTML;

// ── Request types ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LeaderboardParams {
    /// Case-insensitive substring match on the player name.
    pub q: Option<String>,
}

// ── Shared application state ─────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ScoreStore>,
    /// Maximum number of entries returned by the leaderboard endpoint.
    pub limit: usize,
}

// ── Error helpers ─────────────────────────────────────────────────────

fn json_error(status: StatusCode, msg: &str) -> impl IntoResponse {
    (status, Json(json!({ "error": msg })))
}

fn internal_error(e: StoreError) -> impl IntoResponse {
    tracing::error!("Store error: {e}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

// ── Router ────────────────────────────────────────────────────────────

pub fn router(store: Arc<ScoreStore>, limit: usize) -> Router {
    let state = AppState { store, limit };

    Router::new()
        .route("/scores/", post(add_score))
        .route("/leaderboard/", get(get_leaderboard).delete(clear_leaderboard))
        .route("/health", get(health_check))
        .route("/ui", get(leaderboard_ui))
        .with_state(state)
}

// ── Handlers ──────────────────────────────────────────────────────────

/// Append a score and persist the re-sorted snapshot. Malformed bodies are
/// rejected by the `Json` extractor before this handler runs.
async fn add_score(
    State(state): State<AppState>,
    Json(entry): Json<ScoreEntry>,
) -> impl IntoResponse {
    if entry.player.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "player is required").into_response();
    }
    match state.store.add(entry) {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Score added" }))).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

/// List the leaderboard in persisted order (descending score), reloading
/// the snapshot from disk so external writes are picked up.
async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Json<Vec<ScoreEntry>> {
    Json(state.store.list(params.q.as_deref(), state.limit))
}

async fn clear_leaderboard(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.clear() {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Leaderboard cleared" })),
        )
            .into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

/// Static leaderboard viewer: polls `/leaderboard/` and renders cards
/// client-side.
async fn leaderboard_ui() -> Html<&'static str> {
    Html(UI_HTML)
}
