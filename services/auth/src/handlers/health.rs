use anyhow::Context as _;
use axum::{extract::State, http::StatusCode};

use crate::error::AuthServiceError;
use crate::state::AppState;

/// `GET /readyz` — the service is ready only when the database answers.
/// Liveness stays on the shared `ravon_core::health::healthz`.
pub async fn readyz(State(state): State<AppState>) -> Result<StatusCode, AuthServiceError> {
    state.db.ping().await.context("database ping")?;
    Ok(StatusCode::OK)
}
