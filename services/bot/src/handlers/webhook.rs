use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use ravon_telegram::types::Update;

use crate::domain::types::classify;
use crate::state::AppState;

/// `POST /telegram/webhook`. Always answers `200 {"ok": true}`, whatever
/// happens inside — any other status makes Telegram redeliver the update,
/// and redelivery cannot fix a failed flow. Decoding happens here rather
/// than in an extractor so even an undecodable body gets the acknowledgment.
pub async fn telegram_webhook(State(state): State<AppState>, body: String) -> Json<Value> {
    let update: Update = match serde_json::from_str(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "undecodable update");
            return acknowledged();
        }
    };

    let Some(event) = classify(update) else {
        return acknowledged();
    };

    if let Err(e) = state.handle_update().execute(event).await {
        tracing::error!(error = %e, "update handling failed");
    }
    acknowledged()
}

fn acknowledged() -> Json<Value> {
    Json(json!({ "ok": true }))
}
