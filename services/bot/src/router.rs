use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use ravon_core::health::{healthz, readyz};
use ravon_core::middleware::request_id_layer;

use crate::handlers::webhook::telegram_webhook;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Telegram webhook
        .route("/telegram/webhook", post(telegram_webhook))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
