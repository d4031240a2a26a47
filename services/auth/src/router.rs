use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use ravon_core::health::healthz;
use ravon_core::middleware::request_id_layer;

use crate::handlers::{code::auth_telegram, health::readyz};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Telegram code login (generate + verify actions)
        .route("/auth/telegram", post(auth_telegram))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
