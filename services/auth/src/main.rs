use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use ravon_auth::config::AuthConfig;
use ravon_auth::domain::repository::AuthCodeRepository;
use ravon_auth::domain::types::SWEEP_INTERVAL_SECS;
use ravon_auth::infra::db::DbAuthCodeRepository;
use ravon_auth::router::build_router;
use ravon_auth::state::AppState;

#[tokio::main]
async fn main() {
    ravon_core::tracing::init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    // Background sweep of expired rows. Housekeeping only — the claim
    // predicate already refuses expired codes, swept or not.
    let sweeper = DbAuthCodeRepository {
        db: state.db.clone(),
    };
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
        loop {
            tick.tick().await;
            match sweeper.purge_expired().await {
                Ok(0) => {}
                Ok(rows) => tracing::debug!(rows, "purged expired login codes"),
                Err(e) => tracing::warn!(error = %e, "expired-code purge failed"),
            }
        }
    });

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
