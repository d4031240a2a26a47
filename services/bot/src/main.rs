use tracing::info;

use ravon_bot::config::BotConfig;
use ravon_bot::infra::http::HttpCodeIssuer;
use ravon_bot::router::build_router;
use ravon_bot::state::AppState;
use ravon_telegram::client::Client;

#[tokio::main]
async fn main() {
    ravon_core::tracing::init_tracing();

    let config = BotConfig::from_env();

    let telegram =
        Client::new(&config.telegram_bot_token).expect("failed to build telegram client");
    let issuer = HttpCodeIssuer::new(&config.auth_url).expect("failed to build auth client");

    let state = AppState {
        telegram,
        issuer,
        channel_id: config.channel_id,
        channel_username: config.channel_username,
        web_app_url: config.web_app_url,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.bot_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("bot service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
