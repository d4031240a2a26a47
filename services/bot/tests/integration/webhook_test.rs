use axum_test::TestServer;
use serde_json::json;

use ravon_bot::infra::http::HttpCodeIssuer;
use ravon_bot::router::build_router;
use ravon_bot::state::AppState;
use ravon_telegram::client::Client;

/// State wired to ports nothing listens on, so every outbound call fails
/// fast. The webhook acknowledgment contract must hold regardless.
fn unreachable_state() -> AppState {
    AppState {
        telegram: Client::with_base_url("123:abc", "http://127.0.0.1:9").unwrap(),
        issuer: HttpCodeIssuer::new("http://127.0.0.1:9").unwrap(),
        channel_id: -1003014655042,
        channel_username: "@ravon_channel".to_owned(),
        web_app_url: "https://app.ravon.example".to_owned(),
    }
}

#[tokio::test]
async fn should_acknowledge_unhandled_updates() {
    let server = TestServer::new(build_router(unreachable_state())).unwrap();

    let response = server
        .post("/telegram/webhook")
        .json(&json!({
            "update_id": 1,
            "message": {
                "message_id": 5,
                "chat": { "id": 42 },
                "from": { "id": 42, "first_name": "Aziz" },
                "text": "hello"
            }
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "ok": true }));
}

#[tokio::test]
async fn should_acknowledge_even_when_the_flow_fails() {
    let server = TestServer::new(build_router(unreachable_state())).unwrap();

    // /start forces a membership lookup and then a reply, both of which die
    // against the dead ports.
    let response = server
        .post("/telegram/webhook")
        .json(&json!({
            "update_id": 2,
            "message": {
                "message_id": 6,
                "chat": { "id": 42 },
                "from": { "id": 42, "first_name": "Aziz" },
                "text": "/start"
            }
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "ok": true }));
}

#[tokio::test]
async fn should_acknowledge_undecodable_bodies() {
    let server = TestServer::new(build_router(unreachable_state())).unwrap();

    let response = server.post("/telegram/webhook").text("not json").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "ok": true }));
}

#[tokio::test]
async fn should_expose_health_endpoints() {
    let server = TestServer::new(build_router(unreachable_state())).unwrap();
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}
