//! Auth service contract runner.
//!
//! Two layers: stateless fixture assertions (safe to point at any instance)
//! and stateful flows that mint and claim real codes. The flows only run in
//! docker mode, against the instance the harness itself started.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use ravon_auth::{router::build_router, state::AppState};
use ravon_auth_migration::Migrator;
use ravon_auth_types::api::{AuthRequest, GenerateResponse, VerifyResponse};
use ravon_client::manager::{SessionManager, SessionState};
use ravon_client::session::FileSessionStore;
use ravon_client::verify::HttpVerifier;
use reqwest::Client;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use uuid::Uuid;

use crate::{fixture, reporter::Reporter, runner::Runner, services::InfraUrls};

/// Run auth migrations, start the auth service in-process, then run every
/// auth fixture plus the stateful code-login flows.
///
/// Returns `true` if everything passed.
pub async fn run(infra: &InfraUrls, workspace_root: &Path) -> Result<bool> {
    // ── DB + migrations ────────────────────────────────────────────────────
    let db = Database::connect(&infra.database_url).await?;
    Migrator::up(&db, None).await?;

    // ── Start the auth service on a random OS-assigned port ────────────────
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let base_url = format!("http://127.0.0.1:{port}");

    let state = AppState { db };
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    // ── Fixtures, then stateful flows against the same instance ────────────
    let mut rep = Reporter::new();
    run_fixtures_into(&mut rep, &base_url, workspace_root).await?;

    let http = Client::new();
    rep.record_flow(
        "issue, verify, then replay is refused",
        issue_verify_replay(&http, &base_url).await,
    );
    rep.record_flow(
        "re-issue retires the previous code",
        reissue_retires_previous(&http, &base_url).await,
    );
    rep.record_flow(
        "client sdk login end to end",
        client_sdk_login(&http, &base_url).await,
    );

    rep.print_summary();
    Ok(rep.all_passed())
}

/// Run only the fixture assertions against an already-running service.
pub async fn run_fixtures(base_url: &str, workspace_root: &Path) -> Result<bool> {
    let mut rep = Reporter::new();
    run_fixtures_into(&mut rep, base_url, workspace_root).await?;
    rep.print_summary();
    Ok(rep.all_passed())
}

async fn run_fixtures_into(
    rep: &mut Reporter,
    base_url: &str,
    workspace_root: &Path,
) -> Result<()> {
    let fixtures = fixture::load_service(workspace_root, "auth")?;
    let runner = Runner::new(base_url);
    for f in &fixtures {
        let result = runner.run(f).await;
        rep.record(f, result);
    }
    Ok(())
}

// ── Stateful flows ─────────────────────────────────────────────────────────

async fn issue_verify_replay(http: &Client, base_url: &str) -> Result<()> {
    let issued = generate(http, base_url, 9_042, "Aziz").await?;
    if !issued.success {
        bail!("generate reported success=false");
    }
    if issued.code.len() != 6 || !issued.code.chars().all(|c| c.is_ascii_digit()) {
        bail!("expected a six digit code, got {:?}", issued.code);
    }

    let (status, verdict) = verify(http, base_url, &issued.code).await?;
    if status != 200 || !verdict.valid {
        bail!("first claim refused: status {status}");
    }
    let user = verdict
        .user
        .ok_or_else(|| anyhow!("valid verdict without a user"))?;
    if user.telegram_user_id != "9042" {
        bail!("claim returned the wrong owner: {}", user.telegram_user_id);
    }

    let (status, verdict) = verify(http, base_url, &issued.code).await?;
    if status != 400 || verdict.valid {
        bail!("replay was accepted: status {status}");
    }
    Ok(())
}

async fn reissue_retires_previous(http: &Client, base_url: &str) -> Result<()> {
    let first = generate(http, base_url, 9_043, "Bek").await?;
    let second = generate(http, base_url, 9_043, "Bek").await?;

    // Codes are random; the old one is only distinguishable when they differ.
    if first.code != second.code {
        let (status, verdict) = verify(http, base_url, &first.code).await?;
        if status != 400 || verdict.valid {
            bail!("retired code still claims: status {status}");
        }
    }

    let (status, verdict) = verify(http, base_url, &second.code).await?;
    if status != 200 || !verdict.valid {
        bail!("fresh code refused after re-issue: status {status}");
    }
    Ok(())
}

async fn client_sdk_login(http: &Client, base_url: &str) -> Result<()> {
    let slot = std::env::temp_dir().join(format!("ravon-harness-session-{}.json", Uuid::new_v4()));
    let manager = SessionManager::new(
        FileSessionStore::new(&slot),
        HttpVerifier::new(base_url).context("build verifier")?,
    );

    if manager.restore().await != SessionState::Anonymous {
        bail!("fresh slot restored to a non-anonymous state");
    }

    let issued = generate(http, base_url, 9_044, "Charos").await?;
    if !manager.login_with_code(&issued.code).await {
        bail!("login with a fresh code failed");
    }
    match manager.current() {
        SessionState::Authenticated(session) if session.user.telegram_user_id == "9044" => {}
        other => bail!("unexpected state after login: {other:?}"),
    }
    if manager.login_with_code(&issued.code).await {
        bail!("spent code logged in a second time");
    }

    manager.logout().await;
    if manager.restore().await != SessionState::Anonymous {
        bail!("session slot survived logout");
    }

    let _ = std::fs::remove_file(&slot);
    Ok(())
}

// ── HTTP helpers ───────────────────────────────────────────────────────────

async fn generate(
    http: &Client,
    base_url: &str,
    telegram_user_id: i64,
    first_name: &str,
) -> Result<GenerateResponse> {
    let response = http
        .post(format!("{base_url}/auth/telegram"))
        .json(&AuthRequest::Generate {
            telegram_user_id: Some(telegram_user_id),
            telegram_first_name: Some(first_name.to_owned()),
            telegram_last_name: None,
            telegram_username: None,
            telegram_photo_url: None,
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        bail!("generate answered {status}");
    }
    Ok(response.json().await?)
}

async fn verify(http: &Client, base_url: &str, code: &str) -> Result<(u16, VerifyResponse)> {
    let response = http
        .post(format!("{base_url}/auth/telegram"))
        .json(&AuthRequest::Verify {
            code: Some(code.to_owned()),
        })
        .send()
        .await?;

    let status = response.status().as_u16();
    let verdict = response.json().await?;
    Ok((status, verdict))
}
