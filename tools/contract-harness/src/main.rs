//! Contract harness — golden HTTP assertions and scripted login flows
//! against the auth service.
//!
//! # Usage
//!
//! ```bash
//! # Self-contained: start Postgres in Docker, migrate, serve the auth
//! # service in-process, run fixtures + flows, clean up
//! cargo run -p contract-harness
//!
//! # Fixtures only, against an already-running service
//! cargo run -p contract-harness -- --base-url http://localhost:3112
//! ```
//!
//! The exit status is 0 only when every assertion passed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod config;
mod docker;
mod fixture;
mod reporter;
mod runner;
mod services;

use config::HarnessConfig;
use docker::DockerOrchestrator;

#[derive(Parser)]
#[command(about = "Run HTTP contract assertions against the auth service")]
struct Args {
    /// Base URL of an already-running service (e.g. http://localhost:3112).
    /// When omitted, the harness orchestrates its own Postgres container and
    /// serves the auth service in-process.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let workspace_root = workspace_root();

    if let Some(base_url) = args.base_url {
        let passed = services::auth::run_fixtures(&base_url, &workspace_root).await?;
        if !passed {
            std::process::exit(1);
        }
        return Ok(());
    }

    // One docker-mode session at a time: concurrent sessions would race on
    // the daemon and on the label-based stale cleanup.
    let lock_path = std::env::temp_dir().join("ravon-contract-harness.lock");
    let lock_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("cannot open lock file {}", lock_path.display()))?;
    let mut lock = fd_lock::RwLock::new(lock_file);
    let _session = lock.write().context("another harness session is running")?;

    let config = HarnessConfig::from_env();
    let mut orchestrator = DockerOrchestrator::connect(&config.docker_host).await?;
    orchestrator.cleanup_stale().await.ok();

    let database_url = orchestrator.start_postgres().await?;
    let infra = services::InfraUrls { database_url };

    let outcome = services::auth::run(&infra, &workspace_root).await;
    orchestrator.cleanup().await.ok();

    match outcome {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => Err(e),
    }
}

/// Nearest ancestor of this crate's manifest dir that holds a `Cargo.lock`;
/// fixtures live under `contracts/` relative to it.
fn workspace_root() -> PathBuf {
    let start = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    start
        .ancestors()
        .find(|p| p.join("Cargo.lock").exists())
        .unwrap_or(&start)
        .to_path_buf()
}
