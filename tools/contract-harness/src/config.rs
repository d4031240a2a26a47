//! Contract harness configuration loaded from environment variables.

/// Configuration for the Docker-based harness mode.
///
/// Loaded from env vars after `dotenv::dotenv().ok()`; defaults suit local
/// development.
#[derive(Debug)]
pub struct HarnessConfig {
    /// Daemon URL from `DOCKER_HOST`, defaulting to the local socket.
    pub docker_host: String,
}

impl HarnessConfig {
    pub fn from_env() -> Self {
        Self {
            docker_host: std::env::var("DOCKER_HOST")
                .unwrap_or_else(|_| "unix:///var/run/docker.sock".to_owned()),
        }
    }
}
