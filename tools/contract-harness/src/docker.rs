//! Docker orchestration for the contract harness.
//!
//! Owns the one PostgreSQL container a harness session needs. Stale
//! containers left by crashed sessions are swept on connect; the live one
//! is stopped and removed on cleanup.

use std::collections::HashMap;
use std::net::TcpStream;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use bollard::Docker;
use bollard::models::{ContainerCreateBody, HostConfig, PortBinding};
use bollard::query_parameters::{
    CreateContainerOptionsBuilder, CreateImageOptionsBuilder, ListContainersOptionsBuilder,
    RemoveContainerOptionsBuilder, StartContainerOptionsBuilder, StopContainerOptionsBuilder,
};
use futures::TryStreamExt;

const TEST_LABEL_KEY: &str = "ravon.role";
const TEST_LABEL_VALUE: &str = "contract-test";

const POSTGRES_IMAGE: &str = "postgres:18";
const POSTGRES_PORT: &str = "5432/tcp";

/// Manages the database container created for a harness session.
pub struct DockerOrchestrator {
    client: Docker,
    /// Address the test process dials containers at.
    pub host: String,
    container_id: Option<String>,
}

impl DockerOrchestrator {
    /// Open a client against the daemon at `docker_host` and verify it
    /// answers a ping. `unix://` URLs use the local socket, `tcp://` URLs
    /// unencrypted HTTP; `host` is derived from the same URL.
    pub async fn connect(docker_host: &str) -> Result<Self> {
        let (client, host) = if docker_host.starts_with("unix://") {
            let client = Docker::connect_with_local_defaults()
                .context("failed to connect to local Docker socket")?;
            (client, "127.0.0.1".to_owned())
        } else if let Some(rest) = docker_host.strip_prefix("tcp://") {
            let host = docker_host_from_url(docker_host);
            let client = Docker::connect_with_http(rest, 120, bollard::API_DEFAULT_VERSION)
                .context("failed to connect to remote Docker daemon")?;
            (client, host)
        } else {
            let client =
                Docker::connect_with_defaults().context("failed to connect to Docker daemon")?;
            (client, "127.0.0.1".to_owned())
        };

        // Verify connectivity
        client
            .ping()
            .await
            .context("Docker daemon did not respond to ping")?;

        Ok(Self {
            client,
            host,
            container_id: None,
        })
    }

    /// Remove all **non-running** containers labeled `ravon.role=contract-test`,
    /// left behind by sessions that died before their own cleanup ran.
    ///
    /// Never touches running containers.
    pub async fn cleanup_stale(&self) -> Result<()> {
        let mut filters = HashMap::new();
        filters.insert(
            "label".to_owned(),
            vec![format!("{TEST_LABEL_KEY}={TEST_LABEL_VALUE}")],
        );
        filters.insert(
            "status".to_owned(),
            vec!["exited".to_owned(), "dead".to_owned()],
        );

        let options = ListContainersOptionsBuilder::new()
            .all(true)
            .filters(&filters)
            .build();

        let containers = self.client.list_containers(Some(options)).await?;

        for c in containers {
            if let Some(id) = c.id {
                self.client
                    .remove_container(
                        &id,
                        Some(RemoveContainerOptionsBuilder::new().force(true).build()),
                    )
                    .await
                    .ok(); // best-effort; stale cleanup failures are non-fatal
            }
        }

        Ok(())
    }

    /// Pull and start the Postgres container on a random host port, wait for
    /// it to accept connections, and return a `DATABASE_URL` pointing at it.
    pub async fn start_postgres(&mut self) -> Result<String> {
        self.client
            .create_image(
                Some(
                    CreateImageOptionsBuilder::new()
                        .from_image(POSTGRES_IMAGE)
                        .build(),
                ),
                None,
                None,
            )
            .try_collect::<Vec<_>>()
            .await
            .with_context(|| format!("failed to pull {POSTGRES_IMAGE}"))?;

        let mut labels = HashMap::new();
        labels.insert(TEST_LABEL_KEY.to_owned(), TEST_LABEL_VALUE.to_owned());

        let mut port_bindings = HashMap::new();
        port_bindings.insert(
            POSTGRES_PORT.to_owned(),
            Some(vec![PortBinding {
                host_ip: Some("127.0.0.1".to_owned()),
                host_port: Some(String::new()), // "" = random port
            }]),
        );

        let config = ContainerCreateBody {
            image: Some(POSTGRES_IMAGE.to_owned()),
            env: Some(vec![
                "POSTGRES_USER=postgres".to_owned(),
                "POSTGRES_PASSWORD=postgres".to_owned(),
                "POSTGRES_DB=ravon_test".to_owned(),
            ]),
            labels: Some(labels),
            exposed_ports: Some(vec![POSTGRES_PORT.to_owned()]),
            host_config: Some(HostConfig {
                port_bindings: Some(port_bindings),
                ..Default::default()
            }),
            ..Default::default()
        };

        let id = self
            .client
            .create_container(Some(CreateContainerOptionsBuilder::new().build()), config)
            .await
            .context("failed to create postgres container")?
            .id;

        self.client
            .start_container(&id, Some(StartContainerOptionsBuilder::new().build()))
            .await
            .context("failed to start postgres container")?;

        self.container_id = Some(id.clone());

        let port = self.mapped_port(&id).await?;
        wait_port_open(&self.host, port, 30).await?;

        Ok(format!(
            "postgres://postgres:postgres@{}:{}/ravon_test",
            self.host, port
        ))
    }

    /// Stop and remove the container started by this session.
    ///
    /// Always call this — success or failure. Errors are best-effort; call
    /// `.ok()` at the call site.
    pub async fn cleanup(&mut self) -> Result<()> {
        if let Some(id) = self.container_id.take() {
            let _ = self
                .client
                .stop_container(&id, Some(StopContainerOptionsBuilder::new().t(5).build()))
                .await;
            let _ = self
                .client
                .remove_container(
                    &id,
                    Some(RemoveContainerOptionsBuilder::new().force(true).build()),
                )
                .await;
        }
        Ok(())
    }

    /// Inspect the container and return the host-side port mapped to 5432.
    async fn mapped_port(&self, container_id: &str) -> Result<u16> {
        let info = self
            .client
            .inspect_container(container_id, None)
            .await
            .context("failed to inspect container")?;

        let port_str = info
            .network_settings
            .as_ref()
            .and_then(|n| n.ports.as_ref())
            .and_then(|ports| ports.get(POSTGRES_PORT))
            .and_then(|bindings| bindings.as_ref())
            .and_then(|bindings| bindings.first())
            .and_then(|b| b.host_port.as_deref())
            .ok_or_else(|| anyhow!("no host port found for {POSTGRES_PORT}"))?;

        port_str
            .parse()
            .with_context(|| format!("invalid port number: {port_str}"))
    }
}

/// Retry TCP connects to `host:port` until one lands or `timeout_secs` runs out.
async fn wait_port_open(host: &str, port: u16, timeout_secs: u64) -> Result<()> {
    let addr = format!("{host}:{port}");
    let deadline = Instant::now() + Duration::from_secs(timeout_secs);

    loop {
        if TcpStream::connect(&addr).is_ok() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(anyhow!(
                "timed out waiting for {addr} to accept connections"
            ));
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
}

/// Hostname containers are reachable at, given the daemon URL: the host
/// part of a `tcp://` URL, loopback for a local socket or anything else.
fn docker_host_from_url(url: &str) -> String {
    if url.starts_with("unix://") {
        return "127.0.0.1".to_owned();
    }
    if let Some(rest) = url.strip_prefix("tcp://") {
        return rest
            .split_once(':')
            .map(|(host, _)| host.to_owned())
            .unwrap_or_else(|| rest.to_owned());
    }
    "127.0.0.1".to_owned()
}
