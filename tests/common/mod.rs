#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // The server loads .env itself, so PG_* / DATABASE_URL come from there
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_kinoteka-api"));
        cmd.env("API_HOST", "127.0.0.1")
            .env("API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Login that does not collide with earlier runs against the same database.
pub fn unique_login(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}-{}", prefix, nanos)
}

/// Registers a fresh user with `role` and returns a bearer token for it.
pub async fn token_for(server: &TestServer, role: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let login = unique_login(role);
    let credentials = json!({ "login": login, "password": "e2e-password" });

    let res = client
        .post(server.url("/sign-up"))
        .json(&json!({ "login": login, "password": "e2e-password", "role": role }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "sign-up failed: {}", res.status());

    let res = client.post(server.url("/sign-in")).json(&credentials).send().await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "sign-in failed: {}", res.status());

    let body: Value = res.json().await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("sign-in response has no token")
}
