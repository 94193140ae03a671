#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use village_infra_api::config::AppConfig;
use village_infra_api::database::MemoryStore;
use village_infra_api::storage::MemoryStorage;
use village_infra_api::AppState;

pub const TEST_PASSWORD: &str = "rahasia-desa-123";

/// One in-memory server per test, on its own runtime thread
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub storage: Arc<MemoryStorage>,
    pub client: reqwest::Client,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.api.enable_request_logging = false;
    config.security.jwt_secret = "integration-test-secret".to_string();
    config
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = std::net::TcpListener::bind(("127.0.0.1", port))
            .with_context(|| format!("failed to bind test port {}", port))?;
        listener.set_nonblocking(true)?;

        let storage = Arc::new(MemoryStorage::new());
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            storage.clone(),
            test_config(),
        );
        let app = village_infra_api::app(state);

        // Outlives the test's own runtime so later requests still find it
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("failed to build server runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener)
                    .expect("failed to adopt test listener");
                axum::serve(listener, app).await.expect("server");
            });
        });

        Ok(Self {
            port,
            base_url,
            storage,
            client: reqwest::Client::new(),
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = self.client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register an account and return `(token, user)`
    pub async fn register(&self, name: &str, email: &str, role: &str) -> Result<(String, Value)> {
        let res = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({
                "name": name,
                "email": email,
                "password": TEST_PASSWORD,
                "role": role,
            }))
            .send()
            .await?;
        anyhow::ensure!(
            res.status() == StatusCode::CREATED,
            "register failed with {}",
            res.status()
        );

        let body = res.json::<Value>().await?;
        let token = body["token"]
            .as_str()
            .context("register response missing token")?
            .to_string();
        Ok((token, body["user"].clone()))
    }

    /// Register a throwaway official and return only the token
    pub async fn token(&self) -> Result<String> {
        let (token, _) = self
            .register("Petugas Desa", "petugas@desa.id", "official")
            .await?;
        Ok(token)
    }

    pub async fn create_project(&self, token: &str, body: Value) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/api/projects"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        anyhow::ensure!(
            res.status() == StatusCode::CREATED,
            "create project failed with {}",
            res.status()
        );
        Ok(res.json::<Value>().await?)
    }

    pub async fn get_json(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        let status = res.status();
        Ok((status, res.json::<Value>().await?))
    }

    pub async fn post_json(&self, path: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        Ok((status, res.json::<Value>().await?))
    }

    pub async fn put_json(&self, path: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        Ok((status, res.json::<Value>().await?))
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
