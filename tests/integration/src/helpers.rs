//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use roster_api::{create_app, create_app_state};
use roster_common::AppConfig;
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over a fresh in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        // Port 0: the OS hands out a free port per server
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// POST without a body
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.put(self.url(path)).json(body).send().await?)
    }

    pub async fn patch<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.patch(self.url(path)).json(body).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// In-memory store, no recognizer, generous rate limit
pub fn test_config() -> Result<AppConfig> {
    AppConfig::from_lookup(|key| {
        match key {
            "API_PORT" => Some("0"),
            "STORE_BACKEND" => Some("memory"),
            "RATE_LIMIT_REQUESTS_PER_SECOND" => Some("1000"),
            "RATE_LIMIT_BURST" => Some("1000"),
            _ => None,
        }
        .map(String::from)
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
