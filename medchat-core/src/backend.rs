//! Chat service access.
//!
//! `ChatBackend` abstracts the JSON API the client talks to; `HttpBackend`
//! is the reqwest implementation used by the binary and exercised against
//! `wiremock` in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ServerConfig;
use crate::error::ClientError;
use crate::sanitize::parse_web_url;
use crate::models::{
    Ack, AgentRoster, AgentSettings, ChatReply, ChatRequest, HealthStatus, SettingsEnvelope,
};

// ============================================================================
// ChatBackend trait
// ============================================================================

/// Abstraction over the chat service endpoints.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// `POST /chat`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError>;

    /// `GET /config`
    async fn fetch_settings(&self) -> Result<SettingsEnvelope, ClientError>;

    /// `POST /config` with the full settings object.
    async fn save_settings(&self, settings: &AgentSettings) -> Result<Ack, ClientError>;

    /// `POST /config/reset`
    async fn reset_settings(&self) -> Result<Ack, ClientError>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus, ClientError>;

    /// `GET /agents`
    async fn agents(&self) -> Result<AgentRoster, ClientError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

// ============================================================================
// HttpBackend
// ============================================================================

/// FastAPI-style error body: `{"detail": "..."}`. Validation errors carry a
/// list instead of a string.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ServerConfig) -> Result<Self, ClientError> {
        Self::with_base_url(&config.url, Duration::from_secs(config.timeout_seconds))
    }

    /// Create a backend for an explicit base URL (tests point this at a mock server)
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if parse_web_url(&base_url).is_none() {
            return Err(ClientError::InvalidUrl(base_url));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|e| e.detail)
                .map(|detail| match detail {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or(body);

            tracing::warn!(code = status.as_u16(), message = %message, "Chat service error");

            return Err(ClientError::Api {
                code: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        tracing::debug!(
            session = request.session_id.as_deref().unwrap_or("-"),
            "POST /chat"
        );
        self.send(self.client.post(self.url("/chat")).json(request))
            .await
    }

    async fn fetch_settings(&self) -> Result<SettingsEnvelope, ClientError> {
        tracing::debug!("GET /config");
        self.send(self.client.get(self.url("/config"))).await
    }

    async fn save_settings(&self, settings: &AgentSettings) -> Result<Ack, ClientError> {
        tracing::debug!("POST /config");
        self.send(self.client.post(self.url("/config")).json(settings))
            .await
    }

    async fn reset_settings(&self) -> Result<Ack, ClientError> {
        tracing::debug!("POST /config/reset");
        self.send(self.client.post(self.url("/config/reset"))).await
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.send(self.client.get(self.url("/health"))).await
    }

    async fn agents(&self) -> Result<AgentRoster, ClientError> {
        self.send(self.client.get(self.url("/agents"))).await
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}

// ============================================================================
// Status probe
// ============================================================================

/// Outcome of probing `/health` and `/agents`; each half fails independently.
#[derive(Debug)]
pub struct StatusReport {
    pub server: String,
    pub health: Result<HealthStatus, ClientError>,
    pub agents: Result<AgentRoster, ClientError>,
}

impl StatusReport {
    pub fn is_healthy(&self) -> bool {
        matches!(&self.health, Ok(h) if h.status == "healthy")
    }
}

pub async fn probe(backend: &dyn ChatBackend) -> StatusReport {
    let health = backend.health().await;
    let agents = backend.agents().await;
    StatusReport {
        server: backend.name().to_string(),
        health,
        agents,
    }
}

// ============================================================================
// TESTS
// ============================================================================
