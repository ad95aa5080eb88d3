//! Request and response bodies of the chat service's JSON API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DebugTrace, SettingsSnapshot, Source};

/// Body of `POST /chat`. `session_id` is sent as `null` until the server
/// has assigned one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub query: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<Source>>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub debug_info: Option<DebugTrace>,
}

/// Body of `GET /config`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub config: Option<SettingsSnapshot>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /config` and `POST /config/reset`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentRoster {
    #[serde(default)]
    pub agents: BTreeMap<String, String>,
    #[serde(default)]
    pub current_sessions: u64,
}
