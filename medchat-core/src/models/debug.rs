use serde::{Deserialize, Serialize};

/// Diagnostic payload describing how the backend handled one chat turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugTrace {
    #[serde(default)]
    pub decision_agent: Option<String>,
    #[serde(default)]
    pub execution_agent: Option<String>,
    #[serde(default)]
    pub llm_calls: Option<Vec<LlmCall>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmCall {
    #[serde(default)]
    pub agent: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub purpose: String,
}
