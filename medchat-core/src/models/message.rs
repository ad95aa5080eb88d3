use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A citation attached to an assistant reply. Web search results carry
/// `url`/`title`/`snippet`; knowledge-base hits carry `content`/`score`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base: Option<String>,
}

impl Source {
    pub fn link(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub agent: Option<String>,
    pub sources: Vec<Source>,
    pub confidence: Option<f64>,
    pub received_at: DateTime<Utc>,
    /// Set on the client-side message that reports a failed turn.
    pub failure: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            agent: None,
            sources: Vec::new(),
            confidence: None,
            received_at: Utc::now(),
            failure: false,
        }
    }

    /// Empty agent labels count as absent.
    pub fn assistant(
        content: impl Into<String>,
        agent: Option<String>,
        sources: Vec<Source>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            agent: agent.filter(|a| !a.is_empty()),
            sources,
            confidence: None,
            received_at: Utc::now(),
            failure: false,
        }
    }

    /// Client-generated report of a failed turn, shown under `label`.
    pub fn failure(content: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            failure: true,
            ..Self::assistant(content, Some(label.into()), Vec::new())
        }
    }

    pub fn with_confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence;
        self
    }
}
