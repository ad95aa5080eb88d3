use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The editable agent configuration, as posted back to `POST /config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSettings {
    pub system_name: String,
    pub welcome_message: String,
    pub rag_enabled: bool,
    pub agent_decision_prompt: String,
    pub conversation_prompt: String,
    pub rag_prompt: String,
    pub websearch_prompt: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            system_name: String::new(),
            welcome_message: String::new(),
            rag_enabled: true,
            agent_decision_prompt: String::new(),
            conversation_prompt: String::new(),
            rag_prompt: String::new(),
            websearch_prompt: String::new(),
        }
    }
}

/// Configuration as returned by `GET /config`. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SettingsSnapshot {
    #[serde(default)]
    pub system_name: Option<String>,
    #[serde(default)]
    pub welcome_message: Option<String>,
    #[serde(default)]
    pub rag_enabled: Option<bool>,
    #[serde(default)]
    pub agent_decision_prompt: Option<String>,
    #[serde(default)]
    pub conversation_prompt: Option<String>,
    #[serde(default)]
    pub rag_prompt: Option<String>,
    #[serde(default)]
    pub websearch_prompt: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl SettingsSnapshot {
    /// Missing strings become empty; RAG stays on unless explicitly `false`
    /// (`null` counts as missing).
    pub fn into_settings(self) -> AgentSettings {
        AgentSettings {
            system_name: self.system_name.unwrap_or_default(),
            welcome_message: self.welcome_message.unwrap_or_default(),
            rag_enabled: self.rag_enabled != Some(false),
            agent_decision_prompt: self.agent_decision_prompt.unwrap_or_default(),
            conversation_prompt: self.conversation_prompt.unwrap_or_default(),
            rag_prompt: self.rag_prompt.unwrap_or_default(),
            websearch_prompt: self.websearch_prompt.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    SystemName,
    WelcomeMessage,
    RagEnabled,
    AgentDecisionPrompt,
    ConversationPrompt,
    RagPrompt,
    WebsearchPrompt,
}

impl SettingsField {
    pub const ALL: [SettingsField; 7] = [
        SettingsField::SystemName,
        SettingsField::WelcomeMessage,
        SettingsField::RagEnabled,
        SettingsField::AgentDecisionPrompt,
        SettingsField::ConversationPrompt,
        SettingsField::RagPrompt,
        SettingsField::WebsearchPrompt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingsField::SystemName => "system_name",
            SettingsField::WelcomeMessage => "welcome_message",
            SettingsField::RagEnabled => "rag_enabled",
            SettingsField::AgentDecisionPrompt => "agent_decision_prompt",
            SettingsField::ConversationPrompt => "conversation_prompt",
            SettingsField::RagPrompt => "rag_prompt",
            SettingsField::WebsearchPrompt => "websearch_prompt",
        }
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsFieldError {
    #[error("unknown settings field '{0}'")]
    UnknownField(String),

    #[error("'{0}' is not a boolean (use true/false, on/off, yes/no)")]
    InvalidBool(String),
}

impl FromStr for SettingsField {
    type Err = SettingsFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        SettingsField::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| SettingsFieldError::UnknownField(s.to_string()))
    }
}

fn parse_toggle(value: &str) -> Result<bool, SettingsFieldError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(SettingsFieldError::InvalidBool(value.to_string())),
    }
}

impl AgentSettings {
    pub fn get(&self, field: SettingsField) -> String {
        match field {
            SettingsField::SystemName => self.system_name.clone(),
            SettingsField::WelcomeMessage => self.welcome_message.clone(),
            SettingsField::RagEnabled => self.rag_enabled.to_string(),
            SettingsField::AgentDecisionPrompt => self.agent_decision_prompt.clone(),
            SettingsField::ConversationPrompt => self.conversation_prompt.clone(),
            SettingsField::RagPrompt => self.rag_prompt.clone(),
            SettingsField::WebsearchPrompt => self.websearch_prompt.clone(),
        }
    }

    pub fn set(&mut self, field: SettingsField, value: &str) -> Result<(), SettingsFieldError> {
        let slot = match field {
            SettingsField::RagEnabled => {
                self.rag_enabled = parse_toggle(value)?;
                return Ok(());
            }
            SettingsField::SystemName => &mut self.system_name,
            SettingsField::WelcomeMessage => &mut self.welcome_message,
            SettingsField::AgentDecisionPrompt => &mut self.agent_decision_prompt,
            SettingsField::ConversationPrompt => &mut self.conversation_prompt,
            SettingsField::RagPrompt => &mut self.rag_prompt,
            SettingsField::WebsearchPrompt => &mut self.websearch_prompt,
        };
        *slot = value.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(value: serde_json::Value) -> SettingsSnapshot {
        serde_json::from_value(value).expect("snapshot should parse")
    }

    #[test]
    fn test_rag_defaults_to_enabled_when_missing() {
        let settings = snapshot(serde_json::json!({ "system_name": "Clinic" })).into_settings();
        assert!(settings.rag_enabled);
        assert_eq!(settings.system_name, "Clinic");
        assert_eq!(settings.rag_prompt, "", "missing strings become empty");
    }

    #[test]
    fn test_rag_null_counts_as_enabled() {
        let settings = snapshot(serde_json::json!({ "rag_enabled": null })).into_settings();
        assert!(settings.rag_enabled);
    }

    #[test]
    fn test_rag_explicit_false_is_kept() {
        let settings = snapshot(serde_json::json!({ "rag_enabled": false })).into_settings();
        assert!(!settings.rag_enabled);
    }

    #[test]
    fn test_field_names_parse_loosely() {
        assert_eq!("rag_enabled".parse::<SettingsField>(), Ok(SettingsField::RagEnabled));
        assert_eq!("Welcome-Message".parse::<SettingsField>(), Ok(SettingsField::WelcomeMessage));
        assert_eq!(
            "temperature".parse::<SettingsField>(),
            Err(SettingsFieldError::UnknownField("temperature".to_string()))
        );
    }

    #[test]
    fn test_set_toggle_accepts_common_spellings() {
        let mut settings = AgentSettings::default();
        settings.set(SettingsField::RagEnabled, "off").unwrap();
        assert!(!settings.rag_enabled);
        settings.set(SettingsField::RagEnabled, "YES").unwrap();
        assert!(settings.rag_enabled);
        assert_eq!(
            settings.set(SettingsField::RagEnabled, "maybe"),
            Err(SettingsFieldError::InvalidBool("maybe".to_string()))
        );
        assert!(settings.rag_enabled, "failed parse leaves the value alone");
    }

    #[test]
    fn test_serialized_form_uses_wire_names() {
        let mut settings = AgentSettings::default();
        settings.set(SettingsField::SystemName, "Clinic").unwrap();
        let json = serde_json::to_value(&settings).unwrap();

        for field in SettingsField::ALL {
            assert!(json.get(field.as_str()).is_some(), "missing {}", field);
        }
        assert_eq!(json["rag_enabled"], true);
    }
}
