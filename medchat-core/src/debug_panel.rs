use crate::models::{DebugTrace, LlmCall};

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CallList {
    #[default]
    Placeholder,
    Calls(Vec<LlmCall>),
}

/// Backend decision trace for the latest turn.
///
/// Decision and execution entries are only overwritten by non-empty values,
/// so a trace without them leaves the previous turn's values in place. The
/// call list is always replaced.
#[derive(Debug, Clone, Default)]
pub struct DebugPanel {
    visible: bool,
    decision: Option<String>,
    execution: Option<String>,
    calls: CallList,
}

impl DebugPanel {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            ..Self::default()
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn update(&mut self, trace: &DebugTrace) {
        if let Some(decision) = non_empty(&trace.decision_agent) {
            self.decision = Some(decision.to_string());
        }
        if let Some(execution) = non_empty(&trace.execution_agent) {
            self.execution = Some(execution.to_string());
        }
        self.calls = match &trace.llm_calls {
            Some(calls) if !calls.is_empty() => CallList::Calls(calls.clone()),
            _ => CallList::Placeholder,
        };
    }

    pub fn decision(&self) -> Option<&str> {
        self.decision.as_deref()
    }

    pub fn execution(&self) -> Option<&str> {
        self.execution.as_deref()
    }

    pub fn calls(&self) -> &CallList {
        &self.calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(agent: &str) -> LlmCall {
        LlmCall {
            agent: agent.to_string(),
            model: "qwen-plus".to_string(),
            purpose: "routing".to_string(),
        }
    }

    #[test]
    fn test_toggle_twice_restores_visibility() {
        let mut panel = DebugPanel::new(false);
        assert!(panel.toggle());
        assert!(!panel.toggle());
        assert!(!panel.is_visible());

        let mut panel = DebugPanel::new(true);
        panel.toggle();
        panel.toggle();
        assert!(panel.is_visible());
    }

    #[test]
    fn test_absent_fields_leave_previous_values() {
        let mut panel = DebugPanel::new(false);
        panel.update(&DebugTrace {
            decision_agent: Some("WEBSEARCH".to_string()),
            execution_agent: Some("web search agent".to_string()),
            llm_calls: Some(vec![call("router")]),
        });

        panel.update(&DebugTrace {
            decision_agent: None,
            execution_agent: Some("conversation agent".to_string()),
            llm_calls: None,
        });

        assert_eq!(panel.decision(), Some("WEBSEARCH"), "decision stays stale");
        assert_eq!(panel.execution(), Some("conversation agent"));
        assert_eq!(panel.calls(), &CallList::Placeholder, "call list is reset");
    }

    #[test]
    fn test_empty_strings_leave_previous_values() {
        let mut panel = DebugPanel::new(false);
        panel.update(&DebugTrace {
            decision_agent: Some("RAG".to_string()),
            execution_agent: Some("RAG agent".to_string()),
            llm_calls: None,
        });

        panel.update(&DebugTrace {
            decision_agent: Some(String::new()),
            execution_agent: Some(String::new()),
            llm_calls: None,
        });

        assert_eq!(panel.decision(), Some("RAG"));
        assert_eq!(panel.execution(), Some("RAG agent"));
    }

    #[test]
    fn test_empty_call_list_shows_placeholder() {
        let mut panel = DebugPanel::new(false);
        panel.update(&DebugTrace {
            llm_calls: Some(vec![call("router")]),
            ..DebugTrace::default()
        });
        assert_eq!(panel.calls(), &CallList::Calls(vec![call("router")]));

        panel.update(&DebugTrace {
            llm_calls: Some(Vec::new()),
            ..DebugTrace::default()
        });
        assert_eq!(panel.calls(), &CallList::Placeholder);
    }
}
