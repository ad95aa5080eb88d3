//! Builds display fragments from transcript and debug state. Every string
//! taken from the server is sanitized here; front ends print fragments as-is.

use chrono::{DateTime, Utc};

use crate::debug_panel::{CallList, DebugPanel};
use crate::locale::Strings;
use crate::models::{Message, Role, Source};
use crate::sanitize::{safe_link, sanitize};

#[derive(Debug, Clone, PartialEq)]
pub enum SourceItem {
    Link {
        number: usize,
        url: String,
        label: String,
    },
    Text {
        number: usize,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageFragment {
    pub role: Role,
    pub agent_label: Option<String>,
    pub body: String,
    pub sources: Vec<SourceItem>,
    pub confidence: Option<f64>,
    pub received_at: DateTime<Utc>,
    pub failure: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn render_source(number: usize, source: &Source) -> SourceItem {
    let link = non_empty(&source.url).and_then(safe_link);
    let title = non_empty(&source.title);

    match link {
        Some(url) => SourceItem::Link {
            number,
            url: url.to_string(),
            label: sanitize(title.unwrap_or(url)).into_owned(),
        },
        None => {
            let text = non_empty(&source.content)
                .or_else(|| non_empty(&source.snippet))
                // A rejected link still shows what it pointed at
                .or(title)
                .unwrap_or("");
            SourceItem::Text {
                number,
                text: sanitize(text).into_owned(),
            }
        }
    }
}

pub fn render_message(message: &Message) -> MessageFragment {
    MessageFragment {
        role: message.role,
        agent_label: non_empty(&message.agent).map(|a| sanitize(a).into_owned()),
        body: sanitize(&message.content).into_owned(),
        sources: message
            .sources
            .iter()
            .enumerate()
            .map(|(i, s)| render_source(i + 1, s))
            .collect(),
        confidence: message.confidence,
        received_at: message.received_at,
        failure: message.failure,
    }
}

/// Debug panel body: decision line, execution line, then the call list.
pub fn render_debug(panel: &DebugPanel, strings: &Strings) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(decision) = panel.decision() {
        lines.push(format!("{} {}", strings.debug_decision, sanitize(decision)));
    }
    if let Some(execution) = panel.execution() {
        lines.push(format!("{} {}", strings.debug_execution, sanitize(execution)));
    }

    match panel.calls() {
        CallList::Placeholder => lines.push(strings.debug_no_calls.to_string()),
        CallList::Calls(calls) => {
            for (i, call) in calls.iter().enumerate() {
                lines.push(format!("{} {}:", strings.debug_call, i + 1));
                lines.push(format!("  Agent: {}", sanitize(&call.agent)));
                lines.push(format!("  {}: {}", strings.debug_model, sanitize(&call.model)));
                lines.push(format!("  {}: {}", strings.debug_purpose, sanitize(&call.purpose)));
            }
        }
    }

    lines
}
