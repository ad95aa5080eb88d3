//! The chat transcript and the session it belongs to.

use std::time::Instant;

use crate::error::ClientError;
use crate::locale::{Locale, Strings};
use crate::models::{ChatReply, ChatRequest, DebugTrace, Message};
use crate::sanitize::sanitize;

/// A turn whose user message is already in the transcript and whose request
/// has not been answered yet. Consumed by [`Conversation::finish_turn`].
#[derive(Debug)]
#[must_use = "a pending turn keeps the conversation busy until finished"]
pub struct PendingTurn {
    request: ChatRequest,
    started: Instant,
}

impl PendingTurn {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Blank input, or a turn was already in flight. Nothing was sent.
    Skipped,
    Answered { debug: Option<DebugTrace> },
    /// The request failed; a system message with this text was appended.
    Failed(String),
}

#[derive(Debug)]
pub struct Conversation {
    session_id: Option<String>,
    messages: Vec<Message>,
    in_flight: bool,
    strings: &'static Strings,
}

impl Conversation {
    pub fn new(locale: Locale) -> Self {
        Self {
            session_id: None,
            messages: Vec::new(),
            in_flight: false,
            strings: locale.strings(),
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Empty ids are ignored.
    pub fn set_session_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        if id.is_empty() {
            return;
        }
        if self.session_id.as_deref() != Some(id.as_str()) {
            tracing::info!(session = %id, "Chat session assigned");
        }
        self.session_id = Some(id);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while a turn is pending (busy indicator on).
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn send_enabled(&self) -> bool {
        !self.in_flight
    }

    /// Start a turn: append the user message and mark the conversation busy.
    /// Returns `None` for blank input or while another turn is pending.
    pub fn begin_turn(&mut self, input: &str) -> Option<PendingTurn> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }
        if self.in_flight {
            tracing::debug!("Ignoring message while a turn is in flight");
            return None;
        }

        self.messages.push(Message::user(query));
        self.in_flight = true;

        Some(PendingTurn {
            request: ChatRequest {
                query: query.to_string(),
                session_id: self.session_id.clone(),
            },
            started: Instant::now(),
        })
    }

    /// Finish a turn with the backend's result. Always clears the busy state.
    pub fn finish_turn(
        &mut self,
        turn: PendingTurn,
        result: Result<ChatReply, ClientError>,
    ) -> TurnOutcome {
        self.in_flight = false;
        let took_ms = turn.started.elapsed().as_millis() as u64;

        match result {
            Ok(reply) => {
                tracing::debug!(took_ms, agent = reply.agent.as_deref().unwrap_or("-"), "Chat turn answered");
                if let Some(id) = reply.session_id {
                    self.set_session_id(id);
                }
                self.messages.push(
                    Message::assistant(reply.response, reply.agent, reply.sources.unwrap_or_default())
                        .with_confidence(reply.confidence),
                );
                TurnOutcome::Answered {
                    debug: reply.debug_info,
                }
            }
            Err(e) => {
                tracing::warn!(took_ms, error = %e, "Chat turn failed");
                let text = format!(
                    "{}{}",
                    self.strings.chat_error_prefix,
                    sanitize(&e.to_string())
                );
                self.messages
                    .push(Message::failure(text.clone(), self.strings.system_agent));
                TurnOutcome::Failed(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn reply(session: Option<&str>, text: &str) -> ChatReply {
        ChatReply {
            session_id: session.map(str::to_string),
            response: text.to_string(),
            agent: Some("conversation agent".to_string()),
            ..ChatReply::default()
        }
    }

    #[test]
    fn test_blank_input_starts_nothing() {
        let mut convo = Conversation::new(Locale::En);
        assert!(convo.begin_turn("").is_none());
        assert!(convo.begin_turn("   \t\n").is_none());
        assert!(convo.messages().is_empty());
        assert!(!convo.is_busy());
    }

    #[test]
    fn test_begin_appends_trimmed_user_message_and_goes_busy() {
        let mut convo = Conversation::new(Locale::En);
        let turn = convo.begin_turn("  headache remedies  ").expect("turn should start");

        assert_eq!(turn.request().query, "headache remedies");
        assert_eq!(turn.request().session_id, None);
        assert_eq!(convo.messages().len(), 1);
        assert_eq!(convo.messages()[0].role, Role::User);
        assert!(convo.is_busy());
        assert!(!convo.send_enabled());

        let _ = convo.finish_turn(turn, Ok(reply(Some("s-1"), "rest")));
        assert!(!convo.is_busy());
    }

    #[test]
    fn test_second_turn_refused_while_in_flight() {
        let mut convo = Conversation::new(Locale::En);
        let first = convo.begin_turn("one").expect("first turn");
        assert!(convo.begin_turn("two").is_none());
        assert_eq!(convo.messages().len(), 1, "refused input is not appended");

        let _ = convo.finish_turn(first, Ok(reply(None, "ok")));
        assert!(convo.begin_turn("two").is_some());
    }

    #[test]
    fn test_session_id_carried_into_next_request() {
        let mut convo = Conversation::new(Locale::En);
        let turn = convo.begin_turn("first").unwrap();
        let _ = convo.finish_turn(turn, Ok(reply(Some("abc-123"), "hi")));
        assert_eq!(convo.session_id(), Some("abc-123"));

        let turn = convo.begin_turn("second").unwrap();
        assert_eq!(turn.request().session_id.as_deref(), Some("abc-123"));

        // A reply without an id keeps the current one
        let _ = convo.finish_turn(turn, Ok(reply(None, "hi again")));
        assert_eq!(convo.session_id(), Some("abc-123"));
    }

    #[test]
    fn test_empty_session_id_is_ignored() {
        let mut convo = Conversation::new(Locale::En);
        convo.set_session_id("keep");
        convo.set_session_id("");
        assert_eq!(convo.session_id(), Some("keep"));
    }

    #[test]
    fn test_failure_appends_system_message() {
        let mut convo = Conversation::new(Locale::En);
        let turn = convo.begin_turn("hello").unwrap();
        let outcome = convo.finish_turn(
            turn,
            Err(ClientError::Api {
                code: 500,
                message: "boom".to_string(),
            }),
        );

        let last = convo.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.agent.as_deref(), Some("system"));
        assert!(last.failure);
        assert_eq!(last.content, "Sorry, an error occurred: Server error (500): boom");
        assert_eq!(outcome, TurnOutcome::Failed(last.content.clone()));
        assert!(!convo.is_busy());
    }

    #[test]
    fn test_failure_label_follows_locale() {
        let mut convo = Conversation::new(Locale::Zh);
        let turn = convo.begin_turn("你好").unwrap();
        let _ = convo.finish_turn(turn, Err(ClientError::InvalidUrl("x".to_string())));
        assert_eq!(convo.messages()[1].agent.as_deref(), Some("系统"));
        assert!(convo.messages()[1].content.starts_with("抱歉,发生错误: "));
    }

    #[test]
    fn test_failure_text_is_sanitized() {
        let mut convo = Conversation::new(Locale::En);
        let turn = convo.begin_turn("hello").unwrap();
        let outcome = convo.finish_turn(
            turn,
            Err(ClientError::Api {
                code: 500,
                message: "\u{1b}[2Jboom\u{1b}]0;pwned\u{07}".to_string(),
            }),
        );

        let text = match outcome {
            TurnOutcome::Failed(text) => text,
            other => panic!("Expected failure, got {other:?}"),
        };
        assert!(!text.contains('\u{1b}'));
        assert_eq!(text, "Sorry, an error occurred: Server error (500): boom");
        assert_eq!(convo.messages()[1].content, text);
    }

    #[test]
    fn test_reply_from_agent_named_system_is_not_failure() {
        let mut convo = Conversation::new(Locale::En);
        let turn = convo.begin_turn("hi").unwrap();
        let mut answer = reply(None, "fine");
        answer.agent = Some("system".to_string());
        let _ = convo.finish_turn(turn, Ok(answer));

        assert_eq!(convo.messages()[1].agent.as_deref(), Some("system"));
        assert!(!convo.messages()[1].failure);
    }
}
