//! Parsing of REPL input lines into commands.

use medchat_core::models::{SettingsField, SettingsFieldError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text: a chat message.
    Message(String),
    SwitchChat,
    SwitchConfig,
    ToggleDebug,
    Show,
    Set { field: SettingsField, value: String },
    Save,
    Reset,
    Status,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '/{0}', type /help for a list")]
    Unknown(String),

    #[error("usage: /set <field> <value>")]
    MissingField,

    #[error(transparent)]
    Field(#[from] SettingsFieldError),
}

pub const HELP: &[(&str, &str)] = &[
    ("/chat", "switch to the chat tab"),
    ("/config", "switch to the config tab and reload settings"),
    ("/debug", "show or hide the debug panel"),
    ("/show", "print the settings form"),
    ("/set <field> <value>", "edit one field (\\n in the value becomes a newline)"),
    ("/save", "save the settings form"),
    ("/reset", "reset settings to the server defaults"),
    ("/status", "check server health and list agents"),
    ("/help", "show this list"),
    ("/quit", "leave"),
];

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<ReplCommand>, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Some(ReplCommand::Message(trimmed.to_string())));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim_start()),
        None => (rest, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "chat" => ReplCommand::SwitchChat,
        "config" => ReplCommand::SwitchConfig,
        "debug" => ReplCommand::ToggleDebug,
        "show" => ReplCommand::Show,
        "set" => parse_set(args)?,
        "save" => ReplCommand::Save,
        "reset" => ReplCommand::Reset,
        "status" => ReplCommand::Status,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_set(args: &str) -> Result<ReplCommand, CommandError> {
    let (field, value) = match args.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim_start()),
        None => (args, ""),
    };
    if field.is_empty() {
        return Err(CommandError::MissingField);
    }

    Ok(ReplCommand::Set {
        field: field.parse()?,
        value: value.replace("\\n", "\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_nothing() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("  \t "), Ok(None));
    }

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(
            parse("  what is a migraine?  "),
            Ok(Some(ReplCommand::Message("what is a migraine?".to_string())))
        );
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(parse("/config"), Ok(Some(ReplCommand::SwitchConfig)));
        assert_eq!(parse("/CHAT"), Ok(Some(ReplCommand::SwitchChat)));
        assert_eq!(parse("/debug"), Ok(Some(ReplCommand::ToggleDebug)));
        assert_eq!(parse("/exit"), Ok(Some(ReplCommand::Quit)));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("/frobnicate now"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn test_set_keeps_spaces_and_expands_newlines() {
        assert_eq!(
            parse("/set rag-prompt Use {context}\\nAnswer: {query}"),
            Ok(Some(ReplCommand::Set {
                field: SettingsField::RagPrompt,
                value: "Use {context}\nAnswer: {query}".to_string(),
            }))
        );
    }

    #[test]
    fn test_set_without_value_clears_field() {
        assert_eq!(
            parse("/set system_name"),
            Ok(Some(ReplCommand::Set {
                field: SettingsField::SystemName,
                value: String::new(),
            }))
        );
    }

    #[test]
    fn test_set_errors() {
        assert_eq!(parse("/set"), Err(CommandError::MissingField));
        assert!(matches!(
            parse("/set colour blue"),
            Err(CommandError::Field(SettingsFieldError::UnknownField(_)))
        ));
    }
}
