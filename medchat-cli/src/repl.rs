//! Interactive session: a rustyline loop over the chat view model.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use medchat_core::{render_debug, render_message, ChatApp, Tab, TurnOutcome};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::commands::{self, ReplCommand, HELP};
use crate::terminal::{self, Spinner, TerminalDialogs};

/// Completion, hints and highlighting for slash commands.
struct ReplHelper {
    commands: Vec<&'static str>,
}

impl ReplHelper {
    fn new() -> Self {
        Self {
            commands: HELP
                .iter()
                .map(|(usage, _)| usage.split_whitespace().next().unwrap_or(*usage))
                .collect(),
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ReplHelper {}

/// Prints transcript entries that have not been shown yet.
#[derive(Default)]
struct Transcript {
    rendered: usize,
}

impl Transcript {
    fn flush(&mut self, app: &ChatApp) {
        let messages = app.conversation().messages();
        for message in &messages[self.rendered..] {
            terminal::print_fragment(&render_message(message), app.strings());
        }
        self.rendered = messages.len();
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run(app: &mut ChatApp, history_file: Option<&str>) -> Result<()> {
    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));
    if let Some(path) = history_file {
        if let Err(e) = rl.load_history(path) {
            tracing::debug!(error = %e, path, "No history loaded");
        }
    }

    // Silent on failure; the default welcome text stays
    app.load_settings().await;
    terminal::print_welcome(app.settings().welcome());

    let mut transcript = Transcript::default();
    let mut dialogs = TerminalDialogs::default();

    loop {
        let prompt = terminal::format_prompt(
            app.tabs().active_panel(),
            app.settings().notice().map(|n| n.text()),
        );

        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                terminal::print_info("CTRL-C detected. Type /quit to exit.");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                terminal::print_error(&e.to_string());
                continue;
            }
        };
        let _ = rl.add_history_entry(line.as_str());

        if handle(app, command, &mut transcript, &mut dialogs).await == Flow::Quit {
            break;
        }
    }

    if let Some(path) = history_file {
        if let Err(e) = rl.save_history(path) {
            tracing::warn!(error = %e, path, "Failed to save history");
        }
    }
    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

async fn handle(
    app: &mut ChatApp,
    command: ReplCommand,
    transcript: &mut Transcript,
    dialogs: &mut TerminalDialogs,
) -> Flow {
    match command {
        ReplCommand::Message(text) => {
            if app.tabs().active_panel() == Tab::Chat {
                send(app, &text, transcript).await;
            } else {
                terminal::print_info("Switch to /chat to send messages.");
            }
        }
        ReplCommand::SwitchChat => {
            app.switch_tab(Tab::Chat).await;
        }
        ReplCommand::SwitchConfig => {
            app.switch_tab(Tab::Config).await;
            terminal::print_settings(app.settings().form(), app.settings().updated_at());
        }
        ReplCommand::ToggleDebug => {
            if app.toggle_debug() {
                terminal::print_debug(&render_debug(app.debug(), app.strings()));
            } else {
                terminal::print_info("Debug panel hidden.");
            }
        }
        ReplCommand::Show => {
            terminal::print_settings(app.settings().form(), app.settings().updated_at());
        }
        ReplCommand::Set { field, value } => match app.settings_mut().set_field(field, &value) {
            Ok(()) => terminal::print_info(&format!("{field} updated; /save to apply.")),
            Err(e) => terminal::print_error(&e.to_string()),
        },
        ReplCommand::Save => {
            app.save_settings(dialogs).await;
        }
        ReplCommand::Reset => {
            app.reset_settings(dialogs).await;
        }
        ReplCommand::Status => {
            terminal::print_status(&app.status().await);
        }
        ReplCommand::Help => {
            for (usage, what) in HELP {
                println!("  {:<22} {}", usage.bright_cyan(), what);
            }
        }
        ReplCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

async fn send(app: &mut ChatApp, text: &str, transcript: &mut Transcript) {
    let Some(turn) = app.begin_send(text) else {
        return;
    };
    transcript.flush(app);

    let spinner = Spinner::start(app.strings().thinking);
    let outcome = app.complete_send(turn).await;
    spinner.stop().await;

    transcript.flush(app);
    if matches!(outcome, TurnOutcome::Answered { .. }) && app.debug().is_visible() {
        terminal::print_debug(&render_debug(app.debug(), app.strings()));
    }
}
