//! Terminal output: transcript fragments, the debug panel, alerts,
//! confirmation prompts and the busy spinner.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use chrono::Local;
use colored::Colorize;
use medchat_core::models::{AgentSettings, Role, SettingsField};
use medchat_core::sanitize::sanitize;
use medchat_core::{Dialogs, MessageFragment, SourceItem, StatusReport, Strings, Tab};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub fn format_source(item: &SourceItem) -> String {
    match item {
        SourceItem::Link { number, url, label } if label == url => format!("{number}. <{url}>"),
        SourceItem::Link { number, url, label } => format!("{number}. {label} <{url}>"),
        SourceItem::Text { number, text } => format!("{number}. {text}"),
    }
}

/// Prompt text: active tab, plus the transient notice while it is visible.
pub fn format_prompt(tab: Tab, notice: Option<&str>) -> String {
    match notice {
        Some(text) => format!("[{} | {}] > ", tab.label(), text),
        None => format!("[{}] > ", tab.label()),
    }
}

pub fn print_welcome(text: &str) {
    println!("{}", "=== medchat ===".bright_magenta().bold());
    for line in sanitize(text).lines() {
        println!("{}", line.bright_blue());
    }
    println!("{}", "Type /help for commands.".bright_black());
    println!();
}

pub fn print_fragment(fragment: &MessageFragment, strings: &Strings) {
    if fragment.role == Role::User {
        println!("{}", format!("> {}", fragment.body).green());
        return;
    }

    let time = fragment.received_at.with_timezone(&Local).format("%H:%M");
    match &fragment.agent_label {
        Some(agent) => println!("{} {}", format!("[{agent}]").bright_magenta(), time.to_string().bright_black()),
        None => println!("{}", time.to_string().bright_black()),
    }

    for line in fragment.body.lines() {
        if fragment.failure {
            println!("{}", line.red());
        } else {
            println!("{}", line.bright_blue());
        }
    }

    if let Some(confidence) = fragment.confidence {
        println!("{}", format!("confidence {:.0}%", confidence * 100.0).bright_black());
    }

    if !fragment.sources.is_empty() {
        println!("{}", strings.sources_heading.yellow());
        for item in &fragment.sources {
            println!("  {}", format_source(item).yellow());
        }
    }
    println!();
}

pub fn print_debug(lines: &[String]) {
    println!("{}", "--- debug ---".bright_black());
    for line in lines {
        println!("{}", line.cyan());
    }
    println!("{}", "-------------".bright_black());
}

pub fn print_settings(form: &AgentSettings, updated_at: Option<&str>) {
    for field in SettingsField::ALL {
        println!("{}", format!("{field}:").bold());
        let value = form.get(field);
        if value.is_empty() {
            println!("  {}", "(empty)".bright_black());
        }
        for line in sanitize(&value).lines() {
            println!("  {line}");
        }
    }
    if let Some(ts) = updated_at {
        print_info(&format!("updated at {}", sanitize(ts)));
    }
}

pub fn print_status(report: &StatusReport) {
    println!("Server:   {}", report.server);
    match &report.health {
        Ok(health) => {
            let status = sanitize(&health.status);
            if report.is_healthy() {
                println!("Health:   {}", status.green());
            } else {
                println!("Health:   {}", status.yellow());
            }
            if let Some(message) = &health.message {
                println!("          {}", sanitize(message));
            }
        }
        Err(e) => println!(
            "Health:   {}",
            format!("unreachable ({})", sanitize(&e.to_string())).red()
        ),
    }
    match &report.agents {
        Ok(roster) => {
            println!("Sessions: {}", roster.current_sessions);
            println!("Agents:");
            for (name, description) in &roster.agents {
                println!("  {} {}", sanitize(name).bright_magenta(), sanitize(description));
            }
        }
        Err(e) => println!(
            "Agents:   {}",
            format!("unavailable ({})", sanitize(&e.to_string())).red()
        ),
    }
}

pub fn print_info(text: &str) {
    println!("{}", text.bright_black());
}

pub fn print_error(text: &str) {
    eprintln!("{}", text.red());
}

/// Lines of an alert block, with any escape sequence stripped.
fn alert_lines(message: &str) -> Vec<String> {
    sanitize(message).lines().map(|line| format!(" ! {line} ")).collect()
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// `Dialogs` on the terminal: alerts are highlighted blocks on stderr,
/// confirmations are y/N questions read from stdin.
#[derive(Debug, Default)]
pub struct TerminalDialogs {
    assume_yes: bool,
}

impl TerminalDialogs {
    /// Dialogs that answer every confirmation with yes (`--yes`).
    pub fn assume_yes() -> Self {
        Self { assume_yes: true }
    }
}

impl Dialogs for TerminalDialogs {
    fn alert(&mut self, message: &str) {
        eprintln!();
        for line in alert_lines(message) {
            eprintln!("{}", line.white().on_red().bold());
        }
        eprintln!();
    }

    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} {} ", question.bright_yellow(), "[y/N]".bright_black());
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

/// Busy indicator drawn on stderr while a chat turn is pending.
pub struct Spinner {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Spinner {
    pub fn start(label: &'static str) -> Self {
        let token = CancellationToken::new();
        let child = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(120));
            let mut frame = 0usize;
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        eprint!("\r{} {}", SPINNER_FRAMES[frame % SPINNER_FRAMES.len()], label.bright_black());
                        let _ = io::stderr().flush();
                        frame += 1;
                    }
                }
            }
            // Clear the spinner line
            eprint!("\r{}\r", " ".repeat(label.chars().count() * 2 + 4));
            let _ = io::stderr().flush();
        });

        Self { token, handle }
    }

    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.handle.await {
            tracing::debug!(error = %e, "Spinner task ended abnormally");
        }
    }
}
