//! medchat: terminal client for the agent-routing chat service.
//!
//! # Subcommands
//! - `chat` (default): interactive session with chat and config tabs
//! - `ask <query> [--session ID] [--json]`: one chat turn
//! - `config show|set|reset`: inspect or edit the agent settings
//! - `status`: server health and agent roster

mod commands;
mod repl;
mod terminal;

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use medchat_core::models::{ChatRequest, SettingsField};
use medchat_core::sanitize::sanitize;
use medchat_core::{
    render_message, ChatApp, ChatBackend, ClientConfig, HttpBackend, SettingsOutcome, TurnOutcome,
};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

use crate::terminal::TerminalDialogs;

const DEFAULT_CONFIG: &str = "medchat.toml";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "medchat", version, about = "Terminal client for the agent-routing chat service")]
struct Cli {
    /// Chat server URL (overrides MEDCHAT_SERVER_URL and the config file)
    #[arg(long, env = "MEDCHAT_SERVER_URL")]
    server: Option<String>,

    /// Path to the TOML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive chat session (default)
    Chat,

    /// Send one message and print the reply
    Ask {
        /// Message text
        query: String,

        /// Continue an existing session
        #[arg(long)]
        session: Option<String>,

        /// Print the raw reply as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or edit the agent settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show server health and registered agents
    Status,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Change one field and save
    Set {
        /// Field name, e.g. welcome_message or rag_enabled
        field: String,
        value: String,
    },

    /// Reset settings to the server defaults
    Reset {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

// ============================================================================
// Commands
// ============================================================================

async fn do_ask(app: &mut ChatApp, query: &str, session: Option<String>, json: bool) -> Result<i32> {
    if json {
        let query = query.trim();
        if query.is_empty() {
            bail!("nothing to send");
        }
        let request = ChatRequest {
            query: query.to_string(),
            session_id: session,
        };
        let reply = app.backend().chat(&request).await?;
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(0);
    }

    if let Some(id) = session {
        app.conversation_mut().set_session_id(id);
    }

    match app.send_message(query).await {
        TurnOutcome::Skipped => bail!("nothing to send"),
        TurnOutcome::Failed(message) => Err(anyhow!(sanitize(&message).into_owned())),
        TurnOutcome::Answered { .. } => {
            if let Some(reply) = app.conversation().messages().last() {
                terminal::print_fragment(&render_message(reply), app.strings());
            }
            if let Some(id) = app.conversation().session_id() {
                terminal::print_info(&format!("session {}", sanitize(id)));
            }
            Ok(0)
        }
    }
}

async fn load_or_fail(app: &mut ChatApp) -> Result<()> {
    match app.load_settings().await {
        SettingsOutcome::Applied => Ok(()),
        SettingsOutcome::Rejected(message) | SettingsOutcome::Failed(message) => {
            bail!("could not load settings: {message}")
        }
        SettingsOutcome::Cancelled => Ok(()),
    }
}

/// Exit status for a settings operation whose failure was already shown
/// through an alert.
fn exit_status(app: &ChatApp, outcome: SettingsOutcome) -> i32 {
    match outcome {
        SettingsOutcome::Applied => {
            if let Some(notice) = app.settings().notice() {
                terminal::print_info(notice.text());
            }
            0
        }
        SettingsOutcome::Cancelled => 0,
        SettingsOutcome::Rejected(_) | SettingsOutcome::Failed(_) => 1,
    }
}

async fn do_config(app: &mut ChatApp, action: ConfigAction) -> Result<i32> {
    match action {
        ConfigAction::Show { json } => {
            load_or_fail(app).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(app.settings().form())?);
            } else {
                terminal::print_settings(app.settings().form(), app.settings().updated_at());
            }
            Ok(0)
        }
        ConfigAction::Set { field, value } => {
            let field: SettingsField = field.parse()?;
            load_or_fail(app).await?;
            app.settings_mut().set_field(field, &value)?;
            let outcome = app.save_settings(&mut TerminalDialogs::default()).await;
            Ok(exit_status(app, outcome))
        }
        ConfigAction::Reset { yes } => {
            let mut dialogs = if yes {
                TerminalDialogs::assume_yes()
            } else {
                TerminalDialogs::default()
            };
            let outcome = app.reset_settings(&mut dialogs).await;
            Ok(exit_status(app, outcome))
        }
    }
}

async fn do_status(app: &ChatApp) -> Result<i32> {
    let report = app.status().await;
    terminal::print_status(&report);
    Ok(if report.is_healthy() { 0 } else { 1 })
}

// ============================================================================
// Main
// ============================================================================

fn init_tracing(level: &str) {
    let directive: Directive = level
        .parse()
        .unwrap_or_else(|_| tracing::Level::WARN.into());

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

async fn run(cli: Cli, mut config: ClientConfig) -> Result<i32> {
    if let Some(server) = cli.server {
        config.server.url = server.trim_end_matches('/').to_string();
    }
    if !config.ui.color {
        colored::control::set_override(false);
    }

    let backend = HttpBackend::new(&config.server)
        .with_context(|| format!("invalid server URL {}", config.server.url))?;
    tracing::debug!(server = %backend.base_url(), "Using chat server");
    let mut app = ChatApp::new(Arc::new(backend), &config.ui);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            repl::run(&mut app, config.ui.history_file.as_deref()).await?;
            Ok(0)
        }
        Commands::Ask { query, session, json } => do_ask(&mut app, &query, session, json).await,
        Commands::Config { action } => do_config(&mut app, action).await,
        Commands::Status => do_status(&app).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match ClientConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("medchat: failed to load config from {}: {}", cli.config, e);
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging.level);

    match run(cli, config).await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("medchat: {}", sanitize(&format!("{e:#}")));
            std::process::exit(1);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
