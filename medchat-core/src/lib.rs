pub mod app;
pub mod backend;
pub mod config;
pub mod conversation;
pub mod debug_panel;
pub mod error;
pub mod locale;
pub mod models;
pub mod render;
pub mod sanitize;
pub mod settings_panel;
pub mod tabs;

pub use app::ChatApp;
pub use backend::{probe, ChatBackend, HttpBackend, StatusReport};
pub use config::ClientConfig;
pub use conversation::{Conversation, PendingTurn, TurnOutcome};
pub use debug_panel::{CallList, DebugPanel};
pub use error::ClientError;
pub use locale::{Locale, Strings};
pub use render::{render_debug, render_message, MessageFragment, SourceItem};
pub use settings_panel::{Dialogs, Notice, SettingsOutcome, SettingsPanel};
pub use tabs::{Tab, TabBar, TabControl};
