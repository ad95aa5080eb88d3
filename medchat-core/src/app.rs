//! The whole client view model: conversation, debug panel, settings panel
//! and tab bar, bound to one backend.

use std::sync::Arc;
use std::time::Duration;

use crate::backend::{probe, ChatBackend, StatusReport};
use crate::config::UiConfig;
use crate::conversation::{Conversation, PendingTurn, TurnOutcome};
use crate::debug_panel::DebugPanel;
use crate::locale::{Locale, Strings};
use crate::settings_panel::{Dialogs, SettingsOutcome, SettingsPanel};
use crate::tabs::{Tab, TabBar};

pub struct ChatApp {
    backend: Arc<dyn ChatBackend>,
    conversation: Conversation,
    debug: DebugPanel,
    settings: SettingsPanel,
    tabs: TabBar,
    locale: Locale,
}

impl ChatApp {
    pub fn new(backend: Arc<dyn ChatBackend>, ui: &UiConfig) -> Self {
        Self {
            backend,
            conversation: Conversation::new(ui.locale),
            debug: DebugPanel::new(ui.show_debug),
            settings: SettingsPanel::new(ui.locale, Duration::from_secs(ui.notice_seconds)),
            tabs: TabBar::default(),
            locale: ui.locale,
        }
    }

    pub fn backend(&self) -> &dyn ChatBackend {
        self.backend.as_ref()
    }

    pub fn strings(&self) -> &'static Strings {
        self.locale.strings()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    pub fn debug(&self) -> &DebugPanel {
        &self.debug
    }

    pub fn settings(&self) -> &SettingsPanel {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsPanel {
        &mut self.settings
    }

    pub fn tabs(&self) -> &TabBar {
        &self.tabs
    }

    /// First half of a chat turn; see [`Conversation::begin_turn`].
    pub fn begin_send(&mut self, input: &str) -> Option<PendingTurn> {
        self.conversation.begin_turn(input)
    }

    /// Second half of a chat turn: wait for the backend, append the reply
    /// and forward any debug trace to the debug panel.
    pub async fn complete_send(&mut self, turn: PendingTurn) -> TurnOutcome {
        let result = self.backend.chat(turn.request()).await;
        let outcome = self.conversation.finish_turn(turn, result);
        if let TurnOutcome::Answered { debug: Some(trace) } = &outcome {
            self.debug.update(trace);
        }
        outcome
    }

    pub async fn send_message(&mut self, input: &str) -> TurnOutcome {
        match self.begin_send(input) {
            Some(turn) => self.complete_send(turn).await,
            None => TurnOutcome::Skipped,
        }
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug.toggle()
    }

    /// Switch to the tab behind `control`. The config tab always reloads.
    pub async fn switch_tab(&mut self, control: Tab) {
        self.tabs.activate(control);
        if control == Tab::Config {
            self.load_settings().await;
        }
    }

    pub async fn load_settings(&mut self) -> SettingsOutcome {
        self.settings.load(self.backend.as_ref()).await
    }

    pub async fn save_settings(&mut self, dialogs: &mut dyn Dialogs) -> SettingsOutcome {
        self.settings.save(self.backend.as_ref(), dialogs).await
    }

    pub async fn reset_settings(&mut self, dialogs: &mut dyn Dialogs) -> SettingsOutcome {
        self.settings.reset(self.backend.as_ref(), dialogs).await
    }

    pub async fn status(&self) -> StatusReport {
        probe(self.backend.as_ref()).await
    }
}
