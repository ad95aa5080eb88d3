//! Settings form backed by the `/config` endpoints.

use std::time::{Duration, Instant};

use crate::backend::ChatBackend;
use crate::locale::{Locale, Strings};
use crate::models::{AgentSettings, SettingsField, SettingsFieldError};
use crate::sanitize::sanitize;

/// Blocking interactions the settings panel needs from the front end.
/// Alert text arrives with server-sourced parts already sanitized.
pub trait Dialogs {
    /// Show a message the user must acknowledge.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question. Anything other than an explicit yes declines.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Transient success banner with a fixed deadline.
#[derive(Debug, Clone)]
pub struct Notice {
    text: String,
    deadline: Instant,
}

impl Notice {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.deadline
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsOutcome {
    Applied,
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// The server answered `success: false`.
    Rejected(String),
    /// Transport, status or decode failure.
    Failed(String),
}

#[derive(Debug)]
pub struct SettingsPanel {
    form: AgentSettings,
    updated_at: Option<String>,
    welcome: String,
    notice: Option<Notice>,
    notice_ttl: Duration,
    strings: &'static Strings,
}

impl SettingsPanel {
    pub fn new(locale: Locale, notice_ttl: Duration) -> Self {
        let strings = locale.strings();
        Self {
            form: AgentSettings::default(),
            updated_at: None,
            welcome: strings.welcome.to_string(),
            notice: None,
            notice_ttl,
            strings,
        }
    }

    pub fn form(&self) -> &AgentSettings {
        &self.form
    }

    /// Server-side timestamp of the loaded settings, if it sent one.
    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    /// Text of the welcome banner shown above the chat.
    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    pub fn set_field(&mut self, field: SettingsField, value: &str) -> Result<(), SettingsFieldError> {
        self.form.set(field, value)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice_at(Instant::now())
    }

    pub fn notice_at(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_visible_at(now))
    }

    fn show_notice(&mut self, text: &str) {
        self.notice = Some(Notice {
            text: text.to_string(),
            deadline: Instant::now() + self.notice_ttl,
        });
    }

    fn refresh_welcome(&mut self, text: &str) {
        if !text.is_empty() {
            self.welcome = text.to_string();
        }
    }

    /// Populate the form from `GET /config`. Failures are logged, never
    /// shown to the user.
    pub async fn load(&mut self, backend: &dyn ChatBackend) -> SettingsOutcome {
        let envelope = match backend.fetch_settings().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load settings");
                return SettingsOutcome::Failed(sanitize(&e.to_string()).into_owned());
            }
        };

        match envelope.config {
            Some(snapshot) if envelope.success => {
                self.updated_at = snapshot.updated_at.clone();
                self.form = snapshot.into_settings();
                let welcome = self.form.welcome_message.clone();
                self.refresh_welcome(&welcome);
                SettingsOutcome::Applied
            }
            _ => {
                let message = sanitize(&envelope.message.unwrap_or_default()).into_owned();
                tracing::warn!(message = %message, "Settings endpoint returned no config");
                SettingsOutcome::Rejected(message)
            }
        }
    }

    /// Post the whole form to `POST /config`.
    pub async fn save(
        &mut self,
        backend: &dyn ChatBackend,
        dialogs: &mut dyn Dialogs,
    ) -> SettingsOutcome {
        let settings = self.form.clone();

        match backend.save_settings(&settings).await {
            Ok(ack) if ack.success => {
                self.show_notice(self.strings.save_ok);
                self.refresh_welcome(&settings.welcome_message);
                SettingsOutcome::Applied
            }
            Ok(ack) => {
                let message = sanitize(&ack.message.unwrap_or_default()).into_owned();
                dialogs.alert(&format!("{}{}", self.strings.save_rejected, message));
                SettingsOutcome::Rejected(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save settings");
                let message = sanitize(&e.to_string()).into_owned();
                dialogs.alert(&format!("{}{}", self.strings.save_failed, message));
                SettingsOutcome::Failed(message)
            }
        }
    }

    /// Ask for confirmation, then `POST /config/reset` and reload the form.
    pub async fn reset(
        &mut self,
        backend: &dyn ChatBackend,
        dialogs: &mut dyn Dialogs,
    ) -> SettingsOutcome {
        if !dialogs.confirm(self.strings.reset_confirm) {
            return SettingsOutcome::Cancelled;
        }

        match backend.reset_settings().await {
            Ok(ack) if ack.success => {
                self.show_notice(self.strings.reset_ok);
                self.load(backend).await;
                SettingsOutcome::Applied
            }
            Ok(ack) => {
                let message = sanitize(&ack.message.unwrap_or_default()).into_owned();
                dialogs.alert(&format!("{}{}", self.strings.reset_rejected, message));
                SettingsOutcome::Rejected(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reset settings");
                let message = sanitize(&e.to_string()).into_owned();
                dialogs.alert(&format!("{}{}", self.strings.reset_failed, message));
                SettingsOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires_at_deadline() {
        let mut panel = SettingsPanel::new(Locale::En, Duration::from_secs(3));
        assert!(panel.notice().is_none());

        panel.show_notice("Settings saved!");
        let shown = Instant::now();

        let visible = panel.notice_at(shown).expect("visible right away");
        assert_eq!(visible.text(), "Settings saved!");
        assert!(panel.notice_at(shown + Duration::from_secs(4)).is_none());
    }

    #[test]
    fn test_welcome_starts_with_locale_default() {
        let panel = SettingsPanel::new(Locale::Zh, Duration::from_secs(3));
        assert_eq!(panel.welcome(), Locale::Zh.strings().welcome);
    }

    #[test]
    fn test_empty_welcome_does_not_replace_banner() {
        let mut panel = SettingsPanel::new(Locale::En, Duration::from_secs(3));
        panel.refresh_welcome("");
        assert_eq!(panel.welcome(), Locale::En.strings().welcome);
        panel.refresh_welcome("Welcome to the clinic");
        assert_eq!(panel.welcome(), "Welcome to the clinic");
    }

    #[test]
    fn test_set_field_edits_form() {
        let mut panel = SettingsPanel::new(Locale::En, Duration::from_secs(3));
        panel.set_field(SettingsField::RagPrompt, "Use {context}").unwrap();
        assert_eq!(panel.form().rag_prompt, "Use {context}");
        assert!(panel.set_field(SettingsField::RagEnabled, "sometimes").is_err());
    }
}
