use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::locale::Locale;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            // Agent turns run one or two LLM calls server-side
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    pub locale: Locale,
    pub notice_seconds: u64,
    pub show_debug: bool,
    pub color: bool,
    pub history_file: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            notice_seconds: 3,
            show_debug: false,
            color: true,
            history_file: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load from an optional TOML file, then `MEDCHAT_*` environment
    /// variables (`MEDCHAT_SERVER__URL`, `MEDCHAT_UI__LOCALE`, ...).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Self::builder(path)
            .add_source(
                Environment::with_prefix("MEDCHAT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load from the file only, ignoring the environment.
    #[cfg(test)]
    fn load_file(path: &str) -> Result<Self, ConfigError> {
        Self::builder(path).build()?.try_deserialize()
    }

    fn builder(path: &str) -> config::ConfigBuilder<config::builder::DefaultState> {
        Config::builder().add_source(File::with_name(path).required(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "medchat-config-{}-{}.toml",
            name,
            std::process::id()
        ));
        let mut f = std::fs::File::create(&path).expect("create temp config");
        f.write_all(body.as_bytes()).expect("write temp config");
        path
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ClientConfig::load_file("/nonexistent/medchat-does-not-exist.toml")
            .expect("missing file is optional");

        assert_eq!(config.server.url, DEFAULT_SERVER_URL);
        assert_eq!(config.server.timeout_seconds, 120);
        assert_eq!(config.ui.notice_seconds, 3);
        assert_eq!(config.ui.locale, Locale::En);
        assert!(!config.ui.show_debug);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = write_config(
            "partial",
            r#"
[server]
url = "http://chat.internal:9000"
timeout_seconds = 30

[ui]
locale = "zh"
show_debug = true
"#,
        );

        let config = ClientConfig::load_file(path.to_str().unwrap()).expect("valid config");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.url, "http://chat.internal:9000");
        assert_eq!(config.server.timeout_seconds, 30);
        assert_eq!(config.ui.locale, Locale::Zh);
        assert!(config.ui.show_debug);
        assert_eq!(config.ui.notice_seconds, 3, "unset ui fields keep defaults");
        assert!(config.ui.color);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        let path = write_config("badlocale", "[ui]\nlocale = \"fr\"\n");
        let result = ClientConfig::load_file(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();

        assert!(result.is_err(), "Expected an error for unsupported locale");
    }

    #[test]
    fn test_environment_overrides_file() {
        let path = write_config(
            "envoverlay",
            r#"
[server]
url = "http://from-file:9000"
timeout_seconds = 30

[ui]
show_debug = false
"#,
        );

        std::env::set_var("MEDCHAT_SERVER__URL", "http://from-env:8100");
        std::env::set_var("MEDCHAT_UI__SHOW_DEBUG", "true");
        let result = ClientConfig::load(path.to_str().unwrap());
        std::env::remove_var("MEDCHAT_SERVER__URL");
        std::env::remove_var("MEDCHAT_UI__SHOW_DEBUG");
        std::fs::remove_file(&path).ok();

        let config = result.expect("valid layered config");
        assert_eq!(config.server.url, "http://from-env:8100");
        assert!(config.ui.show_debug);
        assert_eq!(config.server.timeout_seconds, 30, "file values without env override stay");
        assert_eq!(config.ui.notice_seconds, 3);
    }
}
