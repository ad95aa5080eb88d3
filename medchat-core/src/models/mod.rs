pub mod debug;
pub mod message;
pub mod settings;
pub mod wire;

pub use debug::{DebugTrace, LlmCall};
pub use message::{Message, Role, Source};
pub use settings::{AgentSettings, SettingsField, SettingsFieldError, SettingsSnapshot};
pub use wire::{Ack, AgentRoster, ChatReply, ChatRequest, HealthStatus, SettingsEnvelope};
