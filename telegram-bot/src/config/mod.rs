//! Bot configuration: BaseConfig (Telegram + log + history + temp files) + LLM and voice settings.

mod base;
mod bot_config;


pub use base::BaseConfig;
pub use bot_config::{BotConfig, VoiceConfig};
