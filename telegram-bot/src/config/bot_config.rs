//! BotConfig: BaseConfig + LLM config + voice settings. Use load() for env-based loading.
//!
//! LLM settings (API key, models, transcription language) live in llm-client's [`EnvLlmConfig`].

use anyhow::Result;
use llm_client::EnvLlmConfig;
use std::env;

use super::BaseConfig;

/// Voice-to-text settings.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// VOICE_TO_TEXT_ENABLED; only the literal `true` enables it.
    pub enabled: bool,
    /// FFMPEG_PATH, default `ffmpeg` from PATH.
    pub ffmpeg_path: String,
}

impl VoiceConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("VOICE_TO_TEXT_ENABLED")
                .map(|v| v == "true")
                .unwrap_or(false),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
        }
    }
}

/// Bot config. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub voice: VoiceConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides TELEGRAM_BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let llm = EnvLlmConfig::from_env()?;
        let voice = VoiceConfig::from_env();
        Ok(Self { base, llm, voice })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.base.telegram.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram.api_url.as_deref()
    }
}
