//! LLM configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Default chat model for text, voice and document conversations.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
/// Default model for image requests.
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";
/// Default transcription language.
pub const DEFAULT_LANGUAGE: &str = "ru";

/// LLM config for an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    /// None means the async-openai default (`https://api.openai.com/v1`).
    pub openai_base_url: Option<String>,
    pub chat_model: String,
    pub vision_model: String,
    pub transcription_language: String,
}

impl EnvLlmConfig {
    /// Load from environment variables. `OPENAI_API_KEY` is required.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let chat_model = env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let vision_model =
            env::var("GPT_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string());
        let transcription_language =
            env::var("LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            chat_model,
            vision_model,
            transcription_language,
        })
    }
}
