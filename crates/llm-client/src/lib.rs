//! # LLM client abstraction
//!
//! Defines the [`CompletionGateway`] and [`Transcriber`] traits and an OpenAI implementation.
//! Transport-agnostic; used by the bot's event handlers, which only see [`prompt::Turn`]s.
//!
//! Each call is a single stateless request/response exchange; errors propagate to the caller.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};
use prompt::{ContentPart, Role, Turn, TurnContent};
use std::path::Path;

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, DEFAULT_CHAT_MODEL, DEFAULT_LANGUAGE, DEFAULT_VISION_MODEL};
pub use openai_llm::OpenAILlmClient;

/// One completion request: optional fixed system turn, the ordered turns, and per-call overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    /// Model override; None uses the gateway's default chat model.
    pub model: Option<String>,
    /// Sent before `turns` when present.
    pub system: Option<Turn>,
    pub turns: Vec<Turn>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(turns: Vec<Turn>) -> Self {
        Self {
            turns,
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_system(mut self, system: Turn) -> Self {
        self.system = Some(system);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// All turns in send order (system first).
    pub fn messages(&self) -> impl Iterator<Item = &Turn> {
        self.system.iter().chain(self.turns.iter())
    }
}

/// Remote model that turns an ordered list of turns into one reply.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Returns the first reply's text content.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Speech-to-text for voice messages.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String>;
}

fn part_to_openai(part: &ContentPart) -> Result<ChatCompletionRequestUserMessageContentPart> {
    let openai_part: ChatCompletionRequestUserMessageContentPart = match part {
        ContentPart::Text { text } => ChatCompletionRequestMessageContentPartTextArgs::default()
            .text(text.clone())
            .build()?
            .into(),
        ContentPart::ImageUrl { image_url } => {
            ChatCompletionRequestMessageContentPartImageArgs::default()
                .image_url(ImageUrlArgs::default().url(image_url.url.clone()).build()?)
                .build()?
                .into()
        }
    };
    Ok(openai_part)
}

/// Converts a single [`Turn`] into OpenAI API message format.
///
/// Only user turns may carry images; system and assistant parts are flattened to text.
fn turn_to_openai(turn: &Turn) -> Result<ChatCompletionRequestMessage> {
    let openai_msg: ChatCompletionRequestMessage = match turn.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(turn.content.text_lossy())
            .build()?
            .into(),
        Role::User => match &turn.content {
            TurnContent::Text(text) => ChatCompletionRequestUserMessageArgs::default()
                .content(text.clone())
                .build()?
                .into(),
            TurnContent::Parts(parts) => {
                let parts = parts
                    .iter()
                    .map(part_to_openai)
                    .collect::<Result<Vec<_>>>()?;
                ChatCompletionRequestUserMessageArgs::default()
                    .content(parts)
                    .build()?
                    .into()
            }
        },
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(turn.content.text_lossy())
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
