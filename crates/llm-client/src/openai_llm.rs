//! OpenAI implementation of [`CompletionGateway`] and [`Transcriber`] on top of openai-client.

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use tracing::instrument;

use super::config::{EnvLlmConfig, DEFAULT_CHAT_MODEL};
use super::{turn_to_openai, CompletionGateway, CompletionRequest, Transcriber};

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    /// Builds the client from env config: base URL when set, chat model as default model.
    pub fn from_config(config: &EnvLlmConfig) -> Self {
        let client = match &config.openai_base_url {
            Some(url) => Self::with_base_url(config.openai_api_key.clone(), url.clone()),
            None => Self::new(config.openai_api_key.clone()),
        };
        client.with_model(config.chat_model.clone())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

#[async_trait]
impl CompletionGateway for OpenAILlmClient {
    #[instrument(skip(self, request), fields(turns = request.turns.len()))]
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let messages = request
            .messages()
            .map(turn_to_openai)
            .collect::<Result<Vec<_>>>()?;
        let model = request.model.as_deref().unwrap_or(&self.model);
        self.client
            .chat_completion(model, messages, request.max_tokens)
            .await
    }
}

#[async_trait]
impl Transcriber for OpenAILlmClient {
    #[instrument(skip(self))]
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String> {
        self.client.transcribe(audio_path, language).await
    }
}
