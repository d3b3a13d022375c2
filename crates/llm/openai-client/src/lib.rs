//! # OpenAI API client
//!
//! The two calls the bot makes against an OpenAI-compatible endpoint: chat completion and
//! Whisper transcription. Built on [async-openai] with its rate-limit backoff turned off, so every
//! call is a single attempt and failures reach the caller as they happen.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    AudioInput, AudioResponseFormat, CreateChatCompletionRequestArgs,
    CreateTranscriptionRequestArgs,
};
use async_openai::Client;
use tracing::{debug, info};

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};

pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Key shown in logs as `sk-proj***abcd`. Keys of 11 bytes or less, or whose cut points fall
/// inside a multibyte character, become `***`.
pub fn mask_token(token: &str) -> String {
    let (head, tail) = (7, token.len().saturating_sub(4));
    let safe = token.len() > 11 && token.is_char_boundary(head) && token.is_char_boundary(tail);
    if safe {
        format!("{}***{}", &token[..head], &token[tail..])
    } else {
        "***".to_string()
    }
}

fn single_attempt() -> backoff::ExponentialBackoff {
    backoff::ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

#[derive(Clone)]
pub struct OpenAIClient {
    inner: Arc<Client<OpenAIConfig>>,
    masked_key: String,
}

impl OpenAIClient {
    /// Client for the public OpenAI endpoint.
    pub fn new(api_key: String) -> Self {
        Self::build(api_key, None)
    }

    /// Client for a proxy or any OpenAI-compatible server at `base_url`.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::build(api_key, Some(base_url))
    }

    fn build(api_key: String, base_url: Option<String>) -> Self {
        let masked_key = mask_token(&api_key);
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url {
            config = config.with_api_base(url);
        }
        Self {
            inner: Arc::new(Client::with_config(config).with_backoff(single_attempt())),
            masked_key,
        }
    }

    /// Text of the first choice. A response without choices, or whose first choice has no
    /// (or only blank) content, is an error.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        max_tokens: Option<u32>,
    ) -> anyhow::Result<String> {
        info!(
            model = %model,
            messages = messages.len(),
            max_tokens = ?max_tokens,
            api_key = %self.masked_key,
            "Sending chat completion"
        );

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(model).messages(messages);
        if let Some(limit) = max_tokens {
            #[allow(deprecated)]
            builder.max_tokens(limit);
        }
        let request = builder.build()?;
        if let Ok(body) = serde_json::to_string(&request) {
            debug!(body = %body, "Chat completion body");
        }

        let response = self.inner.chat().create(request).await?;
        if let Some(usage) = &response.usage {
            info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No response from OpenAI"))?;
        let content = choice.message.content.unwrap_or_default();
        if content.trim().is_empty() {
            anyhow::bail!("OpenAI returned an empty reply");
        }
        Ok(content)
    }

    /// Whisper transcript of `audio_path` as plain text.
    pub async fn transcribe(&self, audio_path: &Path, language: &str) -> anyhow::Result<String> {
        info!(
            file = %audio_path.display(),
            language = %language,
            api_key = %self.masked_key,
            "Sending transcription"
        );

        let request = CreateTranscriptionRequestArgs::default()
            .file(AudioInput::from(audio_path))
            .model(TRANSCRIPTION_MODEL)
            .language(language)
            .response_format(AudioResponseFormat::Text)
            .build()?;
        let raw = self.inner.audio().transcribe_raw(request).await?;

        let text = String::from_utf8_lossy(&raw).into_owned();
        debug!(chars = text.chars().count(), "Transcription received");
        Ok(text)
    }
}
