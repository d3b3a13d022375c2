//! Voice notes: download → ffmpeg to 16 kHz mono wav → transcribe → same exchange as text.
//! Disabled voice transcription swallows the message without a reply.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerError, HandlerResponse, MediaSource, Message, MessagePayload, Result};
use llm_client::Transcriber;
use tracing::{debug, info, instrument};

use super::{report_failure, send_reply, ConversationService, VOICE_ERROR_PREFIX};

pub struct VoiceHandler {
    bot: Arc<dyn Bot>,
    media: Arc<dyn MediaSource>,
    transcriber: Arc<dyn Transcriber>,
    conversation: Arc<ConversationService>,
    enabled: bool,
    language: String,
    temp_dir: PathBuf,
    ffmpeg: String,
}

impl VoiceHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        media: Arc<dyn MediaSource>,
        transcriber: Arc<dyn Transcriber>,
        conversation: Arc<ConversationService>,
        enabled: bool,
        language: impl Into<String>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bot,
            media,
            transcriber,
            conversation,
            enabled,
            language: language.into(),
            temp_dir: temp_dir.into(),
            ffmpeg: "ffmpeg".to_string(),
        }
    }

    /// Uses a specific ffmpeg binary instead of the one on PATH.
    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<String>) -> Self {
        self.ffmpeg = ffmpeg.into();
        self
    }

    async fn transcribe_voice(&self, file_id: &str) -> anyhow::Result<String> {
        let ogg = media::temp_path(&self.temp_dir, file_id, Some("ogg"))?;
        let wav = media::temp_path(&self.temp_dir, file_id, Some("wav"))?;
        let result = self.download_and_transcribe(file_id, &ogg, &wav).await;
        media::remove_quietly([ogg, wav]);
        result
    }

    async fn download_and_transcribe(
        &self,
        file_id: &str,
        ogg: &Path,
        wav: &Path,
    ) -> anyhow::Result<String> {
        self.media.download(file_id, ogg).await?;
        media::transcode_with(&self.ffmpeg, ogg, wav).await?;
        let text = self.transcriber.transcribe(wav, &self.language).await?;
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(HandlerError::EmptyContent.into());
        }
        Ok(text)
    }

    async fn transcribe_and_reply(&self, message: &Message, file_id: &str) -> anyhow::Result<String> {
        let text = self.transcribe_voice(file_id).await?;
        debug!(user_id = message.user.id, chars = text.chars().count(), "Voice transcribed");
        self.conversation
            .exchange(&message.conversation_id(), text)
            .await
    }
}

#[async_trait]
impl Handler for VoiceHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessagePayload::Voice { file_id, duration_secs } = &message.payload else {
            return Ok(HandlerResponse::Ignore);
        };

        if !self.enabled {
            debug!(user_id = message.user.id, "Voice-to-text disabled, ignoring voice message");
            return Ok(HandlerResponse::Stop);
        }

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            duration_secs = *duration_secs,
            "step: VoiceHandler handling voice message"
        );

        match self.transcribe_and_reply(message, file_id).await {
            Ok(reply) => send_reply(self.bot.as_ref(), message, reply).await,
            Err(e) => report_failure(self.bot.as_ref(), message, VOICE_ERROR_PREFIX, &e).await,
        }
    }
}
