//! Documents: download, extract text (PDF / DOCX / plain), keep the first 2000 characters,
//! then the same exchange as text.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerError, HandlerResponse, MediaSource, Message, MessagePayload, Result};
use media::DOCUMENT_CHAR_LIMIT;
use tracing::{debug, info, instrument};

use super::{report_failure, send_reply, ConversationService, DOCUMENT_ERROR_PREFIX};

pub struct DocumentHandler {
    bot: Arc<dyn Bot>,
    media: Arc<dyn MediaSource>,
    conversation: Arc<ConversationService>,
    temp_dir: PathBuf,
}

impl DocumentHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        media: Arc<dyn MediaSource>,
        conversation: Arc<ConversationService>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bot,
            media,
            conversation,
            temp_dir: temp_dir.into(),
        }
    }

    async fn read_document(
        &self,
        file_id: &str,
        file_name: Option<&str>,
        mime_type: Option<&str>,
    ) -> anyhow::Result<String> {
        let extension = file_name.and_then(media::extension_of);
        let path = media::temp_path(&self.temp_dir, file_id, extension)?;
        let result = self.download_and_extract(file_id, &path, mime_type).await;
        media::remove_quietly([path]);
        result
    }

    async fn download_and_extract(
        &self,
        file_id: &str,
        path: &Path,
        mime_type: Option<&str>,
    ) -> anyhow::Result<String> {
        self.media.download(file_id, path).await?;
        let text = media::extract_document_text(path, mime_type).await?;
        if text.trim().is_empty() {
            return Err(HandlerError::EmptyContent.into());
        }
        Ok(media::truncate_chars(&text, DOCUMENT_CHAR_LIMIT))
    }

    async fn read_and_reply(
        &self,
        message: &Message,
        file_id: &str,
        file_name: Option<&str>,
        mime_type: Option<&str>,
    ) -> anyhow::Result<String> {
        let text = self.read_document(file_id, file_name, mime_type).await?;
        debug!(chars = text.chars().count(), "Document text ready");
        self.conversation
            .exchange(&message.conversation_id(), text)
            .await
    }
}

#[async_trait]
impl Handler for DocumentHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessagePayload::Document {
            file_id,
            file_name,
            mime_type,
        } = &message.payload
        else {
            return Ok(HandlerResponse::Ignore);
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            file_name = file_name.as_deref().unwrap_or(""),
            mime_type = mime_type.as_deref().unwrap_or(""),
            "step: DocumentHandler handling document"
        );

        match self
            .read_and_reply(message, file_id, file_name.as_deref(), mime_type.as_deref())
            .await
        {
            Ok(reply) => send_reply(self.bot.as_ref(), message, reply).await,
            Err(e) => report_failure(self.bot.as_ref(), message, DOCUMENT_ERROR_PREFIX, &e).await,
        }
    }
}
