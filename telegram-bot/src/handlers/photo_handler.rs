//! Photos: single-shot image description with the vision model. History is neither read nor written.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, MediaSource, Message, MessagePayload, Result};
use llm_client::{CompletionGateway, CompletionRequest};
use prompt::{image_request_turn, Turn, IMAGE_SYSTEM_PROMPT, IMAGE_USER_PROMPT};
use tracing::{info, instrument};

use super::{report_failure, send_reply, IMAGE_ERROR_PREFIX};

/// Token cap for image descriptions.
pub const IMAGE_MAX_TOKENS: u32 = 1000;

pub struct PhotoHandler {
    bot: Arc<dyn Bot>,
    media: Arc<dyn MediaSource>,
    gateway: Arc<dyn CompletionGateway>,
    vision_model: String,
    system: Turn,
}

impl PhotoHandler {
    /// Uses [`IMAGE_SYSTEM_PROMPT`] as the system turn.
    pub fn new(
        bot: Arc<dyn Bot>,
        media: Arc<dyn MediaSource>,
        gateway: Arc<dyn CompletionGateway>,
        vision_model: impl Into<String>,
    ) -> Self {
        Self::with_system_turn(
            bot,
            media,
            gateway,
            vision_model,
            Turn::system(IMAGE_SYSTEM_PROMPT),
        )
    }

    pub fn with_system_turn(
        bot: Arc<dyn Bot>,
        media: Arc<dyn MediaSource>,
        gateway: Arc<dyn CompletionGateway>,
        vision_model: impl Into<String>,
        system: Turn,
    ) -> Self {
        Self {
            bot,
            media,
            gateway,
            vision_model: vision_model.into(),
            system,
        }
    }

    async fn describe(&self, file_id: &str, caption: Option<&str>) -> anyhow::Result<String> {
        let url = self.media.file_url(file_id).await?;
        // A caption replaces the default instruction.
        let instruction = caption
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(IMAGE_USER_PROMPT);
        let request = CompletionRequest::new(vec![image_request_turn(instruction, &url)])
            .with_system(self.system.clone())
            .with_model(self.vision_model.clone())
            .with_max_tokens(IMAGE_MAX_TOKENS);
        self.gateway.complete(request).await
    }
}

#[async_trait]
impl Handler for PhotoHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessagePayload::Photo { file_id, width, height } = &message.payload else {
            return Ok(HandlerResponse::Ignore);
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            width = *width,
            height = *height,
            "step: PhotoHandler describing photo"
        );

        match self.describe(file_id, message.caption.as_deref()).await {
            Ok(reply) => send_reply(self.bot.as_ref(), message, reply).await,
            Err(e) => report_failure(self.bot.as_ref(), message, IMAGE_ERROR_PREFIX, &e).await,
        }
    }
}
