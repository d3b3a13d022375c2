//! Text messages: one exchange over the sender's history.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{info, instrument};

use super::{report_failure, send_reply, ConversationService, GPT_ERROR_PREFIX};

pub struct TextHandler {
    bot: Arc<dyn Bot>,
    conversation: Arc<ConversationService>,
}

impl TextHandler {
    pub fn new(bot: Arc<dyn Bot>, conversation: Arc<ConversationService>) -> Self {
        Self { bot, conversation }
    }
}

#[async_trait]
impl Handler for TextHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(text) = message.text() else {
            return Ok(HandlerResponse::Ignore);
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "step: TextHandler handling message"
        );

        match self
            .conversation
            .exchange(&message.conversation_id(), text.to_string())
            .await
        {
            Ok(reply) => send_reply(self.bot.as_ref(), message, reply).await,
            Err(e) => report_failure(self.bot.as_ref(), message, GPT_ERROR_PREFIX, &e).await,
        }
    }
}
