//! Per-kind event handlers: text, voice, photo, document. Each handles its own payload kind and
//! ignores the others, so they can be chained in any order.

mod conversation;
mod document_handler;
mod photo_handler;
mod text_handler;
mod voice_handler;

pub use conversation::ConversationService;
pub use document_handler::DocumentHandler;
pub use photo_handler::{PhotoHandler, IMAGE_MAX_TOKENS};
pub use text_handler::TextHandler;
pub use voice_handler::VoiceHandler;

use dbot_core::{Bot, HandlerResponse, Message, Result};
use tracing::error;

pub const GPT_ERROR_PREFIX: &str = "GPT error: ";
pub const VOICE_ERROR_PREFIX: &str = "Voice error: ";
pub const IMAGE_ERROR_PREFIX: &str = "Image error: ";
pub const DOCUMENT_ERROR_PREFIX: &str = "Document error: ";

/// Sends `reply` to the message's chat and ends the handle phase with it.
async fn send_reply(bot: &dyn Bot, message: &Message, reply: String) -> Result<HandlerResponse> {
    bot.reply_to(message, &reply).await?;
    Ok(HandlerResponse::Reply(reply))
}

/// Logs a per-event failure and tells the sender about it.
async fn report_failure(
    bot: &dyn Bot,
    message: &Message,
    prefix: &str,
    err: &anyhow::Error,
) -> Result<HandlerResponse> {
    error!(
        error = %err,
        user_id = message.user.id,
        message_type = message.message_type(),
        "Failed to handle message"
    );
    send_reply(bot, message, format!("{}{}", prefix, err)).await
}
