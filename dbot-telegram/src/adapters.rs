//! Conversion of incoming teloxide messages into transport-neutral [`dbot_core::Message`]s.

use dbot_core::{Chat, Message, MessagePayload, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        // Channel posts have no sender; the chat stands in for it.
        let user = match &msg.from {
            Some(from) => TelegramUserWrapper(from).to_core(),
            None => User {
                id: msg.chat.id.0,
                username: msg.chat.username().map(str::to_string),
                first_name: None,
                last_name: None,
            },
        };
        let chat_type = if msg.chat.is_private() { "private" } else { "group" };

        Message {
            id: msg.id.to_string(),
            user,
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: chat_type.to_string(),
            },
            payload: self.payload(),
            caption: msg.caption().map(str::to_string),
            created_at: msg.date,
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    /// Maps the message kind to a payload. Photos keep only the last (largest) size.
    fn payload(&self) -> MessagePayload {
        let msg = self.0;
        if let Some(text) = msg.text() {
            return MessagePayload::Text {
                text: text.to_string(),
            };
        }
        if let Some(voice) = msg.voice() {
            return MessagePayload::Voice {
                file_id: voice.file.id.0.clone(),
                duration_secs: voice.duration.seconds(),
            };
        }
        if let Some(largest) = msg.photo().and_then(|sizes| sizes.last()) {
            return MessagePayload::Photo {
                file_id: largest.file.id.0.clone(),
                width: largest.width,
                height: largest.height,
            };
        }
        if let Some(doc) = msg.document() {
            return MessagePayload::Document {
                file_id: doc.file.id.0.clone(),
                file_name: doc.file_name.clone(),
                mime_type: doc.mime_type.as_ref().map(|m| m.essence_str().to_string()),
            };
        }
        MessagePayload::Other
    }
}
