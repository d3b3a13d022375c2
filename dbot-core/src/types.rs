//! Transport-neutral message model and the [`Handler`] contract the chain runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Platform user id; its decimal form keys the conversation history.
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Where replies go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// `private` or `group`.
    pub chat_type: String,
}

/// What the user sent. Only the kinds the bot reacts to are distinguished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessagePayload {
    Text {
        text: String,
    },
    Voice {
        file_id: String,
        duration_secs: u32,
    },
    /// The largest available resolution of the photo.
    Photo {
        file_id: String,
        width: u32,
        height: u32,
    },
    Document {
        file_id: String,
        file_name: Option<String>,
        mime_type: Option<String>,
    },
    /// Stickers, locations, service messages, ...
    Other,
}

impl MessagePayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Voice { .. } => "voice",
            Self::Photo { .. } => "photo",
            Self::Document { .. } => "document",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub payload: MessagePayload,
    /// Caption of a media message, if any.
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// History key: the sender's id as a decimal string.
    pub fn conversation_id(&self) -> String {
        self.user.id.to_string()
    }

    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            MessagePayload::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn message_type(&self) -> &'static str {
        self.payload.kind()
    }
}

/// Outcome of one handler's `handle` step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not finished; let the next handler look at it.
    Continue,
    /// Done without a reply (e.g. a disabled feature swallowed the message).
    Stop,
    /// Not this handler's payload kind.
    Ignore,
    /// Done; carries the text that was sent back so `after` hooks can see it.
    Reply(String),
}

pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// One step of the handler chain. All three hooks default to pass-through.
#[async_trait]
pub trait Handler: Send + Sync {
    /// `false` stops the whole chain before any `handle` runs.
    async fn before(&self, _message: &Message) -> Result<bool> {
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    /// Called in reverse registration order with the chain's final response.
    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
