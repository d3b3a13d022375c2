//! Transport abstractions: sending text and fetching files.
//!
//! [`Bot`] and [`MediaSource`] are transport-agnostic; dbot-telegram implements both via teloxide.
//! Handlers hold them as `Arc<dyn ...>` so tests can substitute recording mocks.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;
use std::path::Path;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}

/// Access to files attached to platform messages.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Public download URL for the file (used for image requests).
    async fn file_url(&self, file_id: &str) -> Result<String>;
    /// Downloads the file to `dest`, creating or truncating it.
    async fn download(&self, file_id: &str, dest: &Path) -> Result<()>;
}
