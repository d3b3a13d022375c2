//! Wraps teloxide::Bot and implements [`dbot_core::Bot`] and [`dbot_core::MediaSource`]. Production code sends messages and fetches files via Telegram; tests can substitute other impls.

use std::path::Path;

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Chat, DbotError, MediaSource, Result};
use teloxide::net::Download;
use tokio::io::AsyncWriteExt;
use teloxide::{prelude::*, types::ChatId, types::FileId};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot and MediaSource traits.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    async fn file_path(&self, file_id: &str) -> Result<String> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(file.path)
    }
}

/// Download URL of a file on the Bot API file endpoint: `<api>/file/bot<token>/<path>`.
pub fn file_download_url(api_url: &str, token: &str, file_path: &str) -> String {
    format!(
        "{}/file/bot{}/{}",
        api_url.trim_end_matches('/'),
        token,
        file_path.trim_start_matches('/')
    )
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl MediaSource for TelegramBotAdapter {
    async fn file_url(&self, file_id: &str) -> Result<String> {
        let path = self.file_path(file_id).await?;
        Ok(file_download_url(
            self.bot.api_url().as_str(),
            self.bot.token(),
            &path,
        ))
    }

    async fn download(&self, file_id: &str, dest: &Path) -> Result<()> {
        let path = self.file_path(file_id).await?;
        let mut file = tokio::fs::File::create(dest).await?;
        self.bot
            .download_file(&path, &mut file)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        // download_file only writes; the last chunk may still be in flight until flushed.
        file.flush().await?;
        debug!(file_id = %file_id, dest = %dest.display(), "File downloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_download_url_default_api() {
        let url = file_download_url("https://api.telegram.org/", "123:abc", "photos/file_1.jpg");
        assert_eq!(
            url,
            "https://api.telegram.org/file/bot123:abc/photos/file_1.jpg"
        );
    }

    #[test]
    fn test_file_download_url_custom_api() {
        let url = file_download_url("http://localhost:8081", "t", "/voice/v.oga");
        assert_eq!(url, "http://localhost:8081/file/bott/voice/v.oga");
    }
}
