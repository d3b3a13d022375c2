//! Bot API connection settings.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Alternative Bot API server (e.g. a local `telegram-bot-api`); None means api.telegram.org.
    pub api_url: Option<String>,
}

impl TelegramConfig {
    /// Token precedence: `token_override`, TELEGRAM_BOT_TOKEN, BOT_TOKEN. Blank tokens count as
    /// unset. The API URL comes from TELEGRAM_API_URL or TELOXIDE_API_URL.
    pub fn from_env(token_override: Option<String>) -> Result<Self> {
        let bot_token = token_override
            .into_iter()
            .chain(env::var("TELEGRAM_BOT_TOKEN"))
            .chain(env::var("BOT_TOKEN"))
            .find(|t| !t.trim().is_empty())
            .context("TELEGRAM_BOT_TOKEN not set")?;
        let api_url = ["TELEGRAM_API_URL", "TELOXIDE_API_URL"]
            .into_iter()
            .find_map(|key| env::var(key).ok());
        Ok(Self { bot_token, api_url })
    }

    pub fn with_token(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            api_url: None,
        }
    }

    /// Parsed API URL, if one is configured.
    pub fn parsed_api_url(&self) -> Result<Option<reqwest::Url>> {
        self.api_url
            .as_deref()
            .map(|raw| {
                reqwest::Url::parse(raw)
                    .with_context(|| format!("TELEGRAM_API_URL is not a valid URL: {}", raw))
            })
            .transpose()
    }

    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(&self.bot_token);
        Ok(match self.parsed_api_url()? {
            Some(url) => bot.set_api_url(url),
            None => bot,
        })
    }
}
