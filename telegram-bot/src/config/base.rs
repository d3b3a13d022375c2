//! Process-level settings: Telegram connection, log file, history file and staging directory.

use anyhow::{bail, Result};
use dbot_telegram::TelegramConfig;
use std::env;
use std::path::PathBuf;
use storage::MAX_TURNS;

pub const DEFAULT_LOG_FILE: &str = "logs/telegram-bot.log";
pub const DEFAULT_HISTORY_PATH: &str = "history.json";

#[derive(Debug, Clone)]
pub struct BaseConfig {
    pub telegram: TelegramConfig,
    /// LOG_FILE
    pub log_file: String,
    /// HISTORY_PATH; one JSON document for all conversations.
    pub history_path: PathBuf,
    /// HISTORY_MAX_TURNS
    pub history_max_turns: usize,
    /// TEMP_DIR; downloaded voice notes and documents are staged here.
    pub temp_dir: PathBuf,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl BaseConfig {
    pub fn load(token: Option<String>) -> Result<Self> {
        let history_max_turns = match env::var("HISTORY_MAX_TURNS") {
            Ok(raw) => match raw.trim().parse() {
                Ok(n) => n,
                Err(_) => bail!("HISTORY_MAX_TURNS is not a number: {}", raw),
            },
            Err(_) => MAX_TURNS,
        };

        Ok(Self {
            telegram: TelegramConfig::from_env(token)?,
            log_file: var_or("LOG_FILE", DEFAULT_LOG_FILE),
            history_path: PathBuf::from(var_or("HISTORY_PATH", DEFAULT_HISTORY_PATH)),
            history_max_turns,
            temp_dir: env::var_os("TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.parsed_api_url()?;
        if self.history_max_turns == 0 {
            bail!("HISTORY_MAX_TURNS must be at least 1");
        }
        Ok(())
    }
}
