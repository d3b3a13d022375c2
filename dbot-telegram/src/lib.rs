//! # dbot-telegram
//!
//! Telegram transport layer: adapters, [`dbot_core::Bot`] and [`dbot_core::MediaSource`]
//! implementation, minimal config, REPL runner.
//! Handles only Telegram connectivity and handler-chain execution; no history or model logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{file_download_url, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::run_repl;
