//! # Telegram bot application
//!
//! Relays text, voice notes, photos and documents to an LLM. Text, voice and documents share a
//! bounded per-sender history kept in a JSON file; photos are described one-shot by a vision model.
//! Wires dbot-telegram (transport), handler-chain, storage, llm-client and media.

pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod runner;

pub use cli::{Cli, Commands, RunArgs};
pub use components::{build_bot_components, build_handler_chain, BotComponents, BotServices};
pub use config::{BaseConfig, BotConfig, VoiceConfig};
pub use handlers::{
    ConversationService, DocumentHandler, PhotoHandler, TextHandler, VoiceHandler,
    DOCUMENT_ERROR_PREFIX, GPT_ERROR_PREFIX, IMAGE_ERROR_PREFIX, VOICE_ERROR_PREFIX,
};
pub use runner::run_bot;
