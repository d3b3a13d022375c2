//! # dbot-core
//!
//! Core types and traits for the Telegram bot: [`Bot`], [`MediaSource`], [`Handler`], message
//! and user types, and tracing initialization. Transport-agnostic; used by dbot-telegram,
//! handler-chain and the bot's event handlers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, MediaSource};
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessagePayload, ToCoreMessage, ToCoreUser, User,
};
