//! Errors shared by the transport adapters and the event handlers.

use thiserror::Error;

/// Failure of a transport call or a handler step.
#[derive(Error, Debug)]
pub enum DbotError {
    /// The messaging platform rejected or failed a request (send, file lookup, download).
    #[error("Telegram request failed: {0}")]
    Bot(String),

    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error("File system: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    /// Transcript or extracted document text is blank after trimming.
    #[error("nothing to send, the content is empty")]
    EmptyContent,
}

pub type Result<T> = std::result::Result<T, DbotError>;
