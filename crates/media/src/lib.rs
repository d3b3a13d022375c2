//! # Media
//!
//! Single-call wrappers used by the voice and document handlers:
//!
//! - [`transcode`] – ogg → 16 kHz mono wav via `ffmpeg`
//! - [`extract`] – PDF / DOCX / plain text extraction and character truncation
//! - [`temp`] – temp file naming and cleanup

pub mod error;
pub mod extract;
pub mod temp;
pub mod transcode;

pub use error::{MediaError, Result};
pub use extract::{
    extract_document_text, extract_docx_text, extract_from_bytes, truncate_chars,
    DOCUMENT_CHAR_LIMIT, PDF_MIME,
};
pub use temp::{extension_of, remove_quietly, temp_path};
pub use transcode::{transcode_with, TARGET_SAMPLE_RATE};
