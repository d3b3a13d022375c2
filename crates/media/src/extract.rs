//! Document text extraction.
//!
//! `application/pdf` goes through pdf-extract, `text/*` is read as UTF-8 (lossy), anything
//! else is treated as a DOCX package and its `word/document.xml` runs are collected.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, instrument};

use crate::error::{MediaError, Result};

/// Number of characters of extracted document text sent to the model.
pub const DOCUMENT_CHAR_LIMIT: usize = 2000;

pub const PDF_MIME: &str = "application/pdf";

/// Returns at most `limit` characters of `text` (character count, not bytes).
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Reads the file and extracts its plain text according to the declared MIME type.
#[instrument]
pub async fn extract_document_text(path: &Path, mime_type: Option<&str>) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    let mime = mime_type.unwrap_or_default().to_string();
    let text = tokio::task::spawn_blocking(move || extract_from_bytes(&bytes, &mime))
        .await
        .map_err(|e| MediaError::Task(e.to_string()))??;
    debug!(chars = text.chars().count(), "Document text extracted");
    Ok(text)
}

/// Synchronous extraction from an in-memory file.
pub fn extract_from_bytes(bytes: &[u8], mime_type: &str) -> Result<String> {
    if mime_type == PDF_MIME {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| MediaError::Pdf(e.to_string()))
    } else if mime_type.starts_with("text/") {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    } else {
        extract_docx_text(bytes)
    }
}

/// Raw text of a DOCX package: text runs concatenated, one line per paragraph.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| MediaError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| MediaError::Docx(e.to_string()))?
        .read_to_string(&mut xml)?;
    document_xml_to_text(&xml)
}

fn document_xml_to_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t.unescape().map_err(|e| MediaError::Docx(e.to_string()))?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(MediaError::Docx(e.to_string())),
        }
    }

    Ok(out.trim_end().to_string())
}
