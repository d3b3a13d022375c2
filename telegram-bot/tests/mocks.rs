//! Hand-written mocks for handler tests.
//!
//! - `MockBot` records every sent message instead of calling Telegram.
//! - `MockMediaSource` serves in-memory files by file id.
//! - `MockGateway` answers with a fixed reply or error and records every request.
//! - `MockTranscriber` returns a fixed transcript.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, DbotError, MediaSource, Message, MessagePayload, User};
use llm_client::{CompletionGateway, CompletionRequest, Transcriber};

#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<(i64, String)>>,
}

impl MockBot {
    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> dbot_core::Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockMediaSource {
    files: HashMap<String, Vec<u8>>,
}

impl MockMediaSource {
    pub fn with_file(mut self, file_id: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(file_id.to_string(), bytes.into());
        self
    }
}

#[async_trait]
impl MediaSource for MockMediaSource {
    async fn file_url(&self, file_id: &str) -> dbot_core::Result<String> {
        if self.files.contains_key(file_id) {
            Ok(format!("https://files.test/{}", file_id))
        } else {
            Err(DbotError::Bot("file not found".to_string()))
        }
    }

    async fn download(&self, file_id: &str, dest: &Path) -> dbot_core::Result<()> {
        let bytes = self
            .files
            .get(file_id)
            .ok_or_else(|| DbotError::Bot("file not found".to_string()))?;
        tokio::fs::write(dest, bytes).await?;
        Ok(())
    }
}

pub struct MockGateway {
    reply: Result<String, String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
}

impl MockGateway {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            delay: None,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            ..Self::replying("")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionGateway for MockGateway {
    async fn complete(&self, request: CompletionRequest) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(e) => Err(anyhow::anyhow!("{}", e)),
        }
    }
}

pub struct MockTranscriber {
    pub transcript: String,
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio_path: &Path, _language: &str) -> anyhow::Result<String> {
        Ok(self.transcript.clone())
    }
}

/// Incoming message from user 42 in private chat 42.
pub fn message(payload: MessagePayload) -> Message {
    message_from(42, payload)
}

pub fn message_from(user_id: i64, payload: MessagePayload) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: user_id,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        payload,
        caption: None,
        created_at: Utc::now(),
    }
}

pub fn text(text: &str) -> MessagePayload {
    MessagePayload::Text {
        text: text.to_string(),
    }
}
