//! # Prompt
//!
//! Conversation turn types shared by the history store and the completion gateway.
//!
//! A [`Turn`] is one element of an OpenAI-style `messages` array: a [`Role`] plus
//! [`TurnContent`], which is either plain text or an ordered list of multimodal parts.
//!
//! ## Wire format
//!
//! Turns serialize exactly as the chat completions API expects them, so the history
//! file and outgoing requests share one shape:
//!
//! ```json
//! { "role": "user", "content": "hi" }
//! { "role": "user", "content": [ { "type": "text", "text": "..." },
//!                                { "type": "image_url", "image_url": { "url": "..." } } ] }
//! ```

use serde::{Deserialize, Serialize};

/// Role of a turn, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image reference inside a multimodal part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// One part of a multimodal turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

/// Content of a turn: plain text or structured multimodal payload.
///
/// Untagged so plain text stays a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl TurnContent {
    /// Returns the text when this is a plain-text turn.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TurnContent::Text(s) => Some(s),
            TurnContent::Parts(_) => None,
        }
    }

    /// Concatenated text of all text parts (image parts are skipped).
    pub fn text_lossy(&self) -> String {
        match self {
            TurnContent::Text(s) => s.clone(),
            TurnContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::ImageUrl { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<String> for TurnContent {
    fn from(s: String) -> Self {
        TurnContent::Text(s)
    }
}

impl From<&str> for TurnContent {
    fn from(s: &str) -> Self {
        TurnContent::Text(s.to_string())
    }
}

impl From<Vec<ContentPart>> for TurnContent {
    fn from(parts: Vec<ContentPart>) -> Self {
        TurnContent::Parts(parts)
    }
}

/// A single conversation turn. Immutable once appended to a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: TurnContent,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<TurnContent>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<TurnContent>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<TurnContent>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<TurnContent>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// System turn sent with every image request. Image requests carry no history.
pub const IMAGE_SYSTEM_PROMPT: &str = "You are an assistant that describes the content of images. \
Do not name people and do not disclose personal data.";

/// Instruction placed before the image in the user turn of an image request.
pub const IMAGE_USER_PROMPT: &str = "Describe what is in this image:";

/// Builds the multimodal user turn for an image request: instruction text then the image.
pub fn image_request_turn(instruction: &str, image_url: &str) -> Turn {
    Turn::user(vec![
        ContentPart::text(instruction),
        ContentPart::image_url(image_url),
    ])
}
