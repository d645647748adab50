// Type definitions shared by the LLM layer

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum LLMProvider {
    Google,
}

impl LLMProvider {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "google" | "gemini" => Some(LLMProvider::Google),
            _ => None,
        }
    }
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::Google => write!(f, "google"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LLMRequest {
    pub model: String,
    pub messages: Vec<LLMMessage>,
}

/// One part of a message: text, or a document/image sent inline
#[derive(Clone, PartialEq)]
pub enum ContentPart {
    Text { text: String },
    /// Raw bytes sent inline, tagged with their MIME type
    InlineData { mime_type: String, data: Vec<u8> },
}

// Document payloads can be megabytes; print their size instead.
impl std::fmt::Debug for ContentPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentPart::Text { text } => f.debug_struct("Text").field("text", text).finish(),
            ContentPart::InlineData { mime_type, data } => f
                .debug_struct("InlineData")
                .field("mime_type", mime_type)
                .field("bytes", &data.len())
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LLMMessage {
    pub role: String,
    pub parts: Vec<ContentPart>,
}

impl LLMMessage {
    /// Create a user message carrying a document followed by an instruction
    pub fn user_with_document(
        mime_type: impl Into<String>,
        data: Vec<u8>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![
                ContentPart::InlineData {
                    mime_type: mime_type.into(),
                    data,
                },
                ContentPart::Text { text: text.into() },
            ],
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub finish_reason: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
