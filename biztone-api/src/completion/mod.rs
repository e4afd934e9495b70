//! Chat completion client abstraction
//!
//! The converter talks to the hosted language model only through
//! [`CompletionClient`], so tests can substitute a fake and the service can
//! run without any client at all (local fallback mode).

pub mod groq;

use thiserror::Error;

pub use groq::{GroqClient, GroqSettings};

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// One turn of the exchange sent to the model
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Single-shot completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Completion client errors
///
/// The converter treats every variant the same way; the distinction only
/// shows up in the diagnostic log.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Completion contained no text")]
    EmptyCompletion,
}

/// Hosted chat completion service
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Perform one round trip and return the first completion's text
    ///
    /// Implementations return the text untrimmed; callers decide how to
    /// normalize it. No retries.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
