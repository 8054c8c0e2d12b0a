//! Chat-completion backends
//!
//! The generator talks to a [`ChatBackend`]; [`openai::OpenAiClient`] is the
//! production implementation. Tests substitute scripted backends.

pub mod openai;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use openai::OpenAiClient;

/// Backend failure for one completion request
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key configured
    #[error("OpenAI API key is not configured")]
    MissingApiKey,

    /// Transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Backend-specific failure
    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One chat completion call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Text content of the first choice; empty when the model returned none
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}
