use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("language model unavailable: {0}")]
    Unavailable(String),
    #[error("language model rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("language model returned no reply")]
    EmptyReply,
}

/// Chat-completion seam.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &[ChatTurn]) -> Result<String, ModelError>;
}
