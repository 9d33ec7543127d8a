//! Site chatbot: keyword intent detection in front of an optional hosted
//! language model, with canned replies whenever the model is unavailable.

pub mod intent;
pub mod model;
pub mod openai;
pub mod router;
pub mod service;

pub use intent::{classify, Intent};
pub use model::{ChatRole, ChatTurn, LanguageModel, ModelError};
pub use openai::OpenAiChatModel;
pub use router::chatbot_router;
pub use service::{ChatReply, ChatRequest, ChatbotService, ReplySource};

use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}
