use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::intent::{classify, Intent};
use super::model::{ChatRole, ChatTurn, LanguageModel};
use super::AssistantError;
use crate::validation::ValidationErrors;

pub const MAX_MESSAGE_CHARS: usize = 1000;
/// Earlier turns forwarded to the model, most recent kept.
pub const MAX_HISTORY_TURNS: usize = 10;

const SYSTEM_PROMPT: &str = "You are the website assistant for a technology consultancy that \
builds AI marketplace platforms, custom AI solutions, web and mobile applications, and offers \
technology consulting. Keep answers under 120 words, be friendly and concrete, never invent \
prices or commitments, and suggest the contact form or a demo booking when the visitor is ready \
to talk.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub intent: Intent,
    pub source: ReplySource,
}

pub struct ChatbotService {
    model: Option<Arc<dyn LanguageModel>>,
}

impl ChatbotService {
    pub fn new(model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self { model }
    }

    pub fn offline() -> Self {
        Self { model: None }
    }

    pub async fn respond(&self, request: &ChatRequest) -> Result<ChatReply, AssistantError> {
        let message = validate_message(request.message.as_deref())?;
        let intent = classify(&message);

        let Some(model) = &self.model else {
            return Ok(fallback(intent));
        };

        let prompt = build_prompt(intent, &request.history, &message);
        match model.complete(&prompt).await {
            Ok(reply) => {
                debug!(intent = intent.label(), model = model.name(), "chatbot reply generated");
                Ok(ChatReply {
                    reply,
                    intent,
                    source: ReplySource::Model,
                })
            }
            Err(err) => {
                warn!(
                    intent = intent.label(),
                    model = model.name(),
                    error = %err,
                    "language model failed; using fallback reply"
                );
                Ok(fallback(intent))
            }
        }
    }
}

fn validate_message(raw: Option<&str>) -> Result<String, ValidationErrors> {
    let message = raw.map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return Err(ValidationErrors::single("message", "message is required"));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationErrors::single(
            "message",
            format!("message must be at most {MAX_MESSAGE_CHARS} characters"),
        ));
    }
    Ok(message.to_string())
}

fn fallback(intent: Intent) -> ChatReply {
    ChatReply {
        reply: intent.fallback_reply().to_string(),
        intent,
        source: ReplySource::Fallback,
    }
}

/// System prompt, then the tail of the visitor's history, then the new
/// message. Client-supplied system turns are dropped and long turns cut.
pub(crate) fn build_prompt(intent: Intent, history: &[ChatTurn], message: &str) -> Vec<ChatTurn> {
    let mut prompt = vec![ChatTurn::new(
        ChatRole::System,
        format!("{SYSTEM_PROMPT}\n\n{}", intent.hint()),
    )];

    let conversational: Vec<&ChatTurn> = history
        .iter()
        .filter(|turn| turn.role != ChatRole::System)
        .collect();
    let skip = conversational.len().saturating_sub(MAX_HISTORY_TURNS);
    prompt.extend(conversational.into_iter().skip(skip).map(|turn| {
        ChatTurn::new(
            turn.role,
            turn.content.chars().take(MAX_MESSAGE_CHARS).collect::<String>(),
        )
    }));

    prompt.push(ChatTurn::new(ChatRole::User, message));
    prompt
}
