use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::model::{ChatTurn, LanguageModel, ModelError};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const MAX_TOKENS: u32 = 400;
const TEMPERATURE: f32 = 0.4;

/// OpenAI chat-completions client.
#[derive(Clone)]
pub struct OpenAiChatModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl std::fmt::Debug for OpenAiChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatModel")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenAiChatModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, model, OPENAI_CHAT_URL)
    }

    pub fn with_endpoint(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn first_reply(response: CompletionResponse) -> Result<String, ModelError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(ModelError::EmptyReply)
}

#[async_trait]
impl LanguageModel for OpenAiChatModel {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, prompt: &[ChatTurn]) -> Result<String, ModelError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages: prompt,
                max_tokens: MAX_TOKENS,
                temperature: TEMPERATURE,
            })
            .send()
            .await
            .map_err(|err| ModelError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|err| ModelError::Unavailable(format!("unreadable completion: {err}")))?;
        first_reply(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::ChatRole;

    #[test]
    fn request_uses_chat_completion_shape() {
        let turns = [ChatTurn::new(ChatRole::User, "hello")];
        let value = serde_json::to_value(CompletionRequest {
            model: "gpt-4o-mini",
            messages: &turns,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        })
        .expect("serializes");
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn blank_choice_is_an_empty_reply() {
        let parsed: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  "}}]}"#,
        )
        .expect("parses");
        assert!(matches!(first_reply(parsed), Err(ModelError::EmptyReply)));

        let parsed: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Sure!"}}]}"#,
        )
        .expect("parses");
        assert_eq!(first_reply(parsed).expect("reply"), "Sure!");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let model = OpenAiChatModel::with_endpoint("key", "gpt-4o-mini", "http://127.0.0.1:9/v1");
        let result = model
            .complete(&[ChatTurn::new(ChatRole::User, "hello")])
            .await;
        assert!(matches!(result, Err(ModelError::Unavailable(_))));
    }
}
