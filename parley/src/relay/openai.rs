//! OpenAI chat-completions backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::VendorConfig;
use crate::error::{RelayError, Result};
use crate::relay::prompts::SYSTEM_PROMPT;
use crate::relay::provider::{ChatBackend, ChatMessage, MAX_RESPONSE_TOKENS};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAiBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

impl OpenAiBackend {
    pub fn new(config: &VendorConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }

    /// System instruction first, history in caller order, new user message
    /// last. OpenAI has no dedicated system slot, so the instruction rides as
    /// the first message.
    fn build_messages(message: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(message));
        messages
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn get_response(&self, message: &str, history: &[ChatMessage]) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: Self::build_messages(message, history),
            max_tokens: MAX_RESPONSE_TOKENS,
        };

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Calling OpenAI"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            tracing::error!(status = %status, body = %body, "OpenAI API error");
            return Err(RelayError::Provider(format!(
                "OpenAI API error: {status}: {body}"
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                RelayError::Provider("OpenAI response contained no choices".to_string())
            })
    }
}
