//! Anthropic Messages API backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::VendorConfig;
use crate::error::{RelayError, Result};
use crate::relay::prompts::SYSTEM_PROMPT;
use crate::relay::provider::{ChatBackend, ChatMessage, MAX_RESPONSE_TOKENS};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: &'static str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl AnthropicBackend {
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

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }

    /// History in caller order, new user message last. The system instruction
    /// travels in the dedicated `system` field, not in this list.
    fn build_messages(message: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut messages = history.to_vec();
        messages.push(ChatMessage::user(message));
        messages
    }
}

#[async_trait]
impl ChatBackend for AnthropicBackend {
    async fn get_response(&self, message: &str, history: &[ChatMessage]) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_RESPONSE_TOKENS,
            system: SYSTEM_PROMPT,
            messages: Self::build_messages(message, history),
        };

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Calling Anthropic"
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            tracing::error!(status = %status, body = %body, "Anthropic API error");
            return Err(RelayError::Provider(format!(
                "Anthropic API error: {status}: {body}"
            )));
        }

        let parsed: MessagesResponse = response.json().await?;

        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| {
                RelayError::Provider("Anthropic response contained no content blocks".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::provider::Role;

    #[test]
    fn new_user_message_goes_last() {
        let history = vec![
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello!"),
        ];
        let messages = AnthropicBackend::build_messages("2+2?", &history);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], ChatMessage::user("Hi"));
        assert_eq!(messages[1], ChatMessage::assistant("Hello!"));
        assert_eq!(messages[2], ChatMessage::user("2+2?"));
        assert!(messages.iter().all(|m| m.role != Role::System));
    }

    #[test]
    fn empty_history_yields_single_user_message() {
        let messages = AnthropicBackend::build_messages("Hello", &[]);
        assert_eq!(messages, vec![ChatMessage::user("Hello")]);
    }

    #[test]
    fn messages_url_handles_trailing_slash() {
        let backend = AnthropicBackend::new(&VendorConfig {
            api_key: "key".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            base_url: Some("http://localhost:9999/".to_string()),
        });
        assert_eq!(backend.messages_url(), "http://localhost:9999/v1/messages");
    }

    #[test]
    fn messages_url_defaults_to_public_api() {
        let backend = AnthropicBackend::new(&VendorConfig {
            api_key: "key".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            base_url: None,
        });
        assert_eq!(
            backend.messages_url(),
            "https://api.anthropic.com/v1/messages"
        );
    }
}
