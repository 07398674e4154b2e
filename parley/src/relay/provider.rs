use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::{RelayError, Result};
use crate::relay::anthropic::AnthropicBackend;
use crate::relay::openai::OpenAiBackend;

/// Response-length cap sent with every vendor call.
pub const MAX_RESPONSE_TOKENS: u32 = 4096;

/// One turn of a conversation, as supplied by the caller and as sent on the
/// wire to either vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
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

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vendor chat-completion backend.
///
/// One implementation per vendor; the relay dispatches through this trait, so
/// adding a vendor means adding an implementation rather than editing a
/// branch.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// One round-trip: forward the message and history to the vendor and
    /// return the extracted reply text. Failures propagate unmodified; there
    /// is no retry and no transient/permanent distinction at this layer.
    async fn get_response(&self, message: &str, history: &[ChatMessage]) -> Result<String>;
}

/// Stateless relay over the vendor backend chosen at startup.
///
/// Cheap to clone; the only stored state is the immutable backend, fixed for
/// the process lifetime.
#[derive(Clone)]
pub struct ChatRelay {
    kind: ProviderKind,
    backend: Arc<dyn ChatBackend>,
}

impl std::fmt::Debug for ChatRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRelay").field("kind", &self.kind).finish()
    }
}

impl ChatRelay {
    /// Build the relay for the configured provider selector.
    ///
    /// An absent selector falls back to Anthropic. An unknown selector is a
    /// configuration error; `main` treats it as fatal.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let selector = config
            .selector
            .as_deref()
            .unwrap_or("anthropic")
            .to_lowercase();

        match selector.as_str() {
            "anthropic" => Ok(Self {
                kind: ProviderKind::Anthropic,
                backend: Arc::new(AnthropicBackend::new(&config.anthropic)),
            }),
            "openai" => Ok(Self {
                kind: ProviderKind::OpenAi,
                backend: Arc::new(OpenAiBackend::new(&config.openai)),
            }),
            other => Err(RelayError::Config(format!(
                "Unsupported AI provider: {other}"
            ))),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub async fn get_response(&self, message: &str, history: &[ChatMessage]) -> Result<String> {
        self.backend.get_response(message, history).await
    }
}
