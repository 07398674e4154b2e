//! Fixed prompt text shared by all chat backends.

/// System instruction prepended to every conversation, regardless of vendor.
/// Anthropic receives it through the dedicated `system` parameter; OpenAI
/// receives it as the first message.
pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant similar to Claude. \
You provide clear, thoughtful, and detailed responses. You can help with a wide \
variety of tasks including answering questions, writing, analysis, math, coding, \
and creative projects.";
