//! Minimal self-hostable chat relay.
//!
//! Forwards a user's message and conversation history to a configured LLM
//! provider (Anthropic or OpenAI) and returns the textual reply. The binary
//! in `main.rs` only wires configuration, the relay, and the router together;
//! everything else lives here so integration tests can drive the router
//! directly.

pub mod api;
pub mod config;
pub mod error;
pub mod relay;
