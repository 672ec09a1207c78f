//! Chat provider abstraction
//!
//! The gateway talks to the external chat completion service through
//! this trait so the request/fallback logic is testable with scripted
//! providers instead of live network calls.

use crate::error::AssistantError;
use async_trait::async_trait;

/// One completed chat exchange
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Provider answer text, verbatim
    pub content: String,
    /// Token usage object passed through from the provider, if any
    pub usage: Option<serde_json::Value>,
}

/// Trait abstraction for chat completion providers.
///
/// One implementation per external service; swapping the service
/// touches only that implementation.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors)
    fn name(&self) -> &str;

    /// Send a system + user prompt pair and await a single completion
    async fn complete(&self, system: &str, user: &str) -> Result<ChatReply, AssistantError>;
}
