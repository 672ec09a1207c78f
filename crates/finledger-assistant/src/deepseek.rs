//! DeepSeek chat completion provider
//!
//! Speaks the OpenAI-style `/chat/completions` contract: model name,
//! system + user messages, `max_tokens`, `temperature`. A single
//! attempt per request, bounded by the configured timeout.

use crate::error::AssistantError;
use crate::provider::{ChatProvider, ChatReply};
use async_trait::async_trait;
use finledger_config::AssistantConfig;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub struct DeepSeekProvider {
    client: Client,
    api_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f64,
}

impl DeepSeekProvider {
    pub fn new(config: &AssistantConfig, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

// ── Provider API response types ─────────────────────────────────────

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    usage: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl ChatProvider for DeepSeekProvider {
    fn name(&self) -> &str {
        "DeepSeek"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<ChatReply, AssistantError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AssistantError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::MalformedResponse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                AssistantError::MalformedResponse("Response holds no choices".to_string())
            })?;

        Ok(ChatReply {
            content,
            usage: completion.usage,
        })
    }
}
