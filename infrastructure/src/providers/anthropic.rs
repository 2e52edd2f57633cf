//! Anthropic Messages API adapter
//!
//! Schema-bound requests carry a JSON-only system prompt with the rendered
//! schema embedded verbatim. The first text block of the reply is parsed.

use super::http::send_json;
use super::interpret_block;
use async_trait::async_trait;
use audit_application::ports::model_client::{ModelClient, ModelOutput, ProviderError};
use audit_domain::extraction::steering::json_only_system_prompt;
use audit_domain::providers::ANTHROPIC_API_VERSION;
use audit_domain::{ProviderKind, Schema};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Anthropic API client implementation.
///
/// NOTE: Do NOT derive `Debug` on this struct, `api_key` would be exposed.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

impl AnthropicClient {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature,
            max_tokens,
        }
    }
}

impl fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    async fn invoke(
        &self,
        prompt: &str,
        schema: Option<&Schema>,
    ) -> Result<ModelOutput, ProviderError> {
        debug!(
            provider = "anthropic",
            model = %self.model,
            temperature = self.temperature,
            schema = schema.map(|s| s.name()).unwrap_or("none"),
            mode = if schema.is_some() { "system_prompt" } else { "text" },
            "Invoking model"
        );

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: schema.map(json_only_system_prompt),
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response: MessagesResponse = send_json(
            self.http
                .post(format!("{}/v1/messages", self.base_url))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_API_VERSION)
                .json(&body),
        )
        .await?;

        // First text block only; blocks are never merged.
        let block = response.content.into_iter().find_map(|block| block.text);

        Ok(interpret_block(
            ProviderKind::Anthropic,
            &self.model,
            block,
            schema,
        ))
    }
}
