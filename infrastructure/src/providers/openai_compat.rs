//! OpenAI-compatible chat completions adapter (OpenAI, Grok, Groq)
//!
//! Schema-bound requests declare exactly one tool, `structured_output`,
//! whose parameters are the rendered JSON Schema, and force it through
//! `tool_choice`. The first tool call's arguments are parsed; when the model
//! answers with plain content instead, that content takes the same path.

use super::http::send_json;
use super::interpret_block;
use async_trait::async_trait;
use audit_application::ports::model_client::{ModelClient, ModelOutput, ProviderError};
use audit_domain::extraction::steering::{STRUCTURED_OUTPUT_TOOL, tool_description};
use audit_domain::{ProviderKind, Schema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use tracing::debug;

/// Chat completions client for providers speaking the OpenAI wire format.
///
/// `Debug` is implemented by hand so the key never shows up.
pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    kind: ProviderKind,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<Value>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    arguments: String,
}

impl OpenAiCompatibleClient {
    pub fn new(
        http: reqwest::Client,
        kind: ProviderKind,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            http,
            kind,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature,
            max_tokens,
        }
    }

    fn structured_output_tool(schema: &Schema) -> (Vec<Value>, Value) {
        let tool = json!({
            "type": "function",
            "function": {
                "name": STRUCTURED_OUTPUT_TOOL,
                "description": tool_description(schema),
                "parameters": schema.to_json_schema(),
            }
        });
        let choice = json!({
            "type": "function",
            "function": { "name": STRUCTURED_OUTPUT_TOOL }
        });
        (vec![tool], choice)
    }
}

impl fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ModelClient for OpenAiCompatibleClient {
    fn provider(&self) -> ProviderKind {
        self.kind
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
            provider = %self.kind,
            model = %self.model,
            temperature = self.temperature,
            schema = schema.map(|s| s.name()).unwrap_or("none"),
            mode = if schema.is_some() { "tool_call" } else { "text" },
            "Invoking model"
        );

        let (tools, tool_choice) = match schema {
            Some(schema) => {
                let (tools, choice) = Self::structured_output_tool(schema);
                (Some(tools), Some(choice))
            }
            None => (None, None),
        };

        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools,
            tool_choice,
        };

        let response: ChatResponse = send_json(
            self.http
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;

        // First choice, first tool call, else its text content.
        let block = response.choices.into_iter().next().and_then(|choice| {
            let message = choice.message;
            match message.tool_calls.into_iter().flatten().next() {
                Some(call) => Some(call.function.arguments),
                None => message.content,
            }
        });

        Ok(interpret_block(self.kind, &self.model, block, schema))
    }
}
