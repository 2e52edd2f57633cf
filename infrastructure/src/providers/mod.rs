//! LLM provider adapters
//!
//! One [`ModelClient`](audit_application::ports::model_client::ModelClient)
//! implementation per provider family:
//!
//! - [`openai_compat::OpenAiCompatibleClient`]: OpenAI, Grok and Groq
//!   (forced `structured_output` tool call)
//! - [`anthropic::AnthropicClient`]: JSON-only system prompt
//!
//! [`factory::ProviderClientFactory`] picks the adapter for a provider id.

pub mod anthropic;
pub mod credentials;
pub mod factory;
mod http;
pub mod openai_compat;

pub use anthropic::AnthropicClient;
pub use credentials::CredentialResolver;
pub use factory::ProviderClientFactory;
pub use openai_compat::OpenAiCompatibleClient;

use audit_application::ports::model_client::ModelOutput;
use audit_domain::{Extraction, ProviderKind, Schema, extract_structured};
use tracing::warn;

/// Turn the first content block of a response into a [`ModelOutput`].
///
/// Without a schema the text is returned as is. With one it goes through
/// the strict parse + validate step; failures are logged without payload.
pub(crate) fn interpret_block(
    provider: ProviderKind,
    model: &str,
    block: Option<String>,
    schema: Option<&Schema>,
) -> ModelOutput {
    let Some(raw) = block.filter(|text| !text.trim().is_empty()) else {
        warn!(provider = %provider, model, "Provider returned no usable content");
        return ModelOutput::Empty;
    };

    let Some(schema) = schema else {
        return ModelOutput::Text(raw);
    };

    let extraction = extract_structured(&raw, schema);
    if let Extraction::Unvalidated { error, .. } = &extraction {
        warn!(
            provider = %provider,
            model,
            schema = schema.name(),
            "Malformed structured response: {}",
            error
        );
    }
    extraction.into()
}
