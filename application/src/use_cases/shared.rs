//! Shared utilities for use cases.
//!
//! Typed structured invocation: ask a client for schema-bound output and
//! deserialize the validated payload into a domain type.

use crate::ports::model_client::{ModelClient, ModelOutput, ProviderError};
use audit_domain::{Schema, StructuredOutput};
use tracing::debug;

/// Result of a structured invocation that reached the provider.
#[derive(Debug)]
pub(crate) enum TypedOutput<T> {
    Valid(T),
    /// The model answered, but not with a valid object. Carries the reason.
    Invalid(String),
}

/// Invoke `client` with `schema` and decode the validated payload as `T`.
///
/// Provider faults are errors; malformed output is [`TypedOutput::Invalid`].
pub(crate) async fn invoke_structured<T: StructuredOutput>(
    client: &dyn ModelClient,
    prompt: &str,
    schema: &Schema,
) -> Result<TypedOutput<T>, ProviderError> {
    let output = client.invoke(prompt, Some(schema)).await?;
    let raw_chars = output.raw_text().map_or(0, |raw| raw.chars().count());

    let typed = match output {
        ModelOutput::Structured(value) => match serde_json::from_value(value) {
            Ok(decoded) => TypedOutput::Valid(decoded),
            Err(e) => TypedOutput::Invalid(format!("validated payload did not decode: {}", e)),
        },
        ModelOutput::Unvalidated { error, .. } => TypedOutput::Invalid(error.to_string()),
        ModelOutput::Text(_) => {
            TypedOutput::Invalid("model returned free text instead of structured output".into())
        }
        ModelOutput::Empty => TypedOutput::Invalid("model returned no content".into()),
    };

    if let TypedOutput::Invalid(reason) = &typed {
        debug!(
            provider = %client.provider(),
            model = client.model_name(),
            schema = schema.name(),
            raw_chars,
            "Structured invocation produced no valid object: {}",
            reason
        );
    }

    Ok(typed)
}
