//! Model client port
//!
//! Defines the interface for invoking one LLM backend, optionally with a
//! required output schema.

use async_trait::async_trait;
use audit_domain::{Extraction, MalformedResponse, ProviderKind, Schema};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors raised by a provider call. Never retried automatically.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after_secs: Option<u64>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider error: {0}")]
    Unknown(String),
}

/// Coarse classification of a [`ProviderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Auth,
    RateLimit,
    Transport,
    Unknown,
}

impl ProviderErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderErrorKind::Auth => "auth",
            ProviderErrorKind::RateLimit => "rate_limit",
            ProviderErrorKind::Transport => "transport",
            ProviderErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProviderError {
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            ProviderError::Auth(_) => ProviderErrorKind::Auth,
            ProviderError::RateLimited { .. } => ProviderErrorKind::RateLimit,
            ProviderError::Transport(_) => ProviderErrorKind::Transport,
            ProviderError::Unknown(_) => ProviderErrorKind::Unknown,
        }
    }
}

/// What a model returned for one prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// Validated against the requested schema.
    Structured(Value),
    /// Free text (no schema was requested).
    Text(String),
    /// A schema was requested but the response did not satisfy it.
    Unvalidated {
        raw: String,
        error: MalformedResponse,
    },
    /// No usable content block.
    Empty,
}

impl ModelOutput {
    /// The raw text, when the output was not a validated object.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            ModelOutput::Text(text) | ModelOutput::Unvalidated { raw: text, .. } => Some(text),
            ModelOutput::Structured(_) | ModelOutput::Empty => None,
        }
    }
}

impl From<Extraction> for ModelOutput {
    fn from(extraction: Extraction) -> Self {
        match extraction {
            Extraction::Structured(value) => ModelOutput::Structured(value),
            Extraction::Unvalidated { raw, error } => ModelOutput::Unvalidated { raw, error },
        }
    }
}

/// Client bound to one provider, model and temperature.
///
/// Implementations (adapters) live in the infrastructure layer and are
/// immutable after construction.
#[async_trait]
pub trait ModelClient: Send + Sync {
    fn provider(&self) -> ProviderKind;

    fn model_name(&self) -> &str;

    fn temperature(&self) -> f32;

    /// Send `prompt`; with `schema`, steer toward and validate schema-bound output.
    ///
    /// Malformed responses degrade to [`ModelOutput::Unvalidated`]; only
    /// transport and provider faults are errors.
    async fn invoke(
        &self,
        prompt: &str,
        schema: Option<&Schema>,
    ) -> Result<ModelOutput, ProviderError>;
}
