//! Model client factory port
//!
//! Constructs [`ModelClient`]s from a provider identifier and model name.
//! Construction never touches the network.

use super::model_client::ModelClient;
use audit_domain::{DomainError, ModelRole, ProviderKind, RoleBinding};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while building a client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Missing API key for {provider}: pass one explicitly or set {env_var}")]
    MissingCredential {
        provider: ProviderKind,
        env_var: String,
    },

    #[error("Unsupported provider: '{received}'. Supported providers are {supported}")]
    UnsupportedProvider { received: String, supported: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownProvider {
                received,
                supported,
            } => ClientError::UnsupportedProvider {
                received,
                supported,
            },
            other => ClientError::Domain(other),
        }
    }
}

/// Selects and constructs the client for a provider.
pub trait ModelClientFactory: Send + Sync {
    /// `provider` is matched case-insensitively. An explicit `api_key`
    /// takes precedence over configured or environment keys.
    fn create(
        &self,
        provider: &str,
        model_name: &str,
        temperature: f32,
        api_key: Option<&str>,
    ) -> Result<Arc<dyn ModelClient>, ClientError>;

    fn create_for_role(
        &self,
        role: ModelRole,
        binding: &RoleBinding,
    ) -> Result<Arc<dyn ModelClient>, ClientError> {
        tracing::debug!(
            role = %role,
            provider = %binding.provider,
            model = %binding.model,
            "Creating model client"
        );
        self.create(&binding.provider, &binding.model, binding.temperature, None)
    }
}
