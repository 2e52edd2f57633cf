//! Provider-keyed model client factory

use super::anthropic::AnthropicClient;
use super::credentials::CredentialResolver;
use super::http::build_http_client;
use super::openai_compat::OpenAiCompatibleClient;
use audit_application::ports::model_client::ModelClient;
use audit_application::ports::model_client_factory::{ClientError, ModelClientFactory};
use audit_domain::{ProviderConfig, ProviderKind};
use std::sync::Arc;
use tracing::debug;

/// Builds HTTP-backed clients from provider settings. No network I/O.
#[derive(Debug, Clone)]
pub struct ProviderClientFactory {
    providers: ProviderConfig,
    credentials: CredentialResolver,
}

impl ProviderClientFactory {
    pub fn new(providers: ProviderConfig, credentials: CredentialResolver) -> Self {
        Self {
            providers,
            credentials,
        }
    }

    pub fn providers(&self) -> &ProviderConfig {
        &self.providers
    }
}

impl ModelClientFactory for ProviderClientFactory {
    fn create(
        &self,
        provider: &str,
        model_name: &str,
        temperature: f32,
        api_key: Option<&str>,
    ) -> Result<Arc<dyn ModelClient>, ClientError> {
        let kind: ProviderKind = provider.parse()?;
        let settings = self.providers.get(kind);
        let api_key = self.credentials.resolve(kind, settings, api_key)?;
        let http = build_http_client(settings.timeout_secs)?;

        debug!(
            provider = %kind,
            model = model_name,
            base_url = %settings.base_url,
            "Built model client"
        );

        // Tool-calling providers share the OpenAI chat-completions wire format
        let client: Arc<dyn ModelClient> = if kind.uses_tool_calling() {
            Arc::new(OpenAiCompatibleClient::new(
                http,
                kind,
                api_key,
                &settings.base_url,
                model_name,
                temperature,
                settings.max_tokens,
            ))
        } else {
            Arc::new(AnthropicClient::new(
                http,
                api_key,
                &settings.base_url,
                model_name,
                temperature,
                settings.max_tokens,
            ))
        };
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_domain::{ModelRole, RoleBinding};

    fn factory_with_all_keys() -> ProviderClientFactory {
        ProviderClientFactory::new(
            ProviderConfig::default(),
            CredentialResolver::with_lookup(|_| Some("key".to_string())),
        )
    }

    fn expect_err(result: Result<Arc<dyn ModelClient>, ClientError>) -> ClientError {
        match result {
            Err(err) => err,
            Ok(client) => panic!("expected an error, got client for {}", client.model_name()),
        }
    }

    #[test]
    fn test_supported_identifiers_in_any_case() {
        let factory = factory_with_all_keys();
        for (id, kind) in [
            ("openai", ProviderKind::OpenAi),
            ("OpenAI", ProviderKind::OpenAi),
            ("ANTHROPIC", ProviderKind::Anthropic),
            (" Grok ", ProviderKind::Grok),
            ("groq", ProviderKind::Groq),
        ] {
            let client = factory.create(id, "some-model", 0.3, None).unwrap();
            assert_eq!(client.provider(), kind);
            assert_eq!(client.model_name(), "some-model");
            assert_eq!(client.temperature(), 0.3);
        }
    }

    #[test]
    fn test_unknown_provider_names_identifier() {
        let err = expect_err(factory_with_all_keys().create("mistral", "m", 0.0, None));
        match &err {
            ClientError::UnsupportedProvider {
                received,
                supported,
            } => {
                assert_eq!(received, "mistral");
                assert!(supported.contains("'anthropic'"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("'mistral'"));
    }

    #[test]
    fn test_missing_credential() {
        let factory = ProviderClientFactory::new(
            ProviderConfig::default(),
            CredentialResolver::with_lookup(|_| None),
        );
        let err = expect_err(factory.create("anthropic", "claude", 0.0, None));
        assert_eq!(
            err,
            ClientError::MissingCredential {
                provider: ProviderKind::Anthropic,
                env_var: "ANTHROPIC_API_KEY".to_string(),
            }
        );
    }

    #[test]
    fn test_explicit_key_satisfies_credentials() {
        let factory = ProviderClientFactory::new(
            ProviderConfig::default(),
            CredentialResolver::with_lookup(|_| None),
        );
        assert!(factory.create("groq", "llama", 0.0, Some("explicit")).is_ok());
    }

    #[test]
    fn test_create_for_role_uses_binding() {
        let client = factory_with_all_keys()
            .create_for_role(
                ModelRole::Judge,
                &RoleBinding::new("anthropic", "claude-sonnet-4-5", 0.0),
            )
            .unwrap();
        assert_eq!(client.provider(), ProviderKind::Anthropic);
        assert_eq!(client.model_name(), "claude-sonnet-4-5");
    }
}
