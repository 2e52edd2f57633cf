//! API key resolution
//!
//! Order: explicit key → key in the config file → environment variable
//! named by the provider settings. Empty strings count as absent.

use audit_application::ports::model_client_factory::ClientError;
use audit_domain::{ProviderKind, ProviderSettings};
use std::fmt;
use std::sync::Arc;

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves provider keys through an injectable variable lookup.
#[derive(Clone)]
pub struct CredentialResolver {
    lookup: Lookup,
}

impl CredentialResolver {
    /// Read variables from the process environment.
    pub fn from_env() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    pub fn resolve(
        &self,
        kind: ProviderKind,
        settings: &ProviderSettings,
        explicit: Option<&str>,
    ) -> Result<String, ClientError> {
        let non_empty = |key: &str| {
            let key = key.trim();
            (!key.is_empty()).then(|| key.to_string())
        };

        explicit
            .and_then(non_empty)
            .or_else(|| settings.api_key.as_deref().and_then(non_empty))
            .or_else(|| (self.lookup)(&settings.api_key_env).as_deref().and_then(non_empty))
            .ok_or_else(|| ClientError::MissingCredential {
                provider: kind,
                env_var: settings.api_key_env.clone(),
            })
    }
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ProviderSettings {
        ProviderSettings::defaults_for(ProviderKind::OpenAi)
    }

    fn env_with_key() -> CredentialResolver {
        CredentialResolver::with_lookup(|name| {
            (name == "OPENAI_API_KEY").then(|| "env-key".to_string())
        })
    }

    #[test]
    fn test_explicit_key_wins() {
        let mut settings = settings();
        settings.api_key = Some("config-key".to_string());
        let key = env_with_key()
            .resolve(ProviderKind::OpenAi, &settings, Some("explicit-key"))
            .unwrap();
        assert_eq!(key, "explicit-key");
    }

    #[test]
    fn test_config_key_before_env() {
        let mut settings = settings();
        settings.api_key = Some("config-key".to_string());
        let key = env_with_key()
            .resolve(ProviderKind::OpenAi, &settings, None)
            .unwrap();
        assert_eq!(key, "config-key");
    }

    #[test]
    fn test_env_key_used_last() {
        let key = env_with_key()
            .resolve(ProviderKind::OpenAi, &settings(), None)
            .unwrap();
        assert_eq!(key, "env-key");
    }

    #[test]
    fn test_empty_values_count_as_absent() {
        let resolver = CredentialResolver::with_lookup(|_| Some("  ".to_string()));
        let mut settings = settings();
        settings.api_key = Some(String::new());

        let err = resolver
            .resolve(ProviderKind::OpenAi, &settings, Some(""))
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::MissingCredential {
                provider: ProviderKind::OpenAi,
                env_var: "OPENAI_API_KEY".to_string(),
            }
        );
    }

    #[test]
    fn test_custom_env_var_name() {
        let resolver = CredentialResolver::with_lookup(|name| {
            (name == "WORK_GROQ_KEY").then(|| "groq-key".to_string())
        });
        let mut settings = ProviderSettings::defaults_for(ProviderKind::Groq);
        settings.api_key_env = "WORK_GROQ_KEY".to_string();

        assert_eq!(
            resolver.resolve(ProviderKind::Groq, &settings, None).unwrap(),
            "groq-key"
        );
    }
}
