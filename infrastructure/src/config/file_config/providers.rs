//! Provider configuration from TOML (`[providers]` section)

use audit_domain::{ProviderConfig, ProviderKind, ProviderSettings};
use serde::{Deserialize, Serialize};

/// One `[providers.<id>]` table. Unset keys keep the provider's defaults.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable name for the API key (default: `<PROVIDER>_API_KEY`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use the env var instead).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for FileProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileProviderConfig")
            .field("api_key_env", &self.api_key_env)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl FileProviderConfig {
    fn to_settings(&self, kind: ProviderKind) -> ProviderSettings {
        let defaults = ProviderSettings::defaults_for(kind);
        ProviderSettings {
            api_key_env: self.api_key_env.clone().unwrap_or(defaults.api_key_env),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileProviderConfig,
    pub anthropic: FileProviderConfig,
    pub grok: FileProviderConfig,
    pub groq: FileProviderConfig,
}

impl FileProvidersConfig {
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            openai: self.openai.to_settings(ProviderKind::OpenAi),
            anthropic: self.anthropic.to_settings(ProviderKind::Anthropic),
            grok: self.grok.to_settings(ProviderKind::Grok),
            groq: self.groq.to_settings(ProviderKind::Groq),
        }
    }
}
