//! Provider identity and settings (serde-free).
//!
//! These types define which LLM backends exist and how to reach them,
//! without depending on any serialization format.

use crate::core::error::DomainError;
use std::fmt;
use std::str::FromStr;

/// A supported LLM backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    /// xAI Grok (OpenAI-compatible)
    Grok,
    /// Groq (OpenAI-compatible)
    Groq,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Grok,
        ProviderKind::Groq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Grok => "grok",
            ProviderKind::Groq => "groq",
        }
    }

    /// Quoted, comma-separated identifiers for error messages.
    pub fn supported_list() -> String {
        ProviderKind::ALL
            .iter()
            .map(|kind| format!("'{}'", kind.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether schema-bound output is requested through a forced tool call
    /// (otherwise through a JSON-only system prompt).
    pub fn uses_tool_calling(&self) -> bool {
        !matches!(self, ProviderKind::Anthropic)
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::Grok => "GROK_API_KEY",
            ProviderKind::Groq => "GROQ_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Anthropic => "https://api.anthropic.com",
            ProviderKind::Grok => "https://api.x.ai/v1",
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
        }
    }

    pub fn default_max_tokens(&self) -> u32 {
        match self {
            ProviderKind::Groq => 8192,
            _ => 4096,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownProvider {
                received: s.to_string(),
                supported: ProviderKind::supported_list(),
            })
    }
}

/// Default per-request timeout for provider calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Anthropic API version header value.
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Connection settings for one provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Key set directly in the config file (prefer the env var)
    pub api_key: Option<String>,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl ProviderSettings {
    pub fn defaults_for(kind: ProviderKind) -> Self {
        Self {
            api_key_env: kind.default_api_key_env().to_string(),
            api_key: None,
            base_url: kind.default_base_url().to_string(),
            max_tokens: kind.default_max_tokens(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Hand-written so the key never ends up in logs.
impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key_env", &self.api_key_env)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Settings for every provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub openai: ProviderSettings,
    pub anthropic: ProviderSettings,
    pub grok: ProviderSettings,
    pub groq: ProviderSettings,
}

impl ProviderConfig {
    pub fn get(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Grok => &self.grok,
            ProviderKind::Groq => &self.groq,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            openai: ProviderSettings::defaults_for(ProviderKind::OpenAi),
            anthropic: ProviderSettings::defaults_for(ProviderKind::Anthropic),
            grok: ProviderSettings::defaults_for(ProviderKind::Grok),
            groq: ProviderSettings::defaults_for(ProviderKind::Groq),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("  ANTHROPIC ".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
        assert_eq!("Grok".parse::<ProviderKind>().unwrap(), ProviderKind::Grok);
        assert_eq!("groq".parse::<ProviderKind>().unwrap(), ProviderKind::Groq);
    }

    #[test]
    fn test_unknown_provider_names_input_and_supported_set() {
        let err = "mistral".parse::<ProviderKind>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'mistral'"));
        assert!(message.contains("'openai', 'anthropic', 'grok', 'groq'"));
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.groq.max_tokens, 8192);
        assert_eq!(config.openai.max_tokens, 4096);
        assert_eq!(config.grok.base_url, "https://api.x.ai/v1");
        assert_eq!(config.get(ProviderKind::Anthropic).api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.openai.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_steering_mechanism() {
        assert!(ProviderKind::OpenAi.uses_tool_calling());
        assert!(ProviderKind::Groq.uses_tool_calling());
        assert!(!ProviderKind::Anthropic.uses_tool_calling());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut settings = ProviderSettings::defaults_for(ProviderKind::OpenAi);
        settings.api_key = Some("sk-secret".to_string());
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
