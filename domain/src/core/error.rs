//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unsupported provider: '{received}'. Supported providers are {supported}")]
    UnknownProvider { received: String, supported: String },

    #[error("Unknown model role: '{0}'. Expected one of primary, reasoning, detail, judge")]
    UnknownRole(String),

    #[error("Invalid criterion '{id}': {reason}")]
    InvalidCriterion { id: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_display_names_input_and_supported_set() {
        let error = DomainError::UnknownProvider {
            received: "mistral".to_string(),
            supported: "'openai', 'anthropic'".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'mistral'"));
        assert!(message.contains("'openai', 'anthropic'"));
    }

    #[test]
    fn test_unknown_role_display() {
        let error = DomainError::UnknownRole("critic".to_string());
        assert!(error.to_string().starts_with("Unknown model role: 'critic'"));
    }
}
