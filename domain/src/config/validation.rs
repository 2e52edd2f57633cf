//! Configuration issues detected at load time.
//!
//! Every issue is reported with a severity; loading never fails on them.

use super::roles::RoleBindings;
use crate::audit::criterion::ModelRole;
use crate::providers::ProviderKind;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    UnknownProvider { field: String, value: String },
    EmptyModelName { field: String },
    TemperatureOutOfRange { field: String },
    ZeroValue { field: String },
    /// An environment override that could not be parsed and was ignored.
    InvalidEnvValue { var: String, value: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

impl RoleBindings {
    /// Check every role binding.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for role in ModelRole::ALL {
            let binding = self.get(role);
            let field = |key: &str| format!("roles.{}.{}", role, key);

            if binding.provider.parse::<ProviderKind>().is_err() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider {
                        field: field("provider"),
                        value: binding.provider.clone(),
                    },
                    format!(
                        "{}: unknown provider '{}' (supported: {})",
                        field("provider"),
                        binding.provider,
                        ProviderKind::supported_list()
                    ),
                ));
            }

            if binding.model.trim().is_empty() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyModelName {
                        field: field("model"),
                    },
                    format!("{}: model name is empty", field("model")),
                ));
            }

            if !(0.0..=2.0).contains(&binding.temperature) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::TemperatureOutOfRange {
                        field: field("temperature"),
                    },
                    format!(
                        "{}: {} is outside [0, 2]",
                        field("temperature"),
                        binding.temperature
                    ),
                ));
            }
        }

        issues
    }
}
